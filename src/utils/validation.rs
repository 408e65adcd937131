use crate::utils::error::{PollError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_database_url(field_name: &str, url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(PollError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url.to_string(),
            reason: "Database URL cannot be empty".to_string(),
        });
    }

    if url == "memory" || url.starts_with("sqlite:") {
        return Ok(());
    }

    let scheme = url.split_once(':').map(|(scheme, _)| scheme).unwrap_or(url);
    Err(PollError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: url.to_string(),
        reason: format!(
            "Unsupported database scheme: {}. Use 'sqlite://<path>' or 'memory'",
            scheme
        ),
    })
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| PollError::MissingConfigError {
        field: field_name.to_string(),
    })
}

/// Form-level check: rejects blank input with a validation error, not a config error.
pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PollError::validation(field_name, "This field is required."));
    }
    Ok(())
}

pub fn validate_max_length(field_name: &str, value: &str, max: usize) -> Result<()> {
    let length = value.chars().count();
    if length > max {
        return Err(PollError::validation(
            field_name,
            format!(
                "Ensure this value has at most {} characters (it has {}).",
                max, length
            ),
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(PollError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
