use thiserror::Error;

#[derive(Error, Debug)]
pub enum PollError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{entity} '{raw}' not found")]
    MalformedId { entity: &'static str, raw: String },

    #[error("Validation error on '{field}': {message}")]
    ValidationError { field: String, message: String },

    #[error("Storage error: {0}")]
    StorageError(#[from] sqlx::Error),

    #[error("Storage error: {message}")]
    StorageMessage { message: String },

    #[error("Template error: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, PollError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Request,
    Storage,
    Presentation,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PollError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        PollError::NotFound { entity, id }
    }

    /// An id taken from a URL that does not parse as one. Treated like a missing row.
    pub fn malformed_id(entity: &'static str, raw: impl Into<String>) -> Self {
        PollError::MalformedId {
            entity,
            raw: raw.into(),
        }
    }

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        PollError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PollError::NotFound { .. }
            | PollError::MalformedId { .. }
            | PollError::ValidationError { .. } => ErrorCategory::Request,
            PollError::StorageError(_) | PollError::StorageMessage { .. } => {
                ErrorCategory::Storage
            }
            PollError::TemplateError(_) | PollError::SerializationError(_) => {
                ErrorCategory::Presentation
            }
            PollError::ConfigError { .. }
            | PollError::InvalidConfigValueError { .. }
            | PollError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PollError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request => ErrorSeverity::Low,
            ErrorCategory::Presentation => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            PollError::NotFound { entity, id } => format!("No {} with id {} exists", entity, id),
            PollError::MalformedId { entity, raw } => {
                format!("No {} with id {} exists", entity, raw)
            }
            PollError::ValidationError { message, .. } => message.clone(),
            PollError::StorageError(_) | PollError::StorageMessage { .. } => {
                "The poll database could not be read or written".to_string()
            }
            PollError::TemplateError(_) | PollError::SerializationError(_) => {
                "The page could not be rendered".to_string()
            }
            PollError::ConfigError { .. }
            | PollError::InvalidConfigValueError { .. }
            | PollError::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
            PollError::IoError(e) => format!("File system error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Request => "Check the poll and choice identifiers and try again",
            ErrorCategory::Storage => "Check that database.url points to a writable SQLite file",
            ErrorCategory::Presentation => "Check the templates shipped with the binary",
            ErrorCategory::Configuration => "Fix the configuration file or command line flags",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}
