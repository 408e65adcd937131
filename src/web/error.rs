use crate::utils::error::{ErrorSeverity, PollError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl PollError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PollError::NotFound { .. } | PollError::MalformedId { .. } => StatusCode::NOT_FOUND,
            PollError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PollError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.severity() >= ErrorSeverity::Medium {
            tracing::error!(
                "Request failed: {} (Category: {:?}, Severity: {:?})",
                self,
                self.category(),
                self.severity()
            );
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, self.user_friendly_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PollError::not_found("Poll", 1).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PollError::malformed_id("Poll", "abc").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PollError::validation("vote", "This field is required.").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PollError::StorageMessage {
                message: "disk full".to_string()
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
