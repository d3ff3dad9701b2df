use reqwest::StatusCode;
use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "Please enter a question";
pub const REQUEST_FALLBACK_MESSAGE: &str = "Failed to get response";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("question is empty")]
    EmptyQuestion,
}

impl ValidationError {
    pub fn user_message(&self) -> String {
        VALIDATION_MESSAGE.to_string()
    }
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("travel service request timed out")]
    Timeout,
    #[error("failed to reach travel service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("travel service returned {status}: {}", .detail.as_deref().unwrap_or("<no detail>"))]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("travel service returned a malformed answer: {0}")]
    Malformed(String),
}

impl RequestError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => REQUEST_FALLBACK_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("a request is already in flight")]
    Busy,
}

impl SessionError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.user_message(),
            Self::Request(err) => err.user_message(),
            Self::Busy => "A question is already being answered".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_surfaces_service_detail() {
        let err = RequestError::Status {
            status: StatusCode::TOO_MANY_REQUESTS,
            detail: Some("rate limited".to_string()),
        };
        assert_eq!(err.user_message(), "rate limited");
    }

    #[test]
    fn other_request_errors_fall_back_to_generic_message() {
        let no_detail = RequestError::Status {
            status: StatusCode::BAD_GATEWAY,
            detail: None,
        };
        assert_eq!(no_detail.user_message(), REQUEST_FALLBACK_MESSAGE);
        assert_eq!(RequestError::Timeout.user_message(), REQUEST_FALLBACK_MESSAGE);
        assert_eq!(
            RequestError::Malformed("missing field `response`".into()).user_message(),
            REQUEST_FALLBACK_MESSAGE
        );
    }

    #[test]
    fn validation_error_uses_fixed_message() {
        let err = SessionError::from(ValidationError::EmptyQuestion);
        assert_eq!(err.user_message(), VALIDATION_MESSAGE);
    }
}
