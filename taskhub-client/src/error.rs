//! Error types for the TaskHub client

use taskhub_core::ErrorKind;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the TaskHub client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// API answered 2xx but flagged the request as unsuccessful
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Category of this failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RequestFailed(err) => {
                if err.is_connect() || err.is_timeout() {
                    ErrorKind::NoNetwork
                } else if let Some(status) = err.status() {
                    ErrorKind::from_status(status.as_u16())
                } else {
                    ErrorKind::Unknown
                }
            }
            Self::ApiError { status, .. } => ErrorKind::from_status(*status),
            Self::Rejected(_) => ErrorKind::BadRequest,
            Self::ParseError(_) => ErrorKind::Unknown,
        }
    }

    /// Message suitable for display
    ///
    /// Backend messages for 4xx answers are usually written for end users
    /// ("Email already registered"), so they are preferred over the generic text.
    pub fn user_message(&self) -> String {
        match self {
            Self::ApiError { status, message }
                if (400..500).contains(status) && *status != 401 && !message.is_empty() =>
            {
                message.clone()
            }
            Self::Rejected(message) if !message.is_empty() => message.clone(),
            _ => self.kind().user_message().to_string(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if the bearer token was rejected
    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_kinds() {
        assert_eq!(ClientError::api_error(401, "").kind(), ErrorKind::Unauthorized);
        assert_eq!(ClientError::api_error(409, "dup").kind(), ErrorKind::Conflict);
        assert_eq!(ClientError::api_error(503, "down").kind(), ErrorKind::Unknown);
        assert_eq!(ClientError::Rejected("no".into()).kind(), ErrorKind::BadRequest);
        assert_eq!(ClientError::ParseError("eof".into()).kind(), ErrorKind::Unknown);
    }

    #[test]
    fn test_status_predicates() {
        let not_found = ClientError::api_error(404, "missing");
        assert!(not_found.is_not_found());
        assert!(not_found.is_client_error());
        assert!(!not_found.is_server_error());

        let server = ClientError::api_error(500, "boom");
        assert!(server.is_server_error());
        assert!(!server.is_client_error());
        assert!(ClientError::api_error(401, "").is_unauthorized());
    }

    #[test]
    fn test_user_message_prefers_backend_text_for_client_errors() {
        let conflict = ClientError::api_error(409, "Email already registered");
        assert_eq!(conflict.user_message(), "Email already registered");

        let server = ClientError::api_error(500, "NullPointerException at line 3");
        assert_eq!(server.user_message(), ErrorKind::Unknown.user_message());

        let expired = ClientError::api_error(401, "jwt expired");
        assert_eq!(expired.user_message(), ErrorKind::Unauthorized.user_message());
    }
}
