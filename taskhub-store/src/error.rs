//! Error types for the sync layer

use taskhub_client::ClientError;
use taskhub_core::domain::Role;
use taskhub_core::{ErrorKind, ValidationError};
use thiserror::Error;

/// Result type alias for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors surfaced by repositories
#[derive(Debug, Error)]
pub enum SyncError {
    /// The device is offline; no request was sent
    #[error("No network connection")]
    NoNetwork,

    /// Cache-only read of something never fetched
    #[error("Nothing cached for {0}")]
    NotCached(String),

    /// No session is stored
    #[error("Not logged in")]
    NotAuthenticated,

    /// The logged-in role may not perform the operation
    #[error("Role '{0}' is not allowed to perform this action")]
    Forbidden(Role),

    /// Request rejected before it was sent
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// The backend or the transport failed
    #[error(transparent)]
    Remote(#[from] ClientError),

    /// The local database failed
    #[error("Local cache error: {0}")]
    Cache(#[from] sqlx::Error),
}

impl SyncError {
    /// Category of this failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::NoNetwork => ErrorKind::NoNetwork,
            SyncError::NotCached(_) => ErrorKind::NotFound,
            SyncError::NotAuthenticated => ErrorKind::Unauthorized,
            SyncError::Forbidden(_) => ErrorKind::Forbidden,
            SyncError::Validation(_) => ErrorKind::BadRequest,
            SyncError::Remote(err) => err.kind(),
            SyncError::Cache(_) => ErrorKind::Unknown,
        }
    }

    /// Message suitable for display
    pub fn user_message(&self) -> String {
        match self {
            SyncError::Validation(err) => err.to_string(),
            SyncError::Remote(err) => err.user_message(),
            SyncError::NotAuthenticated => "You are not logged in.".to_string(),
            SyncError::NotCached(what) => {
                format!("No saved copy of {} is available offline.", what)
            }
            other => other.kind().user_message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(SyncError::NoNetwork.kind(), ErrorKind::NoNetwork);
        assert_eq!(SyncError::NotAuthenticated.kind(), ErrorKind::Unauthorized);
        assert_eq!(SyncError::Forbidden(Role::Employee).kind(), ErrorKind::Forbidden);
        assert_eq!(
            SyncError::from(ClientError::api_error(409, "dup")).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            SyncError::from(ValidationError::new("name", "must not be empty")).kind(),
            ErrorKind::BadRequest
        );
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            SyncError::NoNetwork.user_message(),
            ErrorKind::NoNetwork.user_message()
        );
        assert_eq!(
            SyncError::from(ValidationError::new("title", "must not be empty")).user_message(),
            "title: must not be empty"
        );
        assert!(SyncError::NotCached("tasks".into()).user_message().contains("tasks"));
    }
}
