//! Error categories
//!
//! Failures from the network, the cache or request validation are reduced to
//! a small set of categories, each with a fixed message suitable for display.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Category of a failed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    NoNetwork,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Unknown,
}

impl ErrorKind {
    /// Categorize an HTTP status code
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => ErrorKind::BadRequest,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            _ => ErrorKind::Unknown,
        }
    }

    /// Message shown to the user for this category
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::NoNetwork => "No internet connection. Please check your network and try again.",
            ErrorKind::BadRequest => "The request was invalid. Please check the entered data.",
            ErrorKind::Unauthorized => "Your session has expired. Please log in again.",
            ErrorKind::Forbidden => "You do not have permission to perform this action.",
            ErrorKind::NotFound => "The requested item could not be found.",
            ErrorKind::Conflict => "This item already exists or was changed by someone else.",
            ErrorKind::Unknown => "Something went wrong. Please try again later.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

/// A request field rejected before it was sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}
