//! Error types for form rendering

use std::fmt;
use thiserror::Error;

/// What a failed lookup was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    File,
    Message,
    Service,
    Method,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LookupKind::File => "file",
            LookupKind::Message => "message",
            LookupKind::Service => "service",
            LookupKind::Method => "method",
        };
        f.write_str(name)
    }
}

/// Fatal errors that abort a form render
///
/// Unsupported fields are not errors; they are reported per field.
#[derive(Debug, Error)]
pub enum FormError {
    /// Non-success status while fetching the file set
    #[error("{status} {message}")]
    FetchFailure { status: u16, message: String },

    /// Connection-level failure before a status was received
    #[error("Transport error: {0}")]
    Transport(String),

    /// Body could not be read as a file set
    #[error("Invalid file set: {0}")]
    InvalidDocument(String),

    /// A local file set could not be read
    #[error("Failed to read file set {path}: {message}")]
    Io { path: String, message: String },

    /// A file, message, service or method lookup failed
    #[error("No {kind} found for '{name}'")]
    NotFound { kind: LookupKind, name: String },
}

impl FormError {
    pub fn not_found(kind: LookupKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Convert to HTTP status code for page responses
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::FetchFailure { .. } | Self::Transport(_) | Self::InvalidDocument(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for FormError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidDocument(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidDocument(err.to_string())
    }
}

pub type FormResult<T> = Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failure_displays_status_verbatim() {
        let err = FormError::FetchFailure {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "404 Not Found");
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_not_found_message() {
        let err = FormError::not_found(LookupKind::Service, "pkg.Missing");
        assert_eq!(err.to_string(), "No service found for 'pkg.Missing'");
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
    }
}
