//! Error types and result aliases for packagecloud operations.
//!
//! Every failure, whether it comes from local input, the transport, or the
//! remote service, is represented by [`PackagecloudError`]. The coarse
//! [`ErrorCode`] projection is what callers branch on.

use std::fmt;
use thiserror::Error;

/// Unified error type for all packagecloud operations
#[derive(Error, Debug)]
pub enum PackagecloudError {
    // Local input errors
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("invalid package target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    #[error("PACKAGECLOUD_TOKEN is empty")]
    MissingToken,

    #[error("failed to parse config {path}: {message}")]
    ConfigParse { path: String, message: String },

    // Service responses
    #[error("unauthenticated: {body}")]
    Unauthenticated { body: String },

    #[error("not found: {body}")]
    NotFound { body: String },

    #[error("already exists: {body}")]
    AlreadyExists { body: String },

    #[error("resp: {status}, {body:?}")]
    Internal { status: String, body: String },

    // Transport errors
    #[error("network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("json decode: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("operation cancelled")]
    Cancelled,
}

/// Result type alias for packagecloud operations
pub type PackagecloudResult<T> = Result<T, PackagecloudError>;

/// Coarse error category shared by every operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidArgument,
    Unauthenticated,
    NotFound,
    AlreadyExists,
    Internal,
    Unavailable,
    Cancelled,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::InvalidArgument => "InvalidArgument",
            ErrorCode::Unauthenticated => "Unauthenticated",
            ErrorCode::NotFound => "NotFound",
            ErrorCode::AlreadyExists => "AlreadyExists",
            ErrorCode::Internal => "Internal",
            ErrorCode::Unavailable => "Unavailable",
            ErrorCode::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

impl PackagecloudError {
    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a network error from any error type
    pub fn network<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create a decode error from any error type
    pub fn decode<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Category of this error
    pub fn code(&self) -> ErrorCode {
        match self {
            PackagecloudError::InvalidArgument { .. }
            | PackagecloudError::InvalidTarget { .. }
            | PackagecloudError::MissingToken
            | PackagecloudError::ConfigParse { .. } => ErrorCode::InvalidArgument,
            PackagecloudError::Unauthenticated { .. } => ErrorCode::Unauthenticated,
            PackagecloudError::NotFound { .. } => ErrorCode::NotFound,
            PackagecloudError::AlreadyExists { .. } => ErrorCode::AlreadyExists,
            PackagecloudError::Internal { .. }
            | PackagecloudError::Decode { .. }
            | PackagecloudError::Io { .. } => ErrorCode::Internal,
            PackagecloudError::Network { .. } => ErrorCode::Unavailable,
            PackagecloudError::Cancelled => ErrorCode::Cancelled,
        }
    }

    /// Errors caused by how the tool was invoked rather than by the operation
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            PackagecloudError::InvalidTarget { .. } | PackagecloudError::MissingToken
        )
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            PackagecloudError::MissingToken => Some(
                "Set PACKAGECLOUD_TOKEN to a packagecloud API token. \
                 You can find one at https://packagecloud.io/api_token",
            ),
            PackagecloudError::Unauthenticated { .. } => {
                Some("Check that your API token is valid and has access to the repository")
            },
            PackagecloudError::AlreadyExists { .. } => {
                Some("The package was already pushed; remove it first with 'packagecloud rm'")
            },
            PackagecloudError::NotFound { .. } => {
                Some("Check the repository, distribution, version and filename")
            },
            PackagecloudError::InvalidTarget { .. } => {
                Some("Targets look like user/repo/distro/version, e.g. example-user/example-repo/ubuntu/xenial")
            },
            PackagecloudError::Network { .. } => Some("Check your internet connection and try again"),
            _ => None,
        }
    }
}
