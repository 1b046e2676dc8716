//! Error types for Parcel

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error raised by the HTTP transport
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    // Response Errors
    #[error("Failed to {operation} object: {status_text}\n{body}")]
    RequestFailed {
        operation: &'static str,
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Missing required header: {0}")]
    MissingHeader(String),

    #[error("Invalid ETag header: {0}")]
    InvalidEtag(#[source] serde_json::Error),

    // Request Errors
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Configuration Errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Transport(TransportError),
}

impl Error {
    /// Wrap an error raised by the HTTP transport without reinterpreting it
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Transport(Box::new(err))
    }

    pub fn code(&self) -> &'static str {
        match self {
            Error::RequestFailed { .. } => "RequestFailed",
            Error::MissingHeader(_) => "MissingHeader",
            Error::InvalidEtag(_) => "InvalidEtag",
            Error::InvalidUrl(_) => "InvalidUrl",
            Error::InvalidHeader(_) => "InvalidHeader",
            Error::InvalidRequest(_) => "InvalidRequest",
            Error::InvalidConfig(_) => "InvalidConfig",
            Error::Transport(_) => "Transport",
        }
    }

    /// HTTP status of a failed response, if the error came from one
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Error::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_request_failed(&self) -> bool {
        matches!(self, Error::RequestFailed { .. })
    }
}
