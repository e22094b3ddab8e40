//! Error types for the Humata adapter

use relay_application::GatewayError;
use thiserror::Error;

/// Result type alias for Humata operations
pub type Result<T> = std::result::Result<T, HumataError>;

/// Errors that can occur when talking to the Humata API
#[derive(Error, Debug)]
pub enum HumataError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Humata responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {error}\nRaw response: {raw}")]
    Parse { error: String, raw: String },
}

impl From<HumataError> for GatewayError {
    fn from(e: HumataError) -> Self {
        match e {
            HumataError::Http(e) if e.is_timeout() => GatewayError::Timeout,
            HumataError::Http(e) => GatewayError::ConnectionError(e.to_string()),
            HumataError::Status { status, body } => GatewayError::Rejected { status, body },
            HumataError::Parse { error, raw } => {
                GatewayError::MalformedBody(format!("{error} (raw: {raw})"))
            }
        }
    }
}
