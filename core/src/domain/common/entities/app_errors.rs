use thiserror::Error;

use crate::domain::completion::decode::DecodeError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("inference provider API key is not configured")]
    Unconfigured,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("inference provider request failed: {message}")]
    UpstreamFailure {
        status: Option<u16>,
        message: String,
    },

    #[error("malformed inference provider response: {0}")]
    MalformedUpstreamResponse(String),

    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl CoreError {
    /// Status code returned by the inference provider, when one was received.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            CoreError::UpstreamFailure { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<DecodeError> for CoreError {
    fn from(error: DecodeError) -> Self {
        CoreError::MalformedUpstreamResponse(error.to_string())
    }
}
