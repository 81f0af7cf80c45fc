//! Error types for the admission gate.

use delay_server_core::ServerError;

/// Errors that can occur when entering the admission gate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdmissionError {
    /// The permit pool was closed, so no call can be admitted anymore.
    #[error("admission gate closed: no slots will be handed out")]
    Closed,
}

/// Result type for admission gate operations.
pub type Result<T> = std::result::Result<T, AdmissionError>;

impl From<AdmissionError> for ServerError {
    fn from(err: AdmissionError) -> Self {
        match err {
            AdmissionError::Closed => ServerError::GateClosed,
        }
    }
}
