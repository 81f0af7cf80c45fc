//! Error taxonomy for the delay server.
//!
//! Callers of the server only ever see three kinds of failure:
//!
//! - **Client input errors** ([`ValidationError`]): out-of-range `min`/`max`
//!   query parameters, answered with `400 Bad Request`.
//! - **Simulated failures** ([`ServerError::MockFailure`]): the failure chance
//!   came up, answered with `500 Internal Server Error`. This is the server
//!   doing its job, not a bug.
//! - **Gate shutdown** ([`ServerError::GateClosed`]): the admission gate's
//!   permit pool was closed. Not reachable while the server is running
//!   normally; answered with `503 Service Unavailable`.
//!
//! Unparseable numeric parameters never show up here: they are replaced by
//! their defaults during parsing.
//!
//! # Example
//!
//! ```
//! use delay_server_core::{ServerError, ValidationError};
//!
//! let err: ServerError = ValidationError::MaxBelowMin.into();
//! assert_eq!(err.status_code(), 400);
//! assert!(err.to_string().contains("'maxMs' & 'minMs'"));
//!
//! assert_eq!(ServerError::MockFailure.status_code(), 500);
//! assert_eq!(ServerError::MockFailure.to_string(), "Mock error");
//! ```

/// A rejected set of delay parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// `max` was negative or above the configured ceiling.
    #[error("invalid 'maxMs' query param. must be >= 0 and <= {limit}")]
    MaxOutOfRange {
        /// Largest accepted `max` value in milliseconds.
        limit: u64,
    },
    /// `min` was negative.
    #[error("invalid 'minMs' query param. must be >= 0")]
    NegativeMin,
    /// `max` was smaller than `min`.
    #[error(
        "invalid 'maxMs' & 'minMs' query params. maxMs must be greater than or equal to minMs"
    )]
    MaxBelowMin,
}

/// Every error a request can end with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServerError {
    /// The query parameters failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The failure chance fired for this request.
    #[error("Mock error")]
    MockFailure,
    /// The admission gate no longer hands out slots.
    #[error("admission gate closed")]
    GateClosed,
}

impl ServerError {
    /// HTTP status code this error is answered with.
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::Validation(_) => 400,
            ServerError::MockFailure => 500,
            ServerError::GateClosed => 503,
        }
    }

    /// Returns `true` if the caller sent bad parameters.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ServerError::Validation(_))
    }

    /// Returns `true` if this is an injected, intentional failure.
    pub fn is_simulated_failure(&self) -> bool {
        matches!(self, ServerError::MockFailure)
    }

    /// Extracts the validation error, if this is a `Validation` variant.
    pub fn validation_error(&self) -> Option<ValidationError> {
        match self {
            ServerError::Validation(err) => Some(*err),
            _ => None,
        }
    }
}
