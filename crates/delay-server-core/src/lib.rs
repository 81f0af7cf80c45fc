//! Core infrastructure for the delay server.
//!
//! Shared by the admission gate and the delay handler:
//! - Event system for observing admissions, delays and injected failures
//! - The error taxonomy surfaced to HTTP callers

pub mod error;
pub mod events;

pub use error::{ServerError, ValidationError};
pub use events::{EventListener, EventListeners, FnListener, ServerEvent};
