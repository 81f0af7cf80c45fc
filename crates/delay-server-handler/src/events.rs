//! Event types for the delay handler.

use delay_server_core::{ServerEvent, ValidationError};
use std::time::{Duration, Instant};

/// Events emitted by the delay handler.
#[derive(Debug, Clone)]
pub enum DelayEvent {
    /// The request's parameters failed validation; no delay was applied.
    ParamsRejected {
        /// Name of the handler instance
        handler_name: String,
        /// When the event occurred
        timestamp: Instant,
        /// The violated constraint
        reason: ValidationError,
    },
    /// The request is about to be suspended.
    DelayInjected {
        /// Name of the handler instance
        handler_name: String,
        /// When the event occurred
        timestamp: Instant,
        /// Amount of delay drawn
        delay: Duration,
    },
    /// The request ended with a simulated failure.
    FailureInjected {
        /// Name of the handler instance
        handler_name: String,
        /// When the event occurred
        timestamp: Instant,
    },
    /// The request ended with the success page.
    Succeeded {
        /// Name of the handler instance
        handler_name: String,
        /// When the event occurred
        timestamp: Instant,
    },
}

impl ServerEvent for DelayEvent {
    fn event_type(&self) -> &'static str {
        match self {
            DelayEvent::ParamsRejected { .. } => "delay.params_rejected",
            DelayEvent::DelayInjected { .. } => "delay.delay_injected",
            DelayEvent::FailureInjected { .. } => "delay.failure_injected",
            DelayEvent::Succeeded { .. } => "delay.succeeded",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            DelayEvent::ParamsRejected { timestamp, .. }
            | DelayEvent::DelayInjected { timestamp, .. }
            | DelayEvent::FailureInjected { timestamp, .. }
            | DelayEvent::Succeeded { timestamp, .. } => *timestamp,
        }
    }

    fn source_name(&self) -> &str {
        match self {
            DelayEvent::ParamsRejected { handler_name, .. }
            | DelayEvent::DelayInjected { handler_name, .. }
            | DelayEvent::FailureInjected { handler_name, .. }
            | DelayEvent::Succeeded { handler_name, .. } => handler_name,
        }
    }
}
