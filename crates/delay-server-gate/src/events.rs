//! Events emitted by the admission gate.

use delay_server_core::ServerEvent;
use std::time::{Duration, Instant};

/// Events emitted by the admission gate.
#[derive(Debug, Clone)]
pub enum AdmissionEvent {
    /// A call found every slot taken and is waiting for one.
    CallQueued {
        /// Name of the gate instance
        gate_name: String,
        /// When the event occurred
        timestamp: Instant,
        /// Configured number of slots
        max_clients: usize,
    },
    /// A call acquired a slot and is about to run.
    CallAdmitted {
        /// Name of the gate instance
        gate_name: String,
        /// When the event occurred
        timestamp: Instant,
        /// Calls in flight, this one included
        in_flight: usize,
    },
    /// An admitted call gave its slot back.
    CallReleased {
        /// Name of the gate instance
        gate_name: String,
        /// When the event occurred
        timestamp: Instant,
        /// How long the slot was held
        held_for: Duration,
    },
}

impl ServerEvent for AdmissionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AdmissionEvent::CallQueued { .. } => "gate.call_queued",
            AdmissionEvent::CallAdmitted { .. } => "gate.call_admitted",
            AdmissionEvent::CallReleased { .. } => "gate.call_released",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            AdmissionEvent::CallQueued { timestamp, .. }
            | AdmissionEvent::CallAdmitted { timestamp, .. }
            | AdmissionEvent::CallReleased { timestamp, .. } => *timestamp,
        }
    }

    fn source_name(&self) -> &str {
        match self {
            AdmissionEvent::CallQueued { gate_name, .. }
            | AdmissionEvent::CallAdmitted { gate_name, .. }
            | AdmissionEvent::CallReleased { gate_name, .. } => gate_name,
        }
    }
}
