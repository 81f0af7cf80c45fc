//! Configuration for the admission gate.

use crate::events::AdmissionEvent;
use delay_server_core::events::{EventListeners, FnListener};
use std::time::Duration;

/// Configuration for the admission gate.
#[derive(Clone)]
pub struct AdmissionConfig {
    /// Number of calls allowed to execute at once.
    pub(crate) max_clients: usize,
    /// Name of this gate instance.
    pub(crate) name: String,
    /// Event listeners.
    pub(crate) event_listeners: EventListeners<AdmissionEvent>,
}

impl AdmissionConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> AdmissionConfigBuilder {
        AdmissionConfigBuilder::new()
    }
}

/// Builder for admission gate configuration.
pub struct AdmissionConfigBuilder {
    max_clients: usize,
    name: String,
    event_listeners: EventListeners<AdmissionEvent>,
}

impl AdmissionConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self {
            max_clients: 1,
            name: "admission".to_string(),
            event_listeners: EventListeners::new(),
        }
    }

    /// Sets how many calls may execute at the same time.
    ///
    /// A gate with zero slots would never admit anything, so values below
    /// one are raised to one.
    ///
    /// Default: 1
    pub fn max_clients(mut self, max: usize) -> Self {
        self.max_clients = max.max(1);
        self
    }

    /// Sets the name of this gate instance.
    ///
    /// Default: "admission"
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Registers a callback for calls that have to wait for a slot.
    ///
    /// Fired once per call, when the call first finds every slot taken.
    /// The call keeps waiting afterwards; the gate never rejects.
    ///
    /// # Callback Signature
    /// `Fn(usize)` - Called with the configured number of slots.
    ///
    /// # Example
    /// ```rust,no_run
    /// use delay_server_gate::AdmissionConfig;
    ///
    /// let layer = AdmissionConfig::builder()
    ///     .max_clients(2)
    ///     .on_call_queued(|max_clients| {
    ///         println!("all {} slots busy, waiting", max_clients);
    ///     })
    ///     .build();
    /// ```
    pub fn on_call_queued<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let AdmissionEvent::CallQueued { max_clients, .. } = event {
                f(*max_clients);
            }
        }));
        self
    }

    /// Registers a callback for calls that acquired a slot.
    ///
    /// # Callback Signature
    /// `Fn(usize)` - Called with the number of calls in flight, this one
    /// included. Always between 1 and `max_clients`.
    pub fn on_call_admitted<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let AdmissionEvent::CallAdmitted { in_flight, .. } = event {
                f(*in_flight);
            }
        }));
        self
    }

    /// Registers a callback for calls that gave their slot back.
    ///
    /// Fired after the wrapped service finishes, whether it succeeded or
    /// failed. Calls that are cancelled or panic still release their slot,
    /// but do not reach this callback.
    ///
    /// # Callback Signature
    /// `Fn(Duration)` - Called with how long the slot was held.
    ///
    /// # Example
    /// ```rust,no_run
    /// use delay_server_gate::AdmissionConfig;
    /// use std::time::Duration;
    ///
    /// let layer = AdmissionConfig::builder()
    ///     .on_call_released(|held_for| {
    ///         if held_for > Duration::from_secs(5) {
    ///             println!("slot held for {:?}", held_for);
    ///         }
    ///     })
    ///     .build();
    /// ```
    pub fn on_call_released<F>(mut self, f: F) -> Self
    where
        F: Fn(Duration) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let AdmissionEvent::CallReleased { held_for, .. } = event {
                f(*held_for);
            }
        }));
        self
    }

    /// Builds the configuration and returns an [`AdmissionLayer`](crate::AdmissionLayer).
    pub fn build(self) -> crate::layer::AdmissionLayer {
        let config = AdmissionConfig {
            max_clients: self.max_clients,
            name: self.name,
            event_listeners: self.event_listeners,
        };
        crate::layer::AdmissionLayer::new(config)
    }
}

impl Default for AdmissionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
