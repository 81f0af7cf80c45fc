//! Configuration for the delay handler.

use crate::events::DelayEvent;
use crate::params::MAX_DELAY_CEILING_MS;
use crate::rng::SharedRng;
use delay_server_core::{EventListeners, FnListener, ValidationError};
use std::fmt;
use std::time::Duration;

/// Configuration for the delay handler.
#[derive(Clone)]
pub struct DelayConfig {
    /// Name of this handler instance for observability
    pub(crate) name: String,
    /// Largest accepted `max` value in milliseconds
    pub(crate) max_delay_ms: u64,
    /// Optional seed for deterministic draws
    pub(crate) seed: Option<u64>,
    /// Explicitly provided random source, takes precedence over `seed`
    pub(crate) rng: Option<SharedRng>,
    /// Event listeners
    pub(crate) event_listeners: EventListeners<DelayEvent>,
}

impl DelayConfig {
    /// Create a new builder for handler configuration.
    pub fn builder() -> DelayConfigBuilder {
        DelayConfigBuilder::new()
    }

    pub(crate) fn create_rng(&self) -> SharedRng {
        match (&self.rng, self.seed) {
            (Some(rng), _) => rng.clone(),
            (None, Some(seed)) => SharedRng::from_seed(seed),
            (None, None) => SharedRng::from_os_rng(),
        }
    }
}

impl fmt::Debug for DelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelayConfig")
            .field("name", &self.name)
            .field("max_delay_ms", &self.max_delay_ms)
            .field("seed", &self.seed)
            .field("listeners", &self.event_listeners.len())
            .finish()
    }
}

/// Builder for handler configuration.
pub struct DelayConfigBuilder {
    name: String,
    max_delay_ms: u64,
    seed: Option<u64>,
    rng: Option<SharedRng>,
    event_listeners: EventListeners<DelayEvent>,
}

impl DelayConfigBuilder {
    /// Create a new handler configuration builder.
    pub fn new() -> Self {
        Self {
            name: "delay".to_string(),
            max_delay_ms: MAX_DELAY_CEILING_MS,
            seed: None,
            rng: None,
            event_listeners: EventListeners::new(),
        }
    }

    /// Set the name of this handler instance.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the largest accepted `max` value in milliseconds.
    ///
    /// Default: 30000
    ///
    /// # Example
    /// ```
    /// use delay_server_handler::DelayConfig;
    ///
    /// let handler = DelayConfig::builder()
    ///     .max_delay_ms(5_000)
    ///     .build();
    /// ```
    pub fn max_delay_ms(mut self, max_delay_ms: u64) -> Self {
        self.max_delay_ms = max_delay_ms;
        self
    }

    /// Set a seed for deterministic delay and outcome draws.
    ///
    /// # Example
    /// ```
    /// use delay_server_handler::DelayConfig;
    ///
    /// let handler = DelayConfig::builder()
    ///     .seed(42)  // Same seed = same sequence of delays and failures
    ///     .build();
    /// ```
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use an existing random source, shared with whoever else holds it.
    pub fn rng(mut self, rng: SharedRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Add a listener for requests rejected by validation.
    ///
    /// # Example
    /// ```
    /// use delay_server_handler::DelayConfig;
    ///
    /// let handler = DelayConfig::builder()
    ///     .on_rejected(|reason| println!("bad request: {}", reason))
    ///     .build();
    /// ```
    pub fn on_rejected<F>(mut self, f: F) -> Self
    where
        F: Fn(&ValidationError) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let DelayEvent::ParamsRejected { reason, .. } = event {
                f(reason);
            }
        }));
        self
    }

    /// Add a listener for drawn delays.
    ///
    /// Fired for every validated request, including zero-length delays.
    ///
    /// # Example
    /// ```
    /// use delay_server_handler::DelayConfig;
    /// use std::time::Duration;
    ///
    /// let handler = DelayConfig::builder()
    ///     .on_delay_injected(|delay: Duration| {
    ///         println!("sleeping {:?}", delay);
    ///     })
    ///     .build();
    /// ```
    pub fn on_delay_injected<F>(mut self, f: F) -> Self
    where
        F: Fn(Duration) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let DelayEvent::DelayInjected { delay, .. } = event {
                f(*delay);
            }
        }));
        self
    }

    /// Add a listener for simulated failures.
    pub fn on_failure_injected<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if matches!(event, DelayEvent::FailureInjected { .. }) {
                f();
            }
        }));
        self
    }

    /// Add a listener for requests answered with the success page.
    pub fn on_succeeded<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if matches!(event, DelayEvent::Succeeded { .. }) {
                f();
            }
        }));
        self
    }

    /// Build the configuration and return a [`DelayService`](crate::DelayService).
    pub fn build(self) -> crate::service::DelayService {
        let config = DelayConfig {
            name: self.name,
            max_delay_ms: self.max_delay_ms,
            seed: self.seed,
            rng: self.rng,
            event_listeners: self.event_listeners,
        };
        crate::service::DelayService::new(config)
    }
}

impl Default for DelayConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
