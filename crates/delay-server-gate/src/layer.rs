//! Tower layer implementation for the admission gate.

use crate::config::AdmissionConfig;
use crate::service::Admission;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tower_layer::Layer;

/// Layer that bounds concurrent executions of the wrapped service.
///
/// Every service produced by one layer shares the same permit pool, so a
/// single layer applied to a router's clones still admits at most
/// `max_clients` calls in total.
#[derive(Clone)]
pub struct AdmissionLayer {
    config: Arc<AdmissionConfig>,
    semaphore: Arc<Semaphore>,
}

impl AdmissionLayer {
    /// Creates a new admission layer with the given configuration.
    pub fn new(config: AdmissionConfig) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_clients));
        Self {
            config: Arc::new(config),
            semaphore,
        }
    }

    /// Creates a new builder for configuring an admission layer.
    ///
    /// # Examples
    ///
    /// ```
    /// use delay_server_gate::AdmissionLayer;
    ///
    /// let layer = AdmissionLayer::builder()
    ///     .max_clients(4)
    ///     .name("delay-endpoint")
    ///     .build();
    /// ```
    pub fn builder() -> crate::AdmissionConfigBuilder {
        crate::AdmissionConfigBuilder::new()
    }

    /// Number of slots currently free.
    pub fn available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Stops handing out slots.
    ///
    /// Calls already admitted finish normally. Calls waiting for a slot, and
    /// every call after this one, fail with
    /// [`AdmissionError::Closed`](crate::AdmissionError::Closed).
    pub fn close(&self) {
        self.semaphore.close();
    }
}

impl<S> Layer<S> for AdmissionLayer {
    type Service = Admission<S>;

    fn layer(&self, service: S) -> Self::Service {
        Admission::new(service, Arc::clone(&self.semaphore), Arc::clone(&self.config))
    }
}
