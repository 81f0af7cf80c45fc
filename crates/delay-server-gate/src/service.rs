//! Admission gate service implementation.

use crate::config::AdmissionConfig;
use crate::error::AdmissionError;
use crate::events::AdmissionEvent;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError};
use tower_service::Service;

/// Service that admits at most `max_clients` concurrent calls to `inner`.
///
/// The slot is an [`OwnedSemaphorePermit`] owned by the call's future. It
/// is given back when that future completes, returns an error, panics, or is
/// dropped before completion (for instance when the client disconnects
/// mid-delay).
#[derive(Clone)]
pub struct Admission<S> {
    inner: S,
    semaphore: Arc<Semaphore>,
    config: Arc<AdmissionConfig>,
}

impl<S> Admission<S> {
    pub(crate) fn new(inner: S, semaphore: Arc<Semaphore>, config: Arc<AdmissionConfig>) -> Self {
        Self {
            inner,
            semaphore,
            config,
        }
    }

    /// Number of slots currently free.
    pub fn available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Configured number of slots.
    pub fn max_clients(&self) -> usize {
        self.config.max_clients
    }

    /// Returns a reference to the wrapped service.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }
}

async fn acquire(
    semaphore: Arc<Semaphore>,
    config: &AdmissionConfig,
) -> Result<OwnedSemaphorePermit, AdmissionError> {
    match Arc::clone(&semaphore).try_acquire_owned() {
        Ok(permit) => Ok(permit),
        Err(TryAcquireError::Closed) => Err(AdmissionError::Closed),
        Err(TryAcquireError::NoPermits) => {
            config.event_listeners.emit(&AdmissionEvent::CallQueued {
                gate_name: config.name.clone(),
                timestamp: Instant::now(),
                max_clients: config.max_clients,
            });

            #[cfg(feature = "tracing")]
            tracing::debug!(gate = %config.name, max_clients = config.max_clients, "all slots busy, waiting");

            semaphore
                .acquire_owned()
                .await
                .map_err(|_| AdmissionError::Closed)
        }
    }
}

impl<S, Request> Service<Request> for Admission<S>
where
    S: Service<Request> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Response: Send + 'static,
    S::Error: From<AdmissionError> + Send + 'static,
    Request: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        // Take the service that was driven to readiness and leave a clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let semaphore = Arc::clone(&self.semaphore);
        let config = Arc::clone(&self.config);

        Box::pin(async move {
            let permit = match acquire(Arc::clone(&semaphore), &config).await {
                Ok(permit) => permit,
                Err(err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(gate = %config.name, "admission refused: {}", err);

                    return Err(err.into());
                }
            };

            let admitted_at = Instant::now();
            let in_flight = config
                .max_clients
                .saturating_sub(semaphore.available_permits());
            config.event_listeners.emit(&AdmissionEvent::CallAdmitted {
                gate_name: config.name.clone(),
                timestamp: admitted_at,
                in_flight,
            });

            #[cfg(feature = "tracing")]
            tracing::trace!(gate = %config.name, in_flight, "call admitted");

            let result = inner.call(request).await;

            drop(permit);

            let held_for = admitted_at.elapsed();
            config.event_listeners.emit(&AdmissionEvent::CallReleased {
                gate_name: config.name.clone(),
                timestamp: Instant::now(),
                held_for,
            });

            #[cfg(feature = "tracing")]
            tracing::trace!(
                gate = %config.name,
                held_ms = held_for.as_millis() as u64,
                "slot released"
            );

            result
        })
    }
}
