//! Delay handler service implementation.

use crate::config::DelayConfig;
use crate::events::DelayEvent;
use crate::params::DelayParams;
use crate::rng::SharedRng;
use delay_server_core::ServerError;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tower_service::Service;

/// Page returned when a request neither fails validation nor draws a failure.
pub const WELCOME_PAGE: &str = concat!(
    "<h1>welcome to the rust delay server</h1>",
    "<h2> supported query params</h2>",
    "<ul>",
    "<li>max : max delay in milliseconds. defaults to 1</li>",
    "<li>min : min delay in milliseconds. defaults to 0</li>",
    "<li>failure : 1 in X failure chance. defaults to 0 (off)</li>",
    "</ul>",
);

/// A Tower service that validates delay parameters, sleeps for a random
/// duration, then answers with [`WELCOME_PAGE`] or a simulated failure.
///
/// Clones share the configuration and the random source.
#[derive(Clone, Debug)]
pub struct DelayService {
    config: Arc<DelayConfig>,
    rng: SharedRng,
}

impl DelayService {
    pub(crate) fn new(config: DelayConfig) -> Self {
        let rng = config.create_rng();
        Self {
            config: Arc::new(config),
            rng,
        }
    }

    /// Largest accepted `max` value in milliseconds.
    pub fn max_delay_ms(&self) -> u64 {
        self.config.max_delay_ms
    }
}

impl Service<DelayParams> for DelayService {
    type Response = &'static str;
    type Error = ServerError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, params: DelayParams) -> Self::Future {
        let config = Arc::clone(&self.config);
        let rng = self.rng.clone();

        Box::pin(async move {
            let bounds = match params.validate(config.max_delay_ms) {
                Ok(bounds) => bounds,
                Err(reason) => {
                    config.event_listeners.emit(&DelayEvent::ParamsRejected {
                        handler_name: config.name.clone(),
                        timestamp: Instant::now(),
                        reason,
                    });

                    #[cfg(feature = "tracing")]
                    tracing::debug!(handler = %config.name, ?params, "rejected: {}", reason);

                    return Err(reason.into());
                }
            };

            let draw = rng.draw(&bounds);

            config.event_listeners.emit(&DelayEvent::DelayInjected {
                handler_name: config.name.clone(),
                timestamp: Instant::now(),
                delay: draw.delay,
            });

            #[cfg(feature = "tracing")]
            tracing::debug!(
                handler = %config.name,
                delay_ms = draw.delay.as_millis() as u64,
                min_ms = bounds.min_ms(),
                max_ms = bounds.max_ms(),
                "delay injected"
            );

            if !draw.delay.is_zero() {
                tokio::time::sleep(draw.delay).await;
            }

            if draw.fail {
                config.event_listeners.emit(&DelayEvent::FailureInjected {
                    handler_name: config.name.clone(),
                    timestamp: Instant::now(),
                });

                #[cfg(feature = "tracing")]
                tracing::info!(
                    handler = %config.name,
                    failure_chance = ?bounds.failure_chance(),
                    "failure injected"
                );

                return Err(ServerError::MockFailure);
            }

            config.event_listeners.emit(&DelayEvent::Succeeded {
                handler_name: config.name.clone(),
                timestamp: Instant::now(),
            });

            Ok(WELCOME_PAGE)
        })
    }
}
