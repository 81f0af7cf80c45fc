//! Property tests for the admission gate.
//!
//! Invariants tested:
//! - Calls inside the gate never exceed max_clients
//! - Every call completes and every slot comes back

use delay_server_core::ServerError;
use delay_server_gate::AdmissionLayer;
use proptest::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::runtime::Runtime;
use tower::{Layer, Service, ServiceExt};

/// Test service that records the highest number of concurrent calls.
#[derive(Clone)]
struct ConcurrencyTracker {
    current: Arc<AtomicUsize>,
    max_seen: Arc<AtomicUsize>,
    work_duration_ms: u64,
}

impl ConcurrencyTracker {
    fn new(work_duration_ms: u64) -> Self {
        Self {
            current: Arc::new(AtomicUsize::new(0)),
            max_seen: Arc::new(AtomicUsize::new(0)),
            work_duration_ms,
        }
    }
}

impl tower::Service<bool> for ConcurrencyTracker {
    type Response = ();
    type Error = ServerError;
    type Future = futures::future::BoxFuture<'static, Result<(), ServerError>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, fail: bool) -> Self::Future {
        let current = Arc::clone(&self.current);
        let max_seen = Arc::clone(&self.max_seen);
        let duration = self.work_duration_ms;

        Box::pin(async move {
            let now = current.fetch_add(1, Ordering::SeqCst) + 1;
            max_seen.fetch_max(now, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(duration)).await;

            current.fetch_sub(1, Ordering::SeqCst);
            if fail {
                Err(ServerError::MockFailure)
            } else {
                Ok(())
            }
        })
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Property: the gate never admits more concurrent calls than configured
    #[test]
    fn gate_respects_max_clients(
        max_clients in 1usize..=8,
        outcomes in prop::collection::vec(any::<bool>(), 1..=40),
        work_duration_ms in 1u64..=5,
    ) {
        let rt = Runtime::new().unwrap();
        rt.block_on(async {
            let tracker = ConcurrencyTracker::new(work_duration_ms);
            let max_seen = Arc::clone(&tracker.max_seen);

            let layer = AdmissionLayer::builder().max_clients(max_clients).build();
            let service = layer.layer(tracker);

            let mut handles = Vec::new();
            for fail in outcomes.iter().copied() {
                let mut svc = service.clone();
                handles.push(tokio::spawn(async move {
                    svc.ready().await?.call(fail).await
                }));
            }

            let mut failures = 0;
            for handle in handles {
                if handle.await.unwrap().is_err() {
                    failures += 1;
                }
            }

            let observed = max_seen.load(Ordering::SeqCst);
            prop_assert!(
                observed <= max_clients,
                "observed {} concurrent calls but limit was {}",
                observed,
                max_clients
            );
            prop_assert_eq!(failures, outcomes.iter().filter(|f| **f).count());
            prop_assert_eq!(layer.available_slots(), max_clients);

            Ok(())
        })?;
    }
}
