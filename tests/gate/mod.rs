
use delay_server_core::ServerError;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};
use std::time::Duration;

/// Tracks how many calls are inside a service at once.
#[derive(Clone, Default)]
pub struct InFlight {
    current: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl InFlight {
    pub fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    pub fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// Echo service that sleeps for `work` while registered in its tracker.
#[derive(Clone)]
pub struct Sleepy {
    tracker: InFlight,
    work: Duration,
}

impl Sleepy {
    pub fn new(tracker: InFlight, work: Duration) -> Self {
        Self { tracker, work }
    }
}

impl tower::Service<u32> for Sleepy {
    type Response = u32;
    type Error = ServerError;
    type Future = BoxFuture<'static, Result<u32, ServerError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: u32) -> Self::Future {
        let tracker = self.tracker.clone();
        let work = self.work;
        Box::pin(async move {
            tracker.enter();
            tokio::time::sleep(work).await;
            tracker.exit();
            Ok(req)
        })
    }
}
