//! Admission gate stress tests

use delay_server_core::ServerError;
use delay_server_gate::AdmissionLayer;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tower::{Layer, Service, ServiceExt};

use super::ConcurrencyTracker;

/// Test: thousands of callers waiting on a small gate
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
#[ignore]
async fn stress_large_queue() {
    let tracker = ConcurrencyTracker::new();
    let tracker_clone = Arc::clone(&tracker);
    let processed = Arc::new(AtomicUsize::new(0));
    let processed_clone = Arc::clone(&processed);

    let svc = tower::service_fn(move |_req: u32| {
        let tracker = Arc::clone(&tracker_clone);
        let processed = Arc::clone(&processed_clone);
        async move {
            tracker.enter();
            sleep(Duration::from_millis(1)).await;
            processed.fetch_add(1, Ordering::Relaxed);
            tracker.exit();
            Ok::<_, ServerError>(())
        }
    });

    let layer = AdmissionLayer::builder().max_clients(10).build();
    let service = layer.layer(svc);

    let start = Instant::now();
    let mut handles = vec![];
    for i in 0..5_000 {
        let mut svc = service.clone();
        handles.push(tokio::spawn(async move {
            svc.ready().await.unwrap().call(i).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    let elapsed = start.elapsed();

    println!("5000 calls through 10 slots in {:?}", elapsed);
    assert_eq!(processed.load(Ordering::Relaxed), 5_000);
    assert!(tracker.peak() <= 10);
    assert_eq!(tracker.current(), 0);
    assert_eq!(layer.available_slots(), 10);
}

/// Test: callers abandoning their calls at random points leave no slot behind
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
#[ignore]
async fn stress_abandoned_calls() {
    let layer = AdmissionLayer::builder().max_clients(4).build();
    let service = layer.layer(tower::service_fn(|req: u64| async move {
        sleep(Duration::from_millis(req % 7)).await;
        if req % 5 == 0 {
            Err(ServerError::MockFailure)
        } else {
            Ok(())
        }
    }));

    let mut handles = vec![];
    for i in 0..2_000u64 {
        let svc = service.clone();
        handles.push(tokio::spawn(async move {
            let budget = Duration::from_millis(i % 11);
            let _ = tokio::time::timeout(budget, svc.oneshot(i)).await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(layer.available_slots(), 4);
}
