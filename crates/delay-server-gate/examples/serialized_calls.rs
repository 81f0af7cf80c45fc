use delay_server_gate::{AdmissionConfig, AdmissionError};
use std::time::{Duration, Instant};
use tower::{Layer, ServiceExt};

#[tokio::main]
async fn main() {
    println!("Admission gate example\n");

    let layer = AdmissionConfig::builder()
        .max_clients(1)
        .name("single-slot")
        .on_call_queued(|max| println!("  gate full ({} slot), waiting", max))
        .on_call_released(|held_for| println!("  slot released after {:?}", held_for))
        .build();

    let service = layer.layer(tower::service_fn(|req: u32| async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        Ok::<_, AdmissionError>(format!("request {} done", req))
    }));

    let start = Instant::now();
    let handles: Vec<_> = (1..=3)
        .map(|i| tokio::spawn(service.clone().oneshot(i)))
        .collect();

    for handle in handles {
        match handle.await {
            Ok(Ok(response)) => println!("{}", response),
            Ok(Err(e)) => println!("Error: {}", e),
            Err(e) => println!("Task failed: {}", e),
        }
    }

    // Three 200ms calls through one slot take at least 600ms.
    println!("\nAll requests completed in {:?}", start.elapsed());
}
