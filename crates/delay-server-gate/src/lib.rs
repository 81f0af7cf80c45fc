//! Admission gate for Tower services.
//!
//! Bounds how many calls to the wrapped service execute at the same time.
//! Calls beyond the limit are not rejected: they wait, holding their
//! connection open, until an admitted call finishes and frees its slot.
//! Waiters are admitted in arrival order.
//!
//! # Basic Example
//!
//! ```rust
//! use tower::ServiceBuilder;
//! use delay_server_gate::{AdmissionConfig, AdmissionError};
//!
//! # async fn example() {
//! // Only one call runs at a time; the rest queue up
//! let layer = AdmissionConfig::builder()
//!     .max_clients(1)
//!     .name("single-file")
//!     .build();
//!
//! let service = ServiceBuilder::new()
//!     .layer(layer)
//!     .service_fn(|req: String| async move {
//!         Ok::<_, AdmissionError>(req)
//!     });
//! # }
//! ```
//!
//! # Observing the gate
//!
//! ```rust
//! use delay_server_gate::AdmissionConfig;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let queued = Arc::new(AtomicUsize::new(0));
//! let q = Arc::clone(&queued);
//!
//! let layer = AdmissionConfig::builder()
//!     .max_clients(2)
//!     .on_call_queued(move |_| {
//!         q.fetch_add(1, Ordering::SeqCst);
//!     })
//!     .on_call_admitted(|in_flight| println!("{} in flight", in_flight))
//!     .build();
//! ```
//!
//! # Error Handling
//!
//! The wrapped service's error type must be constructible from
//! [`AdmissionError`]. The only admission failure is a closed gate; the
//! inner service's own errors pass through untouched.

pub mod config;
pub mod error;
pub mod events;
pub mod layer;
pub mod service;

pub use config::{AdmissionConfig, AdmissionConfigBuilder};
pub use error::{AdmissionError, Result};
pub use events::AdmissionEvent;
pub use layer::AdmissionLayer;
pub use service::Admission;
