//! Randomized delay and failure injection for the delay server.
//!
//! [`DelayService`] is a Tower service taking [`DelayParams`] read from a
//! request's query string. Each call runs the same linear sequence:
//!
//! 1. **Validate** the bounds. A violation ends the call immediately with
//!    [`ServerError::Validation`](delay_server_core::ServerError::Validation);
//!    no delay is applied.
//! 2. **Delay** for a duration drawn uniformly from `[min, max]`
//!    milliseconds, both ends included.
//! 3. **Decide** the outcome: with a failure chance of `N > 0`, one call in
//!    `N` (on average) ends with
//!    [`ServerError::MockFailure`](delay_server_core::ServerError::MockFailure).
//!    Everything else gets [`WELCOME_PAGE`].
//!
//! # Example
//!
//! ```rust
//! use delay_server_handler::{DelayConfig, DelayParams, WELCOME_PAGE};
//! use tower::ServiceExt;
//!
//! # async fn example() {
//! let handler = DelayConfig::builder()
//!     .name("delay")
//!     .seed(42)
//!     .build();
//!
//! let params = DelayParams::from_pairs([("min", "10"), ("max", "10")]);
//! let page = handler.oneshot(params).await.unwrap();
//! assert_eq!(page, WELCOME_PAGE);
//! # }
//! ```
//!
//! # Deterministic draws
//!
//! Give the builder a seed, or a [`SharedRng`] shared with other handlers,
//! to make the drawn delays and outcomes reproducible.

pub mod config;
pub mod events;
pub mod params;
pub mod rng;
pub mod service;

pub use config::{DelayConfig, DelayConfigBuilder};
pub use events::DelayEvent;
pub use params::{DelayParams, ValidatedDelay};
pub use rng::{Draw, SharedRng};
pub use service::{DelayService, WELCOME_PAGE};
