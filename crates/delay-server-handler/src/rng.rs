//! Shared random source for delay and outcome draws.

use crate::params::ValidatedDelay;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// A seedable random generator shared by every clone of a handler.
///
/// Draws from concurrently running requests are serialized by a mutex that
/// is held only for the draw itself, never across an await point.
#[derive(Clone)]
pub struct SharedRng {
    inner: Arc<Mutex<StdRng>>,
}

impl SharedRng {
    /// Creates a deterministic generator. Same seed, same sequence of draws.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Creates a generator seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    fn new(rng: StdRng) -> Self {
        Self {
            inner: Arc::new(Mutex::new(rng)),
        }
    }

    /// Draws the delay and the outcome for one request.
    ///
    /// The delay is uniform over `[min_ms, max_ms]`, both ends included. The
    /// request fails when a uniform draw over `[0, failure_chance)` lands on
    /// zero; with failures disabled no outcome draw is made.
    pub fn draw(&self, delay: &ValidatedDelay) -> Draw {
        // A panic while holding the lock cannot leave StdRng half-updated.
        let mut rng = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        let delay_ms = rng.random_range(delay.min_ms()..=delay.max_ms());
        let fail = match delay.failure_chance() {
            Some(chance) => rng.random_range(0..chance) == 0,
            None => false,
        };

        Draw {
            delay: Duration::from_millis(delay_ms),
            fail,
        }
    }
}

impl fmt::Debug for SharedRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedRng").finish_non_exhaustive()
    }
}

/// Outcome of one [`SharedRng::draw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    /// How long to suspend the request.
    pub delay: Duration,
    /// Whether the request ends with a simulated failure.
    pub fail: bool,
}
