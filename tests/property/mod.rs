//! Property-based tests for the delay server.
//!
//! Run with: cargo test --test property_tests

pub mod gate;
