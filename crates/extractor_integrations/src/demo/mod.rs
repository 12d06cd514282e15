//! Simulated extraction provider and document store.
//!
//! Everything here is canned sample data paced by timed delays, for running
//! the tool end to end without a real extraction service.

pub mod data;
pub mod provider;
pub mod store;

pub use provider::DemoExtractionProvider;
pub use store::DemoDocumentStore;

use std::time::Duration;

/// Sleep for `millis` scaled by `scale`. A zero scale skips the sleep.
pub(crate) async fn scaled_sleep(millis: u64, scale: f64) {
    let scaled = (millis as f64 * scale).max(0.0);
    if scaled > 0.0 {
        tokio::time::sleep(Duration::from_millis(scaled as u64)).await;
    }
}
