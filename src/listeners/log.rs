//! # LogListener: simple event recorder
//!
//! A minimal listener that records every [`Event`] it receives through `tracing`.
//! Use it for debugging or demos; register it on the events you want to watch.
//!
//! ## Example output (with a fmt subscriber)
//! ```text
//! INFO eventvisor: event event=login seq=0 args=["alice"]
//! INFO eventvisor: event event=error seq=3 error=connection refused
//! ```

use async_trait::async_trait;

use crate::events::Event;
use crate::listeners::Listen;

/// Tracing-backed event recorder.
#[derive(Default)]
pub struct LogListener;

impl LogListener {
    /// Construct a new [`LogListener`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Listen for LogListener {
    async fn on_event(&self, e: &Event) {
        match e.error() {
            Some(err) => {
                tracing::info!(event = %e.name(), seq = e.seq, error = %err, "event");
            }
            None => {
                let args: Vec<String> = e.args().iter().map(ToString::to_string).collect();
                tracing::info!(event = %e.name(), seq = e.seq, args = ?args, "event");
            }
        }
    }

    fn name(&self) -> &str {
        "log"
    }
}
