//! # Emitter configuration.
//!
//! Provides [`Config`] centralized settings for an [`EventEmitter`](crate::EventEmitter).
//!
//! ## Sentinel values
//! - `max_listeners = 0` → no listener-count warning

use std::borrow::Cow;

/// Configuration for one emitter instance.
///
/// ## Field semantics
/// - `max_listeners`: Per-event count above which a leak warning is logged once (`0` = off)
/// - `error_event`: Event name that escalates when emitted with nobody listening
///
/// ## Notes
/// All fields are public for flexibility. Prefer using helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Listener count per event that triggers a one-time leak warning.
    ///
    /// Registration always succeeds; this is diagnostics only.
    pub max_listeners: usize,

    /// Name of the event that is raised back to the caller when unhandled.
    pub error_event: Cow<'static, str>,
}

impl Config {
    /// Returns the leak-warning threshold as an `Option`.
    #[inline]
    pub fn listener_limit(&self) -> Option<usize> {
        if self.max_listeners == 0 {
            None
        } else {
            Some(self.max_listeners)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `max_listeners = 0` (no warning)
    /// - `error_event = "error"`
    fn default() -> Self {
        Self {
            max_listeners: 0,
            error_event: Cow::Borrowed("error"),
        }
    }
}
