//! Error types used by the emitter.
//!
//! The emitter swallows almost everything: malformed registrations, removals
//! that match nothing, and listener panics never surface to the caller.
//! The single exception is an **unhandled error event**, reported as [`EmitError`].
//!
//! [`EmitError`] provides helper methods (`as_label`, `as_message`) for logging/metrics.

use thiserror::Error;

use crate::events::{Arg, ErrorRef};

/// # Errors produced by [`EventEmitter::emit`](crate::EventEmitter::emit).
///
/// Returned synchronously when the error event is emitted while nothing is
/// registered to receive it (no listener, no fallback handler).
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum EmitError {
    /// The first emitted argument was already an error value; it is passed through as-is.
    #[error("unhandled error event: {error}")]
    Unhandled {
        /// The error value carried by the emission.
        error: ErrorRef,
    },

    /// No argument was an error value; the whole argument list is wrapped instead.
    #[error("unhandled error event with arguments {args:?}")]
    UnhandledArgs {
        /// The arguments passed to `emit`.
        args: Vec<Arg>,
    },
}

impl EmitError {
    /// Builds the escalation error for an unhandled error event.
    ///
    /// Uses the first argument when it is an error value, otherwise wraps all of them.
    pub(crate) fn unhandled(args: Vec<Arg>) -> Self {
        match args.first() {
            Some(Arg::Error(error)) => EmitError::Unhandled {
                error: ErrorRef::clone(error),
            },
            _ => EmitError::UnhandledArgs { args },
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventvisor::EventEmitter;
    /// use eventvisor::EmitError;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let emitter = EventEmitter::new();
    /// let err = emitter.emit("error", ()).unwrap_err();
    /// assert_eq!(err.as_label(), "emit_unhandled_args");
    /// # }
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EmitError::Unhandled { .. } => "emit_unhandled_error",
            EmitError::UnhandledArgs { .. } => "emit_unhandled_args",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            EmitError::Unhandled { error } => format!("unhandled: {error}"),
            EmitError::UnhandledArgs { args } => {
                let rendered: Vec<String> = args.iter().map(ToString::to_string).collect();
                format!("unhandled: [{}]", rendered.join(", "))
            }
        }
    }

    /// Returns the carried error value, if the emission had one.
    pub fn error(&self) -> Option<&ErrorRef> {
        match self {
            EmitError::Unhandled { error } => Some(error),
            EmitError::UnhandledArgs { .. } => None,
        }
    }
}
