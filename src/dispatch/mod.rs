//! Deferred dispatch: how listener invocations leave the `emit` call.
//!
//! ## Contents
//! - [`Schedule`] the host capability ("run after the current call, in order")
//! - [`Job`] one labelled listener invocation
//! - [`Dispatcher`] tokio worker implementing [`Schedule`]

mod dispatcher;
mod schedule;

pub use dispatcher::Dispatcher;
pub use schedule::{Job, Schedule};
