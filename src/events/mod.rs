//! Emission data: what goes into `emit` and what listeners receive.
//!
//! ## Contents
//! - [`Arg`], [`Args`] emitted arguments (JSON values or error values)
//! - [`Event`] one emission as delivered to a listener
//! - `stamp` payload decoration used by `emit_event`

mod event;
pub(crate) mod stamp;

pub use event::{Arg, Args, ErrorRef, Event};
