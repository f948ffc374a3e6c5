//! # Listeners: the code that reacts to emitted events.
//!
//! This module provides the [`Listen`] trait, a closure adapter, and the
//! [`Owner`] tag used for bulk removal.
//!
//! ## Architecture
//! ```text
//! emit("login", args)
//!     │
//!     ├──► handler slot ──────────► Job ──► Dispatcher ──► handler.on_event()
//!     ├──► ordinary listeners ────► Job ──► Dispatcher ──► listener.on_event()
//!     └──► once listeners (drained) ► Job ──► Dispatcher ──► listener.on_event()
//! ```
//!
//! ## Listener types
//! - **Trait implementors** - any `struct` implementing [`Listen`]
//! - **Closures** - [`ListenerFn`] wraps `Fn(Event) -> impl Future`
//! - **LogListener** - tracing recorder (feature `logging`)

mod listener;
mod listener_fn;
#[cfg(feature = "logging")]
mod log;
mod owner;

pub(crate) use listener::same_listener;
pub use listener::{Listen, ListenerRef};
pub use listener_fn::ListenerFn;
#[cfg(feature = "logging")]
pub use log::LogListener;
pub use owner::Owner;
