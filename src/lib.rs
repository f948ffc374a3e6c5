//! # eventvisor
//!
//! **Eventvisor** is a minimal in-process publish/subscribe primitive for Rust.
//!
//! Independent parts of a program register interest in **named events**; when an
//! event is emitted, every registered listener is invoked **later**, on a tokio
//! dispatcher, in registration order. `emit` itself never runs listener code.
//!
//! ## Architecture
//! ```text
//!  on / once / off ──────────► EventEmitter ◄─────────── emit / emit_event
//!                              ┌───────────────────────────┐
//!                              │ Registry (private)        │
//!                              │  "login" ─► ordinary [..] │
//!                              │           └► once     [..] │
//!                              │ Handlers (fallback slots) │
//!                              └─────────────┬─────────────┘
//!                                            │ snapshot + drain once
//!                                            ▼
//!                                  Schedule::schedule(Job)
//!                                            │
//!                                            ▼
//!                             ┌──────────────────────────────┐
//!                             │ Dispatcher (tokio worker)    │
//!                             │ FIFO start ─► task per job   │
//!                             └──────────────┬───────────────┘
//!                                ┌───────────┼───────────┐
//!                                ▼           ▼           ▼
//!                           handler.on  l1.on_event  once.on_event
//!                             _event()
//! ```
//!
//! ## Features
//! | Area              | Description                                                | Key types / traits                   |
//! |-------------------|------------------------------------------------------------|--------------------------------------|
//! | **Emitter**       | Register, remove, emit; fallback handler slots             | [`EventEmitter`]                     |
//! | **Listeners**     | Async listeners as trait objects or closures               | [`Listen`], [`ListenerFn`]           |
//! | **Removal**       | Typed removal filters, bulk removal by owner tag           | [`Filter`], [`Owner`]                |
//! | **Payloads**      | JSON values or error values as arguments                   | [`Args`], [`Arg`], [`Event`]         |
//! | **Dispatch**      | Pluggable deferred scheduler, tokio implementation         | [`Schedule`], [`Dispatcher`]         |
//! | **Errors**        | Unhandled error events surface to the caller               | [`EmitError`]                        |
//! | **Configuration** | Leak warning threshold, error event name                   | [`Config`]                           |
//!
//! ## Optional features
//! - `logging`: exports [`LogListener`], a tracing-backed event recorder _(demo/debug)_.
//!
//! ## Example
//! ```rust
//! use serde_json::json;
//! use eventvisor::{Event, EventEmitter, ListenerFn, ListenerRef};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let emitter = EventEmitter::new();
//!
//!     let on_login: ListenerRef = ListenerFn::arc("on-login", |ev: Event| async move {
//!         println!("login: {:?}", ev.value(0));
//!     });
//!
//!     emitter.once("login", on_login);
//!     emitter.emit("login", json!("alice"))?;
//!     emitter.emit("login", json!("bob"))?;   // nobody listens any more
//!
//!     // Unhandled error events are returned to the caller.
//!     assert!(emitter.emit("error", json!("lost")).is_err());
//!
//!     emitter.flush().await;
//!     Ok(())
//! }
//! ```
mod core;
mod dispatch;
mod error;
mod events;
mod listeners;

// ---- Public re-exports ----

pub use core::{Config, EmitterBuilder, EventEmitter, Filter};
pub use dispatch::{Dispatcher, Job, Schedule};
pub use error::EmitError;
pub use events::{Arg, Args, ErrorRef, Event};
pub use listeners::{Listen, ListenerFn, ListenerRef, Owner};

// Optional: expose a simple tracing-backed listener (demo/debug).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::LogListener;
