//! Emitter core: registry, removal filters, and the emit algorithm.
//!
//! The only public types from this module are [`EventEmitter`], its builder,
//! [`Config`] and [`Filter`].
//!
//! Internal modules:
//! - [`registry`]: event name → ordered ordinary/once subscriptions;
//! - [`filter`]: which subscriptions `off` removes;
//! - [`emitter`]: on/once/off/emit and the fallback handler slots;
//! - [`builder`]: wiring of config and scheduler.

mod builder;
mod config;
mod emitter;
mod filter;
mod registry;

pub use builder::EmitterBuilder;
pub use config::Config;
pub use emitter::EventEmitter;
pub use filter::Filter;
