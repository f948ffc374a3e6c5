//! # EventEmitter: named events, deferred fan-out.
//!
//! The [`EventEmitter`] owns one private listener registry and a scheduler.
//! `emit` captures the listeners registered at call time and hands one job per
//! listener to the scheduler; no listener ever runs inside `emit`.
//!
//! ## Emit algorithm
//! ```text
//! emit(event, args)
//!   1. event == error_event && no listeners && no handler ──► Err(EmitError)
//!   2. handler slot for event?            ──► schedule(handler)
//!   3. ordinary listeners (snapshot)      ──► schedule(l1) .. schedule(lN)
//!   4. once listeners (drained from map)  ──► schedule(o1) .. schedule(oM)
//!   return Ok(&self)
//! ```
//!
//! ## Rules
//! - **Snapshot**: listeners added while this emission is being delivered wait for the next `emit`.
//! - **Once**: a once listener is removed from the registry before its invocation is scheduled,
//!   so re-entrant emits of the same event cannot fire it again.
//! - **No retraction**: `off` after `emit` does not cancel invocations already scheduled.
//! - **Isolation**: each invocation is its own job; a panic affects only that job.
//!
//! ## Example
//! ```rust
//! use serde_json::json;
//! use eventvisor::{Event, EventEmitter, Filter, ListenerFn, ListenerRef};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), eventvisor::EmitError> {
//!     let emitter = EventEmitter::new();
//!
//!     let greet: ListenerRef = ListenerFn::arc("greet", |ev: Event| async move {
//!         println!("welcome {}", ev.value(0).unwrap_or(&json!(null)));
//!     });
//!
//!     emitter
//!         .on("login", greet.clone())
//!         .emit("login", json!("alice"))?
//!         .off(Filter::by_listener(&greet));
//!
//!     emitter.flush().await;
//!     Ok(())
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::core::Config;
use crate::dispatch::{Job, Schedule};
use crate::error::EmitError;
use crate::events::{stamp, Args, Event};
use crate::listeners::{ListenerRef, Owner};

use super::builder::EmitterBuilder;
use super::filter::Filter;
use super::registry::{Registry, Subscription};

/// Mutable emitter state, guarded by one lock.
#[derive(Default)]
struct State {
    registry: Registry,
    /// Fallback handler per event (at most one each).
    handlers: HashMap<Arc<str>, ListenerRef>,
    /// Events already reported as over `max_listeners`.
    warned: HashSet<Arc<str>>,
}

/// In-process publish/subscribe primitive.
///
/// All operations take `&self`, so listeners holding an `Arc`/`Weak` to the
/// emitter may register, remove and emit from inside their own invocation.
/// Registry mutations are atomic with respect to each other; the lock is never
/// held while a listener runs.
pub struct EventEmitter {
    state: Mutex<State>,
    scheduler: Arc<dyn Schedule>,
    cfg: Config,
}

impl EventEmitter {
    /// Creates an emitter with default [`Config`] and the built-in dispatcher.
    ///
    /// ### Panics
    /// Panics outside a tokio runtime; use [`EventEmitter::builder`] with a custom
    /// scheduler to avoid the dependency.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an emitter with the given config and the built-in dispatcher.
    #[must_use]
    pub fn with_config(cfg: Config) -> Self {
        EmitterBuilder::new(cfg).build()
    }

    /// Returns a builder to plug in a custom [`Schedule`] implementation.
    pub fn builder(cfg: Config) -> EmitterBuilder {
        EmitterBuilder::new(cfg)
    }

    pub(crate) fn from_parts(cfg: Config, scheduler: Arc<dyn Schedule>) -> Self {
        Self {
            state: Mutex::new(State::default()),
            scheduler,
            cfg,
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // Listeners never run under this lock, so a poisoned guard still holds consistent data.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ---- Registration ----

    /// Registers `listener` for every future emission of `event`.
    pub fn on(&self, event: &str, listener: ListenerRef) -> &Self {
        self.subscribe(event, listener, None, false)
    }

    /// Like [`on`](Self::on), tagged with `owner` for bulk removal.
    pub fn on_owned(&self, event: &str, listener: ListenerRef, owner: &Owner) -> &Self {
        self.subscribe(event, listener, Some(owner.clone()), false)
    }

    /// Registers `listener` for the next emission of `event` only.
    ///
    /// The registration can be cancelled with `off` until that emission happens.
    pub fn once(&self, event: &str, listener: ListenerRef) -> &Self {
        self.subscribe(event, listener, None, true)
    }

    /// Like [`once`](Self::once), tagged with `owner` for bulk removal.
    pub fn once_owned(&self, event: &str, listener: ListenerRef, owner: &Owner) -> &Self {
        self.subscribe(event, listener, Some(owner.clone()), true)
    }

    fn subscribe(&self, event: &str, listener: ListenerRef, owner: Option<Owner>, once: bool) -> &Self {
        let name = listener.name().to_owned();
        let mut state = self.state();
        let count = state.registry.insert(
            event,
            Subscription {
                listener,
                owner,
                once,
            },
        );
        tracing::trace!(event = %event, listener = %name, once, count, "listener registered");

        if let Some(limit) = self.cfg.listener_limit() {
            if count > limit && state.warned.insert(Arc::from(event)) {
                tracing::warn!(
                    event = %event,
                    count,
                    limit,
                    "possible listener leak: listener count exceeds max_listeners"
                );
            }
        }
        self
    }

    /// Removes every subscription matching `filter`.
    ///
    /// Removing nothing is a no-op. Already scheduled invocations still run.
    /// An event that falls back to `max_listeners` or below may warn again later.
    pub fn off(&self, filter: Filter) -> &Self {
        let mut state = self.state();
        let removed = state.registry.remove(&filter);
        let State { registry, warned, .. } = &mut *state;
        match self.cfg.listener_limit() {
            Some(limit) => warned.retain(|event| registry.len(event) > limit),
            None => warned.clear(),
        }
        drop(state);
        tracing::trace!(filter = ?filter, removed, "listeners removed");
        self
    }

    /// Installs the fallback handler for `event`, replacing any previous one.
    ///
    /// The handler is scheduled before ordinary listeners on every emission of `event`.
    /// A handler for the error event prevents escalation.
    pub fn set_handler(&self, event: &str, handler: ListenerRef) -> &Self {
        self.state().handlers.insert(Arc::from(event), handler);
        self
    }

    /// Removes the fallback handler for `event`, if any.
    pub fn clear_handler(&self, event: &str) -> &Self {
        self.state().handlers.remove(event);
        self
    }

    pub fn has_handler(&self, event: &str) -> bool {
        self.state().handlers.contains_key(event)
    }

    // ---- Emission ----

    /// Schedules every listener of `event` with `args`.
    ///
    /// ### Errors
    /// Returns [`EmitError`] when `event` is the configured error event and it has
    /// no listener and no fallback handler. Every other event is a silent no-op
    /// without listeners.
    pub fn emit(&self, event: &str, args: impl Into<Args>) -> Result<&Self, EmitError> {
        let args = args.into();

        let (handler, dispatch) = {
            let mut state = self.state();
            let handler = state.handlers.get(event).cloned();

            if event == self.cfg.error_event && handler.is_none() && !state.registry.contains(event) {
                drop(state);
                let err = EmitError::unhandled(args.into_vec());
                tracing::warn!(event = %event, error = %err, "unhandled error event");
                return Err(err);
            }

            (handler, state.registry.take_dispatch(event))
        };

        if handler.is_none() && dispatch.is_none() {
            return Ok(self);
        }

        let ev = Event::new(event, args);
        if let Some(handler) = &handler {
            self.submit(handler, &ev);
        }
        if let Some(dispatch) = dispatch {
            for listener in dispatch.ordinary.iter().chain(dispatch.once.iter()) {
                self.submit(listener, &ev);
            }
        }
        Ok(self)
    }

    /// Emits `payload` decorated with `type` and `timestamp`.
    ///
    /// Non-object payloads are wrapped as `{"data": payload}`. A truthy `timeStamp`,
    /// then a truthy `timestamp`, is kept as the stamp (`0`, `""`, `false` and `null`
    /// count as missing), otherwise the current Unix time in milliseconds is used;
    /// all listeners see the same object.
    pub fn emit_event(&self, event: &str, payload: Value) -> Result<&Self, EmitError> {
        let decorated = stamp::decorate(event, payload, stamp::now_ms());
        self.emit(event, decorated)
    }

    fn submit(&self, listener: &ListenerRef, ev: &Event) {
        let l = Arc::clone(listener);
        let ev = ev.clone();
        self.scheduler.schedule(Job::new(listener.name(), async move {
            l.on_event(&ev).await;
        }));
    }

    // ---- Introspection / lifecycle ----

    /// Number of listeners (ordinary and once) currently registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.state().registry.len(event)
    }

    /// Sorted names of events with at least one listener.
    pub fn event_names(&self) -> Vec<String> {
        self.state().registry.event_names()
    }

    /// True if no event has listeners (fallback handlers are not counted).
    pub fn is_empty(&self) -> bool {
        self.state().registry.is_empty()
    }

    /// Waits until every invocation scheduled before this call has finished.
    ///
    /// Awaiting this from inside a listener never resolves: the listener would wait on itself.
    pub async fn flush(&self) {
        self.scheduler.flush().await;
    }

    /// Drops all listeners and handlers and stops the scheduler.
    ///
    /// Invocations not yet started are discarded; the emitter stays usable for
    /// registration, but nothing will be delivered.
    pub fn close(&self) {
        {
            let mut state = self.state();
            state.registry.remove(&Filter::All);
            state.handlers.clear();
            state.warned.clear();
        }
        self.scheduler.close();
        tracing::debug!("emitter closed");
    }
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("events", &self.event_names())
            .field("config", &self.cfg)
            .finish_non_exhaustive()
    }
}

impl Default for EventEmitter {
    /// Same as [`EventEmitter::new`]; requires a tokio runtime.
    fn default() -> Self {
        Self::new()
    }
}
