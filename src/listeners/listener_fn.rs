//! # Function-backed listener (`ListenerFn`)
//!
//! [`ListenerFn`] wraps a closure `F: Fn(Event) -> Fut`, producing a fresh
//! future per invocation. The closure receives its own clone of the [`Event`]
//! (cheap: name and arguments are shared), so the future owns everything it needs.
//!
//! ## Example
//! ```rust
//! use eventvisor::{Event, ListenerFn, ListenerRef};
//!
//! let l: ListenerRef = ListenerFn::arc("greeter", |ev: Event| async move {
//!     println!("hello from {}", ev.name());
//! });
//!
//! assert_eq!(l.name(), "greeter");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::events::Event;
use crate::listeners::listener::Listen;

/// Function-backed listener implementation.
pub struct ListenerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ListenerFn<F> {
    /// Creates a new function-backed listener.
    ///
    /// Prefer [`ListenerFn::arc`] when you immediately need a [`ListenerRef`](crate::ListenerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the listener and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<F> std::fmt::Debug for ListenerFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerFn").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<F, Fut> Listen for ListenerFn<F>
where
    F: Fn(Event) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn on_event(&self, event: &Event) {
        (self.f)(event.clone()).await;
    }

    fn name(&self) -> &str {
        &self.name
    }
}
