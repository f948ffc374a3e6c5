//! # Listener trait.
//!
//! Provides [`Listen`], the extension point for code that reacts to named events.
//!
//! Each invocation:
//! - runs **deferred**, on the dispatcher, never inside `emit`
//! - is an **independent unit of work** (a panic affects only that invocation)
//! - runs in registration order relative to other listeners of the same emission
//!
//! ## Identity
//! Listeners are handled as [`ListenerRef`] (`Arc<dyn Listen>`). Removal matches by
//! **reference identity**: two handles are the same listener only if they point to
//! the same allocation. Keep a clone of the handle you registered to remove it later.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use eventvisor::{Event, Listen};
//!
//! struct Audit;
//!
//! #[async_trait]
//! impl Listen for Audit {
//!     async fn on_event(&self, ev: &Event) {
//!         let _ = ev.name(); // write to audit log, etc.
//!     }
//!
//!     fn name(&self) -> &str { "audit" }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::events::Event;

/// Shared listener handle; identity is the pointed-to allocation.
pub type ListenerRef = Arc<dyn Listen>;

/// Event listener.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor (invocations run one after another).
/// - Handle errors internally; a panic is caught and logged, nothing else.
#[async_trait]
pub trait Listen: Send + Sync + 'static {
    /// Handles one emission.
    ///
    /// Called from the dispatcher, not from the `emit` call site.
    async fn on_event(&self, event: &Event);

    /// Returns the listener name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// True if both handles refer to the same listener allocation.
#[inline]
pub(crate) fn same_listener(a: &ListenerRef, b: &ListenerRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
