//! # Removal filters for `EventEmitter::off`.
//!
//! A [`Filter`] says which subscriptions to drop. Listener and owner keys match
//! by **identity**, never by value. Every key present must match (conjunctive):
//!
//! | filter                     | removes                                       |
//! |----------------------------|-----------------------------------------------|
//! | `all()`                    | everything                                    |
//! | `by_event(e)`              | all listeners of `e` (ordinary and once)      |
//! | `by_listener(l)`           | `l` on every event                            |
//! | `by_owner(o)`              | everything registered with owner `o`          |
//! | `by_event_and_listener`    | `l` on `e` only                               |
//! | `by_event_and_owner`       | owner `o`'s listeners on `e` only             |
//! | `by_listener_and_owner`    | `l` registered with owner `o`, any event      |
//! | `exact(e, l, o)`           | the exact triple                              |

use std::fmt;
use std::sync::Arc;

use crate::listeners::{same_listener, ListenerRef, Owner};

use super::registry::Subscription;

/// Which subscriptions to remove.
#[derive(Clone)]
pub enum Filter {
    All,
    Event(Arc<str>),
    Listener(ListenerRef),
    Owner(Owner),
    EventListener(Arc<str>, ListenerRef),
    EventOwner(Arc<str>, Owner),
    ListenerOwner(ListenerRef, Owner),
    Exact(Arc<str>, ListenerRef, Owner),
}

impl Filter {
    #[inline]
    pub fn all() -> Self {
        Filter::All
    }

    #[inline]
    pub fn by_event(event: impl Into<Arc<str>>) -> Self {
        Filter::Event(event.into())
    }

    #[inline]
    pub fn by_listener(listener: &ListenerRef) -> Self {
        Filter::Listener(Arc::clone(listener))
    }

    #[inline]
    pub fn by_owner(owner: &Owner) -> Self {
        Filter::Owner(owner.clone())
    }

    #[inline]
    pub fn by_event_and_listener(event: impl Into<Arc<str>>, listener: &ListenerRef) -> Self {
        Filter::EventListener(event.into(), Arc::clone(listener))
    }

    #[inline]
    pub fn by_event_and_owner(event: impl Into<Arc<str>>, owner: &Owner) -> Self {
        Filter::EventOwner(event.into(), owner.clone())
    }

    #[inline]
    pub fn by_listener_and_owner(listener: &ListenerRef, owner: &Owner) -> Self {
        Filter::ListenerOwner(Arc::clone(listener), owner.clone())
    }

    #[inline]
    pub fn exact(event: impl Into<Arc<str>>, listener: &ListenerRef, owner: &Owner) -> Self {
        Filter::Exact(event.into(), Arc::clone(listener), owner.clone())
    }

    /// Event the filter is scoped to; `None` means every event.
    pub(crate) fn event(&self) -> Option<&str> {
        match self {
            Filter::Event(e)
            | Filter::EventListener(e, _)
            | Filter::EventOwner(e, _)
            | Filter::Exact(e, _, _) => Some(e),
            Filter::All | Filter::Listener(_) | Filter::Owner(_) | Filter::ListenerOwner(..) => None,
        }
    }

    /// Whether `sub` matches the listener/owner keys (event scope is checked by the registry).
    pub(crate) fn matches(&self, sub: &Subscription) -> bool {
        let listener = |l: &ListenerRef| same_listener(&sub.listener, l);
        let owner = |o: &Owner| sub.owner.as_ref() == Some(o);

        match self {
            Filter::All | Filter::Event(_) => true,
            Filter::Listener(l) | Filter::EventListener(_, l) => listener(l),
            Filter::Owner(o) | Filter::EventOwner(_, o) => owner(o),
            Filter::ListenerOwner(l, o) | Filter::Exact(_, l, o) => listener(l) && owner(o),
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("All"),
            Filter::Event(e) => f.debug_tuple("Event").field(e).finish(),
            Filter::Listener(l) => f.debug_tuple("Listener").field(&l.name()).finish(),
            Filter::Owner(o) => f.debug_tuple("Owner").field(o).finish(),
            Filter::EventListener(e, l) => {
                f.debug_tuple("EventListener").field(e).field(&l.name()).finish()
            }
            Filter::EventOwner(e, o) => f.debug_tuple("EventOwner").field(e).field(o).finish(),
            Filter::ListenerOwner(l, o) => {
                f.debug_tuple("ListenerOwner").field(&l.name()).field(o).finish()
            }
            Filter::Exact(e, l, o) => f
                .debug_tuple("Exact")
                .field(e)
                .field(&l.name())
                .field(o)
                .finish(),
        }
    }
}
