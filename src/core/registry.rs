//! # Listener registry.
//!
//! Maps an event name to its subscriptions, kept in two ordered sequences:
//! ordinary listeners and once listeners.
//!
//! ## Architecture
//! ```text
//! HashMap<event, Slot>
//!                 ├─ ordinary: [sub, sub, ...]   (snapshotted by emit)
//!                 └─ once:     [sub, sub, ...]   (drained by emit)
//! ```
//!
//! ## Rules
//! - Insertion order is dispatch order.
//! - A slot with no subscriptions is removed immediately: observed from outside,
//!   every present event has at least one listener.
//! - Removal is by [`Filter`]; removing nothing is a no-op.

use std::collections::HashMap;
use std::sync::Arc;

use crate::listeners::{ListenerRef, Owner};

use super::filter::Filter;

/// One registration.
pub(crate) struct Subscription {
    pub(crate) listener: ListenerRef,
    pub(crate) owner: Option<Owner>,
    pub(crate) once: bool,
}

/// Listeners captured by one emission.
pub(crate) struct Dispatch {
    pub(crate) ordinary: Vec<ListenerRef>,
    pub(crate) once: Vec<ListenerRef>,
}

#[derive(Default)]
struct Slot {
    ordinary: Vec<Subscription>,
    once: Vec<Subscription>,
}

impl Slot {
    fn len(&self) -> usize {
        self.ordinary.len() + self.once.len()
    }

    fn is_empty(&self) -> bool {
        self.ordinary.is_empty() && self.once.is_empty()
    }

    /// Drops matching subscriptions, returns how many were dropped.
    fn remove(&mut self, filter: &Filter) -> usize {
        let before = self.len();
        self.ordinary.retain(|s| !filter.matches(s));
        self.once.retain(|s| !filter.matches(s));
        before - self.len()
    }
}

/// Event name → subscriptions.
#[derive(Default)]
pub(crate) struct Registry {
    slots: HashMap<Arc<str>, Slot>,
}

impl Registry {
    /// Appends a subscription; returns the event's listener count afterwards.
    pub(crate) fn insert(&mut self, event: &str, sub: Subscription) -> usize {
        let slot = self.slots.entry(Arc::from(event)).or_default();
        if sub.once {
            slot.once.push(sub);
        } else {
            slot.ordinary.push(sub);
        }
        slot.len()
    }

    /// Removes every subscription matching `filter`; returns the number removed.
    pub(crate) fn remove(&mut self, filter: &Filter) -> usize {
        if let Filter::All = filter {
            let removed = self.slots.values().map(Slot::len).sum();
            self.slots.clear();
            return removed;
        }

        let mut removed = 0;
        match filter.event() {
            Some(event) => {
                if let Some(slot) = self.slots.get_mut(event) {
                    removed = slot.remove(filter);
                    if slot.is_empty() {
                        self.slots.remove(event);
                    }
                }
            }
            None => {
                self.slots.retain(|_, slot| {
                    removed += slot.remove(filter);
                    !slot.is_empty()
                });
            }
        }
        removed
    }

    /// Snapshots ordinary listeners and drains once listeners of `event`.
    ///
    /// Returns `None` when nothing is registered for `event`.
    pub(crate) fn take_dispatch(&mut self, event: &str) -> Option<Dispatch> {
        let slot = self.slots.get_mut(event)?;
        let ordinary = slot.ordinary.iter().map(|s| Arc::clone(&s.listener)).collect();
        let once = std::mem::take(&mut slot.once)
            .into_iter()
            .map(|s| s.listener)
            .collect();
        if slot.is_empty() {
            self.slots.remove(event);
        }
        Some(Dispatch { ordinary, once })
    }

    #[inline]
    pub(crate) fn contains(&self, event: &str) -> bool {
        self.slots.contains_key(event)
    }

    pub(crate) fn len(&self, event: &str) -> usize {
        self.slots.get(event).map_or(0, Slot::len)
    }

    pub(crate) fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.slots.keys().map(|k| k.to_string()).collect();
        names.sort();
        names
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use crate::listeners::{same_listener, Listen};
    use async_trait::async_trait;

    struct Noop(&'static str);

    #[async_trait]
    impl Listen for Noop {
        async fn on_event(&self, _event: &Event) {}
        fn name(&self) -> &str {
            self.0
        }
    }

    fn listener(name: &'static str) -> ListenerRef {
        Arc::new(Noop(name))
    }

    fn sub(l: &ListenerRef, owner: Option<&Owner>, once: bool) -> Subscription {
        Subscription {
            listener: Arc::clone(l),
            owner: owner.cloned(),
            once,
        }
    }

    fn names(listeners: &[ListenerRef]) -> Vec<&str> {
        listeners.iter().map(|l| l.name()).collect()
    }

    #[test]
    fn test_insert_creates_slot_and_keeps_order() {
        let mut reg = Registry::default();
        let (a, b, c) = (listener("a"), listener("b"), listener("c"));

        assert!(!reg.contains("x"));
        assert_eq!(reg.insert("x", sub(&a, None, false)), 1);
        reg.insert("x", sub(&b, None, true));
        reg.insert("x", sub(&c, None, false));

        let d = reg.take_dispatch("x").expect("slot");
        assert_eq!(names(&d.ordinary), vec!["a", "c"]);
        assert_eq!(names(&d.once), vec!["b"]);
    }

    #[test]
    fn test_take_dispatch_drains_once_and_prunes() {
        let mut reg = Registry::default();
        let a = listener("a");
        reg.insert("x", sub(&a, None, true));

        assert_eq!(reg.take_dispatch("x").map(|d| d.once.len()), Some(1));
        assert!(!reg.contains("x"));
        assert!(reg.take_dispatch("x").is_none());
    }

    #[test]
    fn test_take_dispatch_keeps_ordinary() {
        let mut reg = Registry::default();
        let a = listener("a");
        reg.insert("x", sub(&a, None, false));

        reg.take_dispatch("x");
        assert_eq!(reg.len("x"), 1);
    }

    #[test]
    fn test_remove_all_is_idempotent() {
        let mut reg = Registry::default();
        let a = listener("a");
        reg.insert("x", sub(&a, None, false));
        reg.insert("y", sub(&a, None, true));

        assert_eq!(reg.remove(&Filter::all()), 2);
        assert!(reg.is_empty());
        assert_eq!(reg.remove(&Filter::all()), 0);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_remove_by_event_clears_both_sequences() {
        let mut reg = Registry::default();
        let a = listener("a");
        reg.insert("x", sub(&a, None, false));
        reg.insert("x", sub(&a, None, true));
        reg.insert("y", sub(&a, None, false));

        assert_eq!(reg.remove(&Filter::by_event("x")), 2);
        assert_eq!(reg.event_names(), vec!["y".to_string()]);
    }

    #[test]
    fn test_remove_by_listener_spans_events() {
        let mut reg = Registry::default();
        let (a, b) = (listener("a"), listener("b"));
        reg.insert("x", sub(&a, None, false));
        reg.insert("x", sub(&b, None, false));
        reg.insert("y", sub(&a, None, true));

        assert_eq!(reg.remove(&Filter::by_listener(&a)), 2);
        assert!(!reg.contains("y"));
        let d = reg.take_dispatch("x").expect("b remains");
        assert!(same_listener(&d.ordinary[0], &b));
    }

    #[test]
    fn test_remove_by_listener_uses_identity() {
        let mut reg = Registry::default();
        let a = listener("same");
        let lookalike = listener("same");
        reg.insert("x", sub(&a, None, false));

        assert_eq!(reg.remove(&Filter::by_listener(&lookalike)), 0);
        assert_eq!(reg.len("x"), 1);
    }

    #[test]
    fn test_remove_by_owner() {
        let mut reg = Registry::default();
        let (a, b) = (listener("a"), listener("b"));
        let panel = Owner::new("panel");
        reg.insert("x", sub(&a, Some(&panel), false));
        reg.insert("y", sub(&b, Some(&panel), true));
        reg.insert("y", sub(&a, None, false));

        assert_eq!(reg.remove(&Filter::by_owner(&panel)), 2);
        assert_eq!(reg.event_names(), vec!["y".to_string()]);
        assert_eq!(reg.len("y"), 1);
    }

    #[test]
    fn test_remove_event_and_listener_is_scoped() {
        let mut reg = Registry::default();
        let (f, g) = (listener("f"), listener("g"));
        reg.insert("e", sub(&f, None, false));
        reg.insert("e", sub(&g, None, false));
        reg.insert("e2", sub(&f, None, false));

        assert_eq!(reg.remove(&Filter::by_event_and_listener("e", &f)), 1);
        assert_eq!(reg.len("e"), 1);
        assert_eq!(reg.len("e2"), 1);
    }

    #[test]
    fn test_remove_event_and_owner_is_scoped() {
        let mut reg = Registry::default();
        let f = listener("f");
        let o = Owner::new("o");
        reg.insert("e", sub(&f, Some(&o), false));
        reg.insert("e2", sub(&f, Some(&o), false));

        assert_eq!(reg.remove(&Filter::by_event_and_owner("e", &o)), 1);
        assert_eq!(reg.event_names(), vec!["e2".to_string()]);
    }

    #[test]
    fn test_listener_and_owner_is_conjunctive() {
        let mut reg = Registry::default();
        let (f, g) = (listener("f"), listener("g"));
        let (o1, o2) = (Owner::new("o1"), Owner::new("o2"));
        reg.insert("e", sub(&f, Some(&o1), false));
        reg.insert("e", sub(&f, Some(&o2), false));
        reg.insert("e", sub(&g, Some(&o1), false));
        reg.insert("e", sub(&f, None, false));

        assert_eq!(reg.remove(&Filter::by_listener_and_owner(&f, &o1)), 1);
        assert_eq!(reg.len("e"), 3);
    }

    #[test]
    fn test_exact_requires_all_three() {
        let mut reg = Registry::default();
        let f = listener("f");
        let o = Owner::new("o");
        reg.insert("e", sub(&f, Some(&o), false));
        reg.insert("e", sub(&f, None, false));
        reg.insert("e2", sub(&f, Some(&o), true));

        assert_eq!(reg.remove(&Filter::exact("e", &f, &o)), 1);
        assert_eq!(reg.len("e"), 1);
        assert_eq!(reg.len("e2"), 1);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut reg = Registry::default();
        let f = listener("f");
        assert_eq!(reg.remove(&Filter::by_event("nope")), 0);
        assert_eq!(reg.remove(&Filter::by_event_and_listener("nope", &f)), 0);
        assert_eq!(reg.remove(&Filter::by_listener(&f)), 0);
        assert!(reg.is_empty());
    }
}
