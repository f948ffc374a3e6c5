//! # Owner tags for bulk removal.
//!
//! An [`Owner`] is attached to subscriptions by the code that registers them
//! (`on_owned` / `once_owned`) so that everything it registered can later be
//! removed in one call with [`Filter::by_owner`](crate::Filter::by_owner).
//!
//! Owners confer no ownership over listeners. Equality is **identity**: clones of
//! one `Owner` are equal, two owners created separately are not, even with the
//! same label.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
struct OwnerTag {
    label: Cow<'static, str>,
}

/// Identity tag grouping subscriptions registered by one component.
#[derive(Clone)]
pub struct Owner(Arc<OwnerTag>);

impl Owner {
    /// Creates a new, distinct owner. The label is for diagnostics only.
    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Self(Arc::new(OwnerTag {
            label: label.into(),
        }))
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.0.label
    }
}

impl PartialEq for Owner {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Owner {}

impl fmt::Debug for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Owner({:?}@{:p})", self.0.label, Arc::as_ptr(&self.0))
    }
}
