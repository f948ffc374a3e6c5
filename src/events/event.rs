//! # Emitted arguments and the event delivered to listeners.
//!
//! - [`Arg`] is one emitted argument: a JSON value or an error value.
//! - [`Args`] is the ordered argument list passed to `emit`.
//! - [`Event`] is what every listener receives: the event name, the shared
//!   argument list, and emission metadata.
//!
//! ## Ordering guarantees
//! Each emission gets a process-wide sequence number (`seq`) that increases
//! monotonically. All listeners notified by one `emit` call observe the same `seq`.
//!
//! ## Example
//! ```rust
//! use serde_json::json;
//! use eventvisor::{Args, Event};
//!
//! let ev = Event::new("login", Args::from(json!("alice")).with(json!({"remember": true})));
//!
//! assert_eq!(ev.name(), "login");
//! assert_eq!(ev.value(0), Some(&json!("alice")));
//! assert!(ev.error().is_none());
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use serde_json::Value;

/// Global sequence counter for emission ordering.
static EMIT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Shared handle to an error value carried as an argument.
pub type ErrorRef = Arc<dyn StdError + Send + Sync + 'static>;

/// A single emitted argument.
#[derive(Clone, Debug)]
pub enum Arg {
    /// Plain data.
    Value(Value),
    /// An error value; when first in the list of an unhandled error event it is returned as-is.
    Error(ErrorRef),
}

impl Arg {
    /// Wraps an error into an argument.
    pub fn error(error: impl StdError + Send + Sync + 'static) -> Self {
        Arg::Error(Arc::new(error))
    }

    #[inline]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Arg::Value(v) => Some(v),
            Arg::Error(_) => None,
        }
    }

    #[inline]
    pub fn as_error(&self) -> Option<&ErrorRef> {
        match self {
            Arg::Error(e) => Some(e),
            Arg::Value(_) => None,
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Arg::Error(_))
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(v) => write!(f, "{v}"),
            Arg::Error(e) => write!(f, "{e}"),
        }
    }
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        Arg::Value(v)
    }
}

impl From<ErrorRef> for Arg {
    fn from(e: ErrorRef) -> Self {
        Arg::Error(e)
    }
}

/// Ordered argument list for one emission.
///
/// Converts from `()` (no arguments), a single [`Value`] or [`Arg`],
/// or a vector of either.
#[derive(Clone, Debug, Default)]
pub struct Args(Vec<Arg>);

impl Args {
    /// Creates an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates a list whose first argument is the given error.
    pub fn error(error: impl StdError + Send + Sync + 'static) -> Self {
        Self(vec![Arg::error(error)])
    }

    /// Appends an argument.
    #[inline]
    pub fn with(mut self, arg: impl Into<Arg>) -> Self {
        self.0.push(arg.into());
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arg> {
        self.0.iter()
    }

    pub(crate) fn into_vec(self) -> Vec<Arg> {
        self.0
    }
}

impl From<()> for Args {
    fn from(_: ()) -> Self {
        Self::new()
    }
}

impl From<Value> for Args {
    fn from(v: Value) -> Self {
        Self(vec![Arg::Value(v)])
    }
}

impl From<Arg> for Args {
    fn from(a: Arg) -> Self {
        Self(vec![a])
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Self(values.into_iter().map(Arg::Value).collect())
    }
}

impl From<Vec<Arg>> for Args {
    fn from(args: Vec<Arg>) -> Self {
        Self(args)
    }
}

impl FromIterator<Arg> for Args {
    fn from_iter<I: IntoIterator<Item = Arg>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One emission as seen by a listener.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock time of the `emit` call
/// - `args`: shared by every listener of the same emission (cheap to clone)
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp of the emission.
    pub at: SystemTime,
    name: Arc<str>,
    args: Arc<[Arg]>,
}

impl Event {
    /// Creates an event with the current timestamp and next sequence number.
    pub fn new(name: impl Into<Arc<str>>, args: impl Into<Args>) -> Self {
        Self {
            seq: EMIT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            name: name.into(),
            args: args.into().into_vec().into(),
        }
    }

    /// Event name this emission was made under.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All arguments, in emission order.
    #[inline]
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    #[inline]
    pub fn arg(&self, index: usize) -> Option<&Arg> {
        self.args.get(index)
    }

    /// Argument at `index` if it is plain data.
    #[inline]
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.arg(index).and_then(Arg::as_value)
    }

    /// First argument if it is an error value.
    #[inline]
    pub fn error(&self) -> Option<&ErrorRef> {
        self.arg(0).and_then(Arg::as_error)
    }
}
