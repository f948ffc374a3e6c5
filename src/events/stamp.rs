//! Payload decoration for `EventEmitter::emit_event`.
//!
//! ```text
//! payload ──► object? ──no──► {"data": payload}
//!                │
//!               yes
//!                ▼
//!   "type"      = event name
//!   "timestamp" = "timeStamp" (truthy) | "timestamp" (truthy) | now_ms
//! ```
//!
//! Falsy stamps (`null`, `false`, `0`, `""`) count as missing.

use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};

use serde_json::{Map, Value};

/// Highest timestamp handed out so far; keeps generated stamps non-decreasing.
static LAST_STAMP_MS: AtomicI64 = AtomicI64::new(i64::MIN);

/// Current Unix time in milliseconds, never lower than a previous call.
pub(crate) fn now_ms() -> i64 {
    let wall = chrono::Utc::now().timestamp_millis();
    let prev = LAST_STAMP_MS.fetch_max(wall, AtomicOrdering::Relaxed);
    prev.max(wall)
}

/// Wraps `payload` into an object and stamps `type` and `timestamp`.
///
/// `now` is taken once by the caller so every recipient of one emission
/// sees the same stamp.
pub(crate) fn decorate(event: &str, payload: Value, now: i64) -> Value {
    let mut obj = match payload {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("data".to_owned(), other);
            map
        }
    };

    let stamp = ["timeStamp", "timestamp"]
        .iter()
        .filter_map(|key| obj.get(*key))
        .find(|v| is_truthy(v))
        .cloned()
        .unwrap_or_else(|| Value::from(now));

    obj.insert("type".to_owned(), Value::String(event.to_owned()));
    obj.insert("timestamp".to_owned(), stamp);
    Value::Object(obj)
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
