//! # Login flow demo
//!
//! Shows ordinary and once listeners, a fallback handler for the error event,
//! and `emit_event` payload stamping.
//!
//! ## Run
//! ```bash
//! RUST_LOG=eventvisor=trace cargo run --example login
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::json;
use tracing_subscriber::EnvFilter;

use eventvisor::{Args, Event, EventEmitter, Filter, ListenerFn, ListenerRef};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let emitter = EventEmitter::new();
    let logins = Arc::new(AtomicU64::new(0));

    let counter: ListenerRef = {
        let logins = Arc::clone(&logins);
        ListenerFn::arc("counter", move |_ev: Event| {
            let logins = Arc::clone(&logins);
            async move {
                logins.fetch_add(1, Ordering::Relaxed);
            }
        })
    };
    let welcome: ListenerRef = ListenerFn::arc("welcome", |ev: Event| async move {
        println!(" ├─► first login: {}", ev.value(0).map_or("?".into(), |v| v.to_string()));
    });
    let audit: ListenerRef = ListenerFn::arc("audit", |ev: Event| async move {
        if let Some(p) = ev.value(0) {
            println!(" ├─► audit type={} timestamp={}", p["type"], p["timestamp"]);
        }
    });
    let on_error: ListenerRef = ListenerFn::arc("on-error", |ev: Event| async move {
        let reason = ev.error().map(ToString::to_string).unwrap_or_default();
        println!(" ├─► handled error: {reason}");
    });

    emitter
        .on("login", counter.clone())
        .once("login", welcome)
        .on("audit", audit)
        .set_handler("error", on_error);

    println!("Emitting:");
    emitter
        .emit("login", json!("alice"))?
        .emit("login", json!("bob"))?
        .emit_event("audit", json!({"user": "bob"}))?
        .emit("error", Args::error(std::io::Error::other("session store offline")))?;
    emitter.flush().await;

    emitter.off(Filter::by_listener(&counter));
    emitter.emit("login", json!("carol"))?;
    emitter.flush().await;

    emitter.clear_handler("error");
    if let Err(e) = emitter.emit("error", json!("nobody is listening")) {
        println!(" └─► escalated: {} ({})", e.as_message(), e.as_label());
    }

    println!();
    println!("Logins counted: {}", logins.load(Ordering::Relaxed));
    Ok(())
}
