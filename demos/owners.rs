//! # Owner-scoped listeners demo
//!
//! Two widgets register listeners tagged with their own [`Owner`]; tearing one
//! widget down removes exactly its listeners. Every event is also recorded by
//! the built-in [`LogListener`].
//!
//! ## Run
//! ```bash
//! RUST_LOG=info cargo run --example owners --features logging
//! ```

use std::sync::Arc;

use serde_json::json;
use tracing_subscriber::EnvFilter;

use eventvisor::{Config, Event, EventEmitter, Filter, ListenerFn, ListenerRef, LogListener, Owner};

fn widget(name: &'static str) -> ListenerRef {
    ListenerFn::arc(name, move |ev: Event| async move {
        println!("[{name}] {} {:?}", ev.name(), ev.value(0));
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = Config {
        max_listeners: 4,
        ..Config::default()
    };
    let emitter = EventEmitter::with_config(cfg);
    let log: ListenerRef = Arc::new(LogListener::new());

    let sidebar = Owner::new("sidebar");
    let header = Owner::new("header");

    emitter
        .on("theme", log.clone())
        .on("resize", log)
        .on_owned("theme", widget("sidebar"), &sidebar)
        .on_owned("resize", widget("sidebar"), &sidebar)
        .on_owned("theme", widget("header"), &header);

    emitter.emit("theme", json!("dark"))?.emit("resize", json!([800, 600]))?;
    emitter.flush().await;

    println!("-- sidebar closed --");
    emitter.off(Filter::by_owner(&sidebar));
    emitter.emit("theme", json!("light"))?.emit("resize", json!([1024, 768]))?;
    emitter.flush().await;

    println!("events still wired: {:?}", emitter.event_names());
    emitter.close();
    Ok(())
}
