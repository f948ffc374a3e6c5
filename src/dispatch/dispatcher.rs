//! # Dispatcher: tokio-backed deferred execution
//!
//! [`Dispatcher`] starts submitted [`Job`]s in submission order, each on its own
//! tokio task, **never** inside the submitting call.
//!
//! ## What it guarantees
//! - `schedule(job)` returns immediately (unbounded queue).
//! - FIFO start: job `n + 1` is first polled only after job `n` returned from its first poll.
//! - Jobs are independent: a job that awaits later work does not hold up the queue.
//! - Panics inside a job are caught and logged (isolation).
//!
//! ## What it does **not** guarantee
//! - No completion order once a job awaits; jobs interleave at their await points.
//! - No cancellation of an already-started job (`close()` drops only what has not started).
//!
//! ## Diagram
//! ```text
//!    schedule(job)
//!        │
//!        └──► [queue] ─► worker ─► spawn(after prev start ─► catch_unwind(job))
//!                          │                                    └─► panic → error! log
//!                          └─ flush marker ─► spawn(join started jobs ─► oneshot reply)
//! ```

use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures::FutureExt;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::schedule::{Job, Schedule};

/// Worker queue item.
enum Msg {
    Run(Job),
    Flush(oneshot::Sender<()>),
}

/// FIFO-start executor for listener invocations.
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Msg>,
    token: CancellationToken,
}

impl Dispatcher {
    /// Creates the dispatcher and spawns its worker on the current tokio runtime.
    ///
    /// ### Panics
    /// Panics if called outside a tokio runtime (as `tokio::spawn` does).
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        tokio::spawn(Self::worker(rx, token.clone()));
        Self { tx, token }
    }

    async fn worker(mut rx: mpsc::UnboundedReceiver<Msg>, token: CancellationToken) {
        let mut running: Vec<JoinHandle<()>> = Vec::new();
        let mut prev_started: Option<oneshot::Receiver<()>> = None;

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                msg = rx.recv() => match msg {
                    Some(Msg::Run(job)) => {
                        running.retain(|h| !h.is_finished());
                        let (started, next) = oneshot::channel();
                        let prev = prev_started.replace(next);
                        running.push(tokio::spawn(async move {
                            if let Some(prev) = prev {
                                // Err: the previous task was dropped before it started.
                                let _ = prev.await;
                            }
                            let mut fut = Box::pin(run_isolated(job));
                            let first = futures::poll!(fut.as_mut());
                            let _ = started.send(());
                            if first.is_pending() {
                                fut.await;
                            }
                        }));
                    }
                    Some(Msg::Flush(done)) => {
                        let batch = std::mem::take(&mut running);
                        tokio::spawn(async move {
                            futures::future::join_all(batch).await;
                            let _ = done.send(());
                        });
                    }
                    None => break,
                }
            }
        }
        tracing::debug!(running = running.len(), "dispatcher worker stopped");
    }

    /// True once `close()` has been called.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Schedule for Dispatcher {
    fn schedule(&self, job: Job) {
        if self.is_closed() {
            tracing::debug!(listener = %job.label(), "dispatcher closed, invocation dropped");
            return;
        }
        let label = job.label().to_owned();
        if self.tx.send(Msg::Run(job)).is_err() {
            tracing::debug!(listener = %label, "dispatcher stopped, invocation dropped");
        }
    }

    async fn flush(&self) {
        if self.is_closed() {
            return;
        }
        let (done, wait) = oneshot::channel();
        if self.tx.send(Msg::Flush(done)).is_ok() {
            // Err means the worker stopped before reaching the marker.
            let _ = wait.await;
        }
    }

    fn close(&self) {
        self.token.cancel();
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Runs one job, converting a panic into an `error!` log.
async fn run_isolated(job: Job) {
    let (label, fut) = job.into_parts();
    if let Err(panic_err) = AssertUnwindSafe(fut).catch_unwind().await {
        tracing::error!(listener = %label, panic = %panic_message(&*panic_err), "listener panicked");
    }
}

fn panic_message(any: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
