//! # Deferred execution capability.
//!
//! [`Schedule`] is the only thing the emitter needs from its host: "run this
//! after the current synchronous call returns, in submission order".
//! The default implementation is the tokio-backed [`Dispatcher`](super::Dispatcher).
//!
//! ## Contract
//! - `schedule()` must not run the job inline and must not block.
//! - Jobs submitted from one thread start in submission order.
//! - A job that panics must not prevent later jobs from running.
//! - There is no cancellation of an individual job once submitted.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;

/// One deferred listener invocation.
pub struct Job {
    label: Arc<str>,
    fut: BoxFuture<'static, ()>,
}

impl Job {
    /// Wraps a future; `label` names the work in logs (typically the listener name).
    pub fn new(label: impl Into<Arc<str>>, fut: impl Future<Output = ()> + Send + 'static) -> Self {
        Self {
            label: label.into(),
            fut: fut.boxed(),
        }
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Splits the job into its label and future.
    pub fn into_parts(self) -> (Arc<str>, BoxFuture<'static, ()>) {
        (self.label, self.fut)
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job").field("label", &self.label).finish_non_exhaustive()
    }
}

/// Host scheduler used by the emitter.
#[async_trait]
pub trait Schedule: Send + Sync + 'static {
    /// Submits a job for deferred execution.
    fn schedule(&self, job: Job);

    /// Waits until every job submitted before this call has finished.
    ///
    /// Default: returns immediately (schedulers without a completion signal).
    async fn flush(&self) {}

    /// Stops accepting work; queued jobs may be dropped.
    ///
    /// Default: no-op.
    fn close(&self) {}
}
