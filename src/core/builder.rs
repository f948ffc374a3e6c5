use std::sync::Arc;

use crate::core::Config;
use crate::dispatch::{Dispatcher, Schedule};

use super::emitter::EventEmitter;

/// Builder for constructing an [`EventEmitter`] with a custom scheduler.
pub struct EmitterBuilder {
    cfg: Config,
    scheduler: Option<Arc<dyn Schedule>>,
}

impl EmitterBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            scheduler: None,
        }
    }

    /// Replaces the built-in tokio [`Dispatcher`].
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Schedule>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Builds the emitter.
    ///
    /// Without a custom scheduler this spawns the dispatcher worker and must
    /// run inside a tokio runtime.
    pub fn build(self) -> EventEmitter {
        let scheduler = match self.scheduler {
            Some(s) => s,
            None => Arc::new(Dispatcher::new()),
        };
        EventEmitter::from_parts(self.cfg, scheduler)
    }
}
