//! Output module for persisting and reporting harvested posts
//!
//! This module handles:
//! - The persistence collaborator interface used by both crawlers
//! - JSON file and SQLite sinks
//! - Fanning a batch out to several sinks
//! - The console summary printed after a run

mod json;
mod sqlite_output;
pub mod summary;
mod traits;

pub use json::JsonFileSink;
pub use sqlite_output::SqliteSink;
pub use summary::{format_summary, print_summary};
pub use traits::{BatchKey, OutputError, OutputResult, PostSink};

use crate::model::Post;

/// Sink forwarding every batch to several sinks
///
/// A failing sink does not stop the others; the first error is returned
/// after all sinks have been tried.
#[derive(Default)]
pub struct MultiSink {
    sinks: Vec<Box<dyn PostSink>>,
}

impl MultiSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl PostSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl PostSink for MultiSink {
    fn persist(&self, batch: &[Post], key: &BatchKey) -> OutputResult<()> {
        let mut first_error = None;

        for sink in &self.sinks {
            if let Err(e) = sink.persist(batch, key) {
                tracing::warn!("Sink failed for batch {}: {}", key, e);
                first_error.get_or_insert(e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}
