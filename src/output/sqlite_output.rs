//! SQLite-backed sink
//!
//! This module provides a sink that writes every batch into the post store.

use crate::model::Post;
use crate::output::traits::{BatchKey, OutputError, OutputResult, PostSink};
use crate::storage::PostStore;
use std::sync::{Arc, Mutex};

/// Sink that upserts batches into a [`PostStore`]
pub struct SqliteSink {
    storage: Arc<Mutex<dyn PostStore + Send>>,
}

impl SqliteSink {
    pub fn new(storage: Arc<Mutex<dyn PostStore + Send>>) -> Self {
        Self { storage }
    }
}

impl PostSink for SqliteSink {
    fn persist(&self, batch: &[Post], key: &BatchKey) -> OutputResult<()> {
        let mut storage = self
            .storage
            .lock()
            .map_err(|e| OutputError::Write(format!("Failed to lock storage: {}", e)))?;

        let saved = storage.save_batch(&key.to_string(), batch)?;
        tracing::debug!("Stored {} posts in batch {}", saved, key);
        Ok(())
    }
}
