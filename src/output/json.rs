//! JSON file sink
//!
//! Writes each batch as a pretty-printed JSON array to
//! `{directory}/{key}_{YYYYmmdd_HHMMSS}.json`.

use crate::model::Post;
use crate::output::traits::{BatchKey, OutputResult, PostSink};
use chrono::Local;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Sink writing one JSON file per batch
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    directory: PathBuf,
}

impl JsonFileSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path a batch written now would land at
    pub fn path_for(&self, key: &BatchKey) -> PathBuf {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        self.directory.join(format!("{}_{}.json", key, timestamp))
    }
}

impl PostSink for JsonFileSink {
    fn persist(&self, batch: &[Post], key: &BatchKey) -> OutputResult<()> {
        fs::create_dir_all(&self.directory)?;

        let path = self.path_for(key);
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, batch)?;
        writer.flush()?;

        tracing::info!("Saved {} posts to {}", batch.len(), path.display());
        Ok(())
    }
}
