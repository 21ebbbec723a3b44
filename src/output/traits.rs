//! Persistence collaborator interface
//!
//! Crawlers hand finished batches to a [`PostSink`] together with a
//! [`BatchKey`] that names the batch. How and where the batch is written is
//! entirely up to the sink.

use crate::model::Post;
use crate::storage::StorageError;
use std::fmt;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Name of a persisted batch
///
/// Every page of a blog run and each full run get a distinct key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BatchKey {
    BlogPage { blog_id: String, page: u32 },
    BlogFull { blog_id: String },
    BoardFull { cafe_id: String, board_id: String },
}

impl fmt::Display for BatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchKey::BlogPage { blog_id, page } => write!(f, "blog_{}_page_{}", blog_id, page),
            BatchKey::BlogFull { blog_id } => write!(f, "blog_{}_full", blog_id),
            BatchKey::BoardFull { cafe_id, board_id } => {
                write!(f, "cafe_{}_board_{}_full", cafe_id, board_id)
            }
        }
    }
}

/// Trait for persistence sinks
///
/// Implementations must be thread-safe; the board crawler may be driven from
/// a spawned task.
pub trait PostSink: Send + Sync {
    /// Persists one batch of posts under `key`
    fn persist(&self, batch: &[Post], key: &BatchKey) -> OutputResult<()>;
}
