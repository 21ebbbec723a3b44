//! Storage traits and error types

use crate::model::Post;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for post storage backends
pub trait PostStore {
    /// Saves a batch of posts and their comments under `batch_key`
    ///
    /// Posts are keyed by batch and canonical URL: saving the same post again
    /// under the same batch replaces its row and comments, while another batch
    /// gets its own row. Returns the number of posts written.
    fn save_batch(&mut self, batch_key: &str, posts: &[Post]) -> StorageResult<usize>;

    /// Counts distinct stored post URLs
    fn count_posts(&self) -> StorageResult<u64>;

    /// Counts comments on the latest saved row of each URL
    fn count_comments(&self) -> StorageResult<u64>;

    /// Lists the distinct batch keys that currently own at least one post
    fn batch_keys(&self) -> StorageResult<Vec<String>>;
}
