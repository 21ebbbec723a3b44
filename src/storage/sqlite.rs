//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the PostStore trait.
//! A post saved under several batches (a page batch and the full-run batch)
//! keeps one row per batch; counts report distinct URLs.

use crate::model::Post;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{PostStore, StorageResult};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens or creates the database at `path`
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl PostStore for SqliteStorage {
    fn save_batch(&mut self, batch_key: &str, posts: &[Post]) -> StorageResult<usize> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        for post in posts {
            let board_meta = post.board.as_ref().map(serde_json::to_string).transpose()?;

            tx.execute(
                "INSERT INTO posts (post_id, url, title, content, writer, write_date, board_meta, batch_key, saved_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 ON CONFLICT(batch_key, url) DO UPDATE SET
                    post_id = excluded.post_id,
                    title = excluded.title,
                    content = excluded.content,
                    writer = excluded.writer,
                    write_date = excluded.write_date,
                    board_meta = excluded.board_meta,
                    saved_at = excluded.saved_at",
                params![
                    post.id.to_string(),
                    post.url,
                    post.title,
                    post.content,
                    post.writer,
                    post.write_date,
                    board_meta,
                    batch_key,
                    now
                ],
            )?;

            let row_id: i64 = tx.query_row(
                "SELECT id FROM posts WHERE batch_key = ?1 AND url = ?2",
                params![batch_key, post.url],
                |row| row.get(0),
            )?;

            tx.execute("DELETE FROM comments WHERE post_row_id = ?1", params![row_id])?;

            for (position, comment) in post.comments.iter().enumerate() {
                let writer_meta = comment
                    .writer_meta
                    .as_ref()
                    .map(serde_json::to_string)
                    .transpose()?;

                tx.execute(
                    "INSERT INTO comments (post_row_id, position, comment_id, content, writer, write_date, writer_meta, like_count)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    params![
                        row_id,
                        position as i64,
                        comment.id,
                        comment.content,
                        comment.writer,
                        comment.write_date,
                        writer_meta,
                        comment.like_count
                    ],
                )?;
            }
        }

        tx.commit()?;
        Ok(posts.len())
    }

    fn count_posts(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(DISTINCT url) FROM posts", [], |row| {
                row.get(0)
            })?;
        Ok(count as u64)
    }

    fn count_comments(&self) -> StorageResult<u64> {
        // Only the most recently saved row of each URL is counted
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM comments
             WHERE post_row_id IN (SELECT MAX(id) FROM posts GROUP BY url)",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn batch_keys(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT batch_key FROM posts ORDER BY batch_key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }
}
