//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the harvest database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Harvested posts, one row per canonical URL within each batch
CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    post_id TEXT NOT NULL,
    url TEXT NOT NULL,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    writer TEXT NOT NULL,
    write_date TEXT NOT NULL,
    board_meta TEXT,
    batch_key TEXT NOT NULL,
    saved_at TEXT NOT NULL,
    UNIQUE(batch_key, url)
);

CREATE INDEX IF NOT EXISTS idx_posts_post_id ON posts(post_id);
CREATE INDEX IF NOT EXISTS idx_posts_url ON posts(url);

-- Comments belong to exactly one post row
CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    post_row_id INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    comment_id TEXT NOT NULL,
    content TEXT NOT NULL,
    writer TEXT NOT NULL,
    write_date TEXT NOT NULL,
    writer_meta TEXT,
    like_count INTEGER
);

CREATE INDEX IF NOT EXISTS idx_comments_post ON comments(post_row_id);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
