//! Harvested record types
//!
//! Posts own their comments. Board posts additionally carry the structured
//! metadata the JSON API reports, which the blog surface never has.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform-assigned identifier of a post
///
/// Blog posts are identified by their `logNo` string, board articles by an
/// integer id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostId::Number(n) => write!(f, "{}", n),
            PostId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for PostId {
    fn from(value: i64) -> Self {
        PostId::Number(value)
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        PostId::Text(value)
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        PostId::Text(value.to_string())
    }
}

/// Author details reported by the board API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriterMeta {
    pub nickname: String,
    pub level_name: String,
    pub is_staff: bool,
    pub is_manager: bool,
}

/// Extra article metadata reported by the board API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardMeta {
    pub writer: WriterMeta,
    pub comment_count: u32,
    pub read_count: u32,
    pub like_count: u32,

    /// Raw article markup, kept alongside the extracted text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_html: Option<String>,
}

/// A single comment on a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub writer: String,
    pub write_date: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub writer_meta: Option<WriterMeta>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u32>,
}

impl Comment {
    /// Comments without content are discarded
    pub fn is_valid(&self) -> bool {
        !self.content.is_empty()
    }
}

/// A harvested post with its comments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub writer: String,
    pub write_date: String,
    #[serde(rename = "original_url")]
    pub url: String,
    pub comments: Vec<Comment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<BoardMeta>,
}

impl Post {
    /// A post is kept only if extraction produced a title or a body
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty() || !self.content.is_empty()
    }
}

/// Lightweight listing entry produced before the detail fetch
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleStub {
    pub id: PostId,
    pub title: String,
    pub url: String,
    pub writer: String,
    pub write_date: String,
    pub board: Option<BoardMeta>,
}

impl ArticleStub {
    /// Turns the stub into a post with no body and no comments yet
    pub fn into_post(self) -> Post {
        Post {
            id: self.id,
            title: self.title,
            content: String::new(),
            writer: self.writer,
            write_date: self.write_date,
            url: self.url,
            comments: Vec::new(),
            board: self.board,
        }
    }
}
