//! Blog post page reader
//!
//! Extracts title, author, date, body, and comments from a post page using
//! the ordered selector groups. Validity is judged by the caller.

use crate::extract::selectors::{
    COMMENT_CONTAINER, COMMENT_DATE, COMMENT_TEXT, COMMENT_WRITER, CONTENT, TITLE, WRITER,
    WRITE_DATE,
};
use crate::extract::{extract_content, extract_field, parse_selector};
use crate::model::{Comment, Post, PostId};
use scraper::{ElementRef, Html};

/// Reads a full post from a blog post page
///
/// # Arguments
///
/// * `html` - The post page markup
/// * `log_no` - The post identifier
/// * `url` - The URL the page was served from
pub fn read_post(html: &str, log_no: &str, url: &str) -> Post {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let post = Post {
        id: PostId::from(log_no),
        title: extract_field(root, TITLE.selectors),
        content: extract_content(root, CONTENT.selectors),
        writer: extract_field(root, WRITER.selectors),
        write_date: extract_field(root, WRITE_DATE.selectors),
        url: url.to_string(),
        comments: read_comments(root),
        board: None,
    };

    tracing::debug!(
        "Post {}: title {:?}, writer {:?}, date {:?}, {} chars, {} comments",
        log_no,
        post.title,
        post.writer,
        post.write_date,
        post.content.chars().count(),
        post.comments.len()
    );

    post
}

/// Reads comments using the first container layout that yields any
///
/// Comment ids are 1-based positions among the matched containers.
pub fn read_comments(scope: ElementRef<'_>) -> Vec<Comment> {
    for container_selector in COMMENT_CONTAINER.selectors {
        let Some(parsed) = parse_selector(container_selector) else {
            continue;
        };

        let comments: Vec<Comment> = scope
            .select(&parsed)
            .enumerate()
            .map(|(i, container)| Comment {
                id: (i + 1).to_string(),
                content: extract_field(container, COMMENT_TEXT.selectors),
                writer: extract_field(container, COMMENT_WRITER.selectors),
                write_date: extract_field(container, COMMENT_DATE.selectors),
                writer_meta: None,
                like_count: None,
            })
            .filter(Comment::is_valid)
            .collect();

        if !comments.is_empty() {
            return comments;
        }
    }

    Vec::new()
}
