//! Console summary of a finished harvest

use crate::extract::truncate_chars;
use crate::model::Post;

/// Number of posts previewed in the summary
const PREVIEW_POSTS: usize = 5;

/// Characters of content shown per previewed post
const PREVIEW_CHARS: usize = 100;

/// Formats a short preview of the first few posts
pub fn format_summary(posts: &[Post]) -> String {
    if posts.is_empty() {
        return "No posts were collected. Check the configured identifiers.\n".to_string();
    }

    let mut out = format!("Collected {} posts\n\n", posts.len());
    for (i, post) in posts.iter().take(PREVIEW_POSTS).enumerate() {
        out.push_str(&format!("[{}] {}\n", i + 1, post.title));
        out.push_str(&format!(
            "    {} | {} | {} comments\n",
            post.writer,
            post.write_date,
            post.comments.len()
        ));
        out.push_str(&format!(
            "    {}\n\n",
            truncate_chars(&post.content, PREVIEW_CHARS)
        ));
    }

    if posts.len() > PREVIEW_POSTS {
        out.push_str(&format!("... and {} more\n", posts.len() - PREVIEW_POSTS));
    }
    out
}

/// Prints the summary to stdout
pub fn print_summary(posts: &[Post]) {
    print!("{}", format_summary(posts));
}
