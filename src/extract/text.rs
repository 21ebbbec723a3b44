//! Plain-text helpers shared by every extraction path

/// Collapses whitespace in extracted text
///
/// Tabs, newlines and carriage returns become spaces, runs of whitespace
/// collapse to a single space, and the result is trimmed. Applying it twice
/// gives the same result as applying it once.
///
/// # Example
///
/// ```
/// use naver_harvest::extract::normalize;
///
/// assert_eq!(normalize("  Hello\t\n  world \r"), "Hello world");
/// ```
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts a post identifier from a link
///
/// Rules, in order:
/// 1. `logNo=` query marker → the value up to the next `&`
/// 2. the first `/`-separated segment longer than 5 characters made only of
///    ASCII digits
/// 3. otherwise an empty string, which callers treat as "skip this entry"
///
/// # Example
///
/// ```
/// use naver_harvest::extract::extract_identifier;
///
/// assert_eq!(extract_identifier("https://x/y?logNo=987654&ref=1"), "987654");
/// assert_eq!(extract_identifier("https://x/blogid/223456789"), "223456789");
/// assert_eq!(extract_identifier("https://x/abc"), "");
/// ```
pub fn extract_identifier(href: &str) -> String {
    const MARKER: &str = "logNo=";

    if let Some(start) = href.find(MARKER) {
        let rest = &href[start + MARKER.len()..];
        let end = rest.find('&').unwrap_or(rest.len());
        return rest[..end].to_string();
    }

    href.split('/')
        .find(|segment| segment.len() > 5 && segment.bytes().all(|b| b.is_ascii_digit()))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Truncates text to at most `max_chars` characters, appending `...` when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
