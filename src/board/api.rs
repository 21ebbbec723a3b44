//! Board JSON API wire types and decoding
//!
//! Only the fields the harvester uses are declared. Every field defaults, so
//! a payload with missing parts decodes into empty values rather than failing;
//! a body that is not JSON at all is a parse error.

use crate::crawler::FetchedPage;
use crate::extract::html_fragment_text;
use crate::model::{ArticleStub, BoardMeta, Comment, Post, PostId, WriterMeta};
use crate::HarvestError;
use chrono::{Local, TimeZone};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt::Display;

/// Display format of board timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Listing entries of any other type (notices, ads) are ignored
const ARTICLE_TYPE: &str = "ARTICLE";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleListResponse {
    pub result: ArticleListResult,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleListResult {
    pub article_list: Vec<ArticleListEntry>,
    pub page_info: PageInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleListEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub item: ArticleListItem,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleListItem {
    pub article_id: i64,
    pub subject: String,
    pub write_date_timestamp: i64,
    pub comment_count: u32,
    pub read_count: u32,
    pub like_count: u32,
    pub writer_info: WireWriter,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    pub last_navigation_page_number: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WireWriter {
    pub nick_name: String,
    pub member_level_name: String,
    pub staff: bool,
    pub manager: bool,
}

impl From<WireWriter> for WriterMeta {
    fn from(writer: WireWriter) -> Self {
        WriterMeta {
            nickname: writer.nick_name,
            level_name: writer.member_level_name,
            is_staff: writer.staff,
            is_manager: writer.manager,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleDetailResponse {
    pub result: ArticleDetailResult,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleDetailResult {
    pub article: WireArticle,
    pub comments: WireComments,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WireArticle {
    pub id: i64,
    pub subject: String,
    pub content_html: String,
    pub write_date: i64,
    pub writer: WireWriter,
    pub comment_count: u32,
    pub read_count: u32,
    pub like_count: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WireComments {
    pub items: Vec<WireComment>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WireComment {
    pub id: i64,
    pub content: String,
    pub write_date: i64,
    pub writer: WireWriter,
    pub like_count: u32,
}

/// One decoded listing page
#[derive(Debug)]
pub struct ListingPage {
    pub stubs: Vec<ArticleStub>,
    /// Last page number the board reports
    pub total_pages: i64,
}

/// Decoded article body and comments, ready to merge into a stub
#[derive(Debug)]
pub struct ArticleDetail {
    pub title: String,
    pub content: String,
    pub content_html: String,
    pub comments: Vec<Comment>,
}

/// Formats epoch milliseconds in local time
pub fn format_epoch_millis(millis: i64) -> String {
    format_epoch_millis_in(millis, &Local)
}

/// Formats epoch milliseconds in `tz`
///
/// Missing timestamps (zero or negative) format as an empty string.
pub fn format_epoch_millis_in<Tz>(millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if millis <= 0 {
        return String::new();
    }
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

/// Canonical browser URL of a board article
pub fn article_url(origin: &str, cafe_id: &str, article_id: i64) -> String {
    format!(
        "{}/ca-fe/cafes/{}/articles/{}",
        origin.trim_end_matches('/'),
        cafe_id,
        article_id
    )
}

fn decode<T: DeserializeOwned>(page: &FetchedPage) -> Result<T, HarvestError> {
    serde_json::from_str(&page.body).map_err(|e| HarvestError::Parse {
        url: page.url.clone(),
        message: e.to_string(),
    })
}

/// Decodes a listing page into stubs and the reported page count
pub fn parse_listing(
    page: &FetchedPage,
    origin: &str,
    cafe_id: &str,
) -> Result<ListingPage, HarvestError> {
    let response: ArticleListResponse = decode(page)?;
    let total_pages = response.result.page_info.last_navigation_page_number;

    let stubs = response
        .result
        .article_list
        .into_iter()
        .filter(|entry| entry.kind == ARTICLE_TYPE)
        .map(|entry| {
            let item = entry.item;
            let writer = WriterMeta::from(item.writer_info);
            ArticleStub {
                id: PostId::Number(item.article_id),
                title: item.subject,
                url: article_url(origin, cafe_id, item.article_id),
                writer: writer.nickname.clone(),
                write_date: format_epoch_millis(item.write_date_timestamp),
                board: Some(BoardMeta {
                    writer,
                    comment_count: item.comment_count,
                    read_count: item.read_count,
                    like_count: item.like_count,
                    content_html: None,
                }),
            }
        })
        .collect();

    Ok(ListingPage { stubs, total_pages })
}

/// Decodes an article detail payload
pub fn parse_detail(page: &FetchedPage) -> Result<ArticleDetail, HarvestError> {
    let response: ArticleDetailResponse = decode(page)?;
    let article = response.result.article;

    let comments = response
        .result
        .comments
        .items
        .into_iter()
        .map(|c| Comment {
            id: c.id.to_string(),
            content: c.content.trim().to_string(),
            writer: c.writer.nick_name.clone(),
            write_date: format_epoch_millis(c.write_date),
            writer_meta: Some(WriterMeta::from(c.writer)),
            like_count: Some(c.like_count),
        })
        .filter(Comment::is_valid)
        .collect();

    Ok(ArticleDetail {
        title: article.subject,
        content: html_fragment_text(&article.content_html),
        content_html: article.content_html,
        comments,
    })
}

/// Merges a decoded detail into a post built from its listing stub
///
/// Listing data wins where both are present; the detail supplies the body,
/// the raw markup, and the comments.
pub fn merge_detail(post: &mut Post, detail: ArticleDetail) {
    if post.title.is_empty() {
        post.title = detail.title;
    }
    post.content = detail.content;
    post.comments = detail.comments;

    let meta = post.board.get_or_insert_with(BoardMeta::default);
    meta.content_html = Some(detail.content_html);
}
