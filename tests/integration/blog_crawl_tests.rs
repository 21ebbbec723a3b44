//! Integration tests for the blog crawler
//!
//! These tests use wiremock to stand in for the blog host and run the full
//! listing → detail → persist cycle end-to-end.

use naver_harvest::config::{BlogConfig, HttpConfig};
use naver_harvest::crawler::{build_http_client, Fetcher, HttpProfile, NoDelay, Resolver};
use naver_harvest::model::{Post, PostId};
use naver_harvest::output::{BatchKey, OutputResult, PostSink};
use naver_harvest::BlogCrawler;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BLOG_ID: &str = "me";

/// Sink recording the name and size of every persisted batch
#[derive(Default)]
struct RecordingSink {
    batches: Mutex<Vec<(String, usize)>>,
}

impl RecordingSink {
    fn batches(&self) -> Vec<(String, usize)> {
        self.batches.lock().unwrap().clone()
    }
}

impl PostSink for RecordingSink {
    fn persist(&self, batch: &[Post], key: &BatchKey) -> OutputResult<()> {
        self.batches
            .lock()
            .unwrap()
            .push((key.to_string(), batch.len()));
        Ok(())
    }
}

fn resolver() -> Resolver {
    let profile = HttpProfile::page(&HttpConfig::default()).expect("Failed to build profile");
    let client = build_http_client(&profile).expect("Failed to build client");
    Resolver::new(Arc::new(Fetcher::new(client, Arc::new(NoDelay))))
}

fn blog_config(base_url: &str, max_pages: u32) -> BlogConfig {
    BlogConfig {
        blog_id: BLOG_ID.to_string(),
        max_pages,
        base_url: base_url.to_string(),
    }
}

fn post_id(page: u32, n: u32) -> String {
    format!("2230000{}{}", page, n)
}

fn listing_html(page: u32) -> String {
    let items: String = (1..=2)
        .map(|n| {
            format!(
                r#"<div class="post-item"><a href="/PostView.naver?blogId=me&amp;logNo={}">Post {}-{}</a></div>"#,
                post_id(page, n),
                page,
                n
            )
        })
        .collect();
    format!("<html><body>{}</body></html>", items)
}

fn detail_html(title: &str) -> String {
    format!(
        r#"<html><body>
             <div class="se-title-text">{}</div>
             <span class="nick_name">writer</span>
             <span class="se_time">2024. 5. 1. 12:30</span>
             <div class="se-main-container"><p>Body of the post called {}</p></div>
             <div class="comment_area">
               <div class="comment_item"><span class="comment_text">great post</span></div>
             </div>
           </body></html>"#,
        title, title
    )
}

async fn mount_listing(server: &MockServer, page: u32) {
    Mock::given(method("GET"))
        .and(path("/PostList.naver"))
        .and(query_param("currentPage", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(page)))
        .mount(server)
        .await;
}

async fn mount_details(server: &MockServer, page: u32) {
    for n in 1..=2 {
        let id = post_id(page, n);
        Mock::given(method("GET"))
            .and(path(format!("/{}/{}", BLOG_ID, id)))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(detail_html(&format!("Post {}", id))),
            )
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn test_crawls_every_page_and_persists_batches() {
    let server = MockServer::start().await;
    for page in 1..=3 {
        mount_listing(&server, page).await;
        mount_details(&server, page).await;
    }

    let sink = Arc::new(RecordingSink::default());
    let crawler = BlogCrawler::new(resolver(), blog_config(&server.uri(), 3), sink.clone());

    let report = crawler.run().await;

    assert_eq!(report.posts.len(), 6);
    assert!(report.failed_pages.is_empty());
    assert!(report.empty_pages.is_empty());
    assert_eq!(report.skipped_posts, 0);

    // Posts keep page order
    let ids: Vec<_> = report.posts.iter().map(|p| p.id.to_string()).collect();
    assert_eq!(ids[0], post_id(1, 1));
    assert_eq!(ids[5], post_id(3, 2));

    let first = &report.posts[0];
    assert_eq!(first.title, format!("Post {}", post_id(1, 1)));
    assert_eq!(first.writer, "writer");
    assert_eq!(first.comments.len(), 1);
    assert_eq!(first.comments[0].content, "great post");
    assert!(first.url.ends_with(&format!("/{}/{}", BLOG_ID, post_id(1, 1))));

    assert_eq!(
        sink.batches(),
        vec![
            ("blog_me_page_1".to_string(), 2),
            ("blog_me_page_2".to_string(), 2),
            ("blog_me_page_3".to_string(), 2),
            ("blog_me_full".to_string(), 6),
        ]
    );
}

#[tokio::test]
async fn test_failed_listing_page_is_skipped() {
    let server = MockServer::start().await;
    // Page 2 has no mock, so every listing candidate for it returns 404
    for page in [1, 3] {
        mount_listing(&server, page).await;
        mount_details(&server, page).await;
    }

    let sink = Arc::new(RecordingSink::default());
    let crawler = BlogCrawler::new(resolver(), blog_config(&server.uri(), 3), sink.clone());

    let report = crawler.run().await;

    assert_eq!(report.posts.len(), 4);
    assert_eq!(report.failed_pages, vec![2]);

    let ids: Vec<_> = report.posts.iter().map(|p| p.id.clone()).collect();
    assert_eq!(
        ids,
        vec![
            PostId::from(post_id(1, 1)),
            PostId::from(post_id(1, 2)),
            PostId::from(post_id(3, 1)),
            PostId::from(post_id(3, 2)),
        ]
    );

    let names: Vec<_> = sink.batches().into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["blog_me_page_1", "blog_me_page_3", "blog_me_full"]);
}

#[tokio::test]
async fn test_detail_falls_back_and_drops_empty_posts() {
    let server = MockServer::start().await;
    mount_listing(&server, 1).await;

    // First post is only reachable through the second detail candidate
    Mock::given(method("GET"))
        .and(path("/PostView.naver"))
        .and(query_param("logNo", post_id(1, 1)))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_html("Fallback")))
        .mount(&server)
        .await;

    // Second post resolves but has neither title nor body
    Mock::given(method("GET"))
        .and(path(format!("/{}/{}", BLOG_ID, post_id(1, 2))))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let crawler = BlogCrawler::new(resolver(), blog_config(&server.uri(), 1), sink.clone());

    let report = crawler.run().await;

    assert_eq!(report.posts.len(), 1);
    assert_eq!(report.skipped_posts, 1);
    assert_eq!(report.posts[0].title, "Fallback");
    assert!(report.posts[0].url.contains("PostView.naver"));
}

#[tokio::test]
async fn test_nothing_persisted_when_no_posts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/PostList.naver"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let crawler = BlogCrawler::new(resolver(), blog_config(&server.uri(), 2), sink.clone());

    let report = crawler.run().await;

    assert!(report.is_empty());
    assert_eq!(report.empty_pages, vec![1, 2]);
    assert!(sink.batches().is_empty());
}
