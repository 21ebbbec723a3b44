//! Integration tests for the board crawler
//!
//! These tests use wiremock to stand in for the board API and exercise page
//! capping, fail-fast cancellation, and partial result retention.

use naver_harvest::config::{BoardConfig, HttpConfig};
use naver_harvest::crawler::{build_http_client, Fetcher, HttpProfile, NoDelay, Resolver};
use naver_harvest::model::{Post, PostId};
use naver_harvest::output::{BatchKey, OutputResult, PostSink};
use naver_harvest::BoardCrawler;
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CAFE_ID: &str = "555";
const BOARD_ID: &str = "7";
const COOKIE: &str = "NID_AUT=test; NID_SES=test";

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

fn board_config(api_base_url: &str, max_pages: i64) -> BoardConfig {
    BoardConfig {
        cafe_id: CAFE_ID.to_string(),
        board_id: BOARD_ID.to_string(),
        max_pages,
        page_size: 15,
        api_base_url: api_base_url.to_string(),
        origin: "https://cafe.naver.com".to_string(),
        cookie: Some(COOKIE.to_string()),
        cookie_env: "NAVER_COOKIE".to_string(),
        concurrency: 3,
    }
}

fn crawler(config: BoardConfig, sink: Arc<RecordingSink>) -> BoardCrawler {
    let profile =
        HttpProfile::api(&HttpConfig::default(), &config, COOKIE).expect("Failed to build profile");
    let client = build_http_client(&profile).expect("Failed to build client");
    let resolver = Resolver::new(Arc::new(Fetcher::new(client, Arc::new(NoDelay))));
    BoardCrawler::new(resolver, config, sink)
}

fn listing_path() -> String {
    format!(
        "/cafe-web/cafe-boardlist-api/v1/cafes/{}/menus/{}/articles",
        CAFE_ID, BOARD_ID
    )
}

fn detail_path(article_id: i64) -> String {
    format!(
        "/cafe-web/cafe-articleapi/v3/cafes/{}/articles/{}",
        CAFE_ID, article_id
    )
}

fn article_id(page: i64, n: i64) -> i64 {
    page * 10 + n
}

fn listing_body(page: i64, total_pages: i64) -> serde_json::Value {
    let mut entries = vec![json!({
        "type": "NOTICE",
        "item": {"articleId": 1, "subject": "Board rules"}
    })];
    for n in 1..=2 {
        entries.push(json!({
            "type": "ARTICLE",
            "item": {
                "articleId": article_id(page, n),
                "subject": format!("Article {}", article_id(page, n)),
                "writeDateTimestamp": 1_700_000_000_000i64,
                "commentCount": 1,
                "readCount": 10,
                "likeCount": 0,
                "writerInfo": {"nickName": "member", "memberLevelName": "Regular", "staff": false, "manager": false}
            }
        }));
    }
    json!({
        "result": {
            "articleList": entries,
            "pageInfo": {"lastNavigationPageNumber": total_pages}
        }
    })
}

fn detail_body(id: i64) -> serde_json::Value {
    json!({
        "result": {
            "article": {
                "id": id,
                "subject": format!("Article {}", id),
                "contentHtml": format!("<div><p>Body of article {}</p></div>", id),
                "writeDate": 1_700_000_000_000i64
            },
            "comments": {"items": [
                {"id": 1, "content": "first!", "writeDate": 1_700_000_000_000i64,
                 "writer": {"nickName": "reader"}, "likeCount": 2}
            ]}
        }
    })
}

async fn mount_listing(server: &MockServer, page: i64, total_pages: i64, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(listing_path()))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body(page, total_pages)))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_details(server: &MockServer, page: i64) {
    for n in 1..=2 {
        let id = article_id(page, n);
        Mock::given(method("GET"))
            .and(path(detail_path(id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_body(id)))
            .mount(server)
            .await;
    }
}

fn ids(posts: &[Post]) -> Vec<PostId> {
    let mut ids: Vec<_> = posts.iter().map(|p| p.id.clone()).collect();
    ids.sort_by_key(|id| id.to_string());
    ids
}

#[tokio::test]
async fn test_page_cap_limits_fetched_pages() {
    let server = MockServer::start().await;
    for page in 1..=3 {
        mount_listing(&server, page, 5, 1).await;
        mount_details(&server, page).await;
    }
    for page in 4..=5 {
        mount_listing(&server, page, 5, 0).await;
    }

    let sink = Arc::new(RecordingSink::default());
    let crawler = crawler(board_config(&server.uri(), 3), sink.clone());

    let posts = crawler.run().await.expect("Board crawl failed");

    assert_eq!(posts.len(), 6);
    // Page 1 is always first
    assert_eq!(posts[0].id, PostId::Number(11));
    assert_eq!(posts[1].id, PostId::Number(12));
    assert_eq!(
        ids(&posts),
        [11, 12, 21, 22, 31, 32].map(PostId::Number).to_vec()
    );

    let post = &posts[0];
    assert_eq!(post.title, "Article 11");
    assert_eq!(post.content, "Body of article 11");
    assert_eq!(post.writer, "member");
    assert_eq!(
        post.url,
        "https://cafe.naver.com/ca-fe/cafes/555/articles/11"
    );
    assert_eq!(post.comments.len(), 1);
    assert_eq!(post.comments[0].writer, "reader");
    let meta = post.board.as_ref().unwrap();
    assert_eq!(meta.read_count, 10);
    assert!(meta.content_html.as_deref().unwrap().contains("<p>"));

    assert_eq!(sink.batches(), vec![("cafe_555_board_7_full".to_string(), 6)]);
}

#[tokio::test]
async fn test_zero_cap_crawls_every_page() {
    let server = MockServer::start().await;
    for page in 1..=2 {
        mount_listing(&server, page, 2, 1).await;
        mount_details(&server, page).await;
    }

    let sink = Arc::new(RecordingSink::default());
    let crawler = crawler(board_config(&server.uri(), 0), sink);

    let posts = crawler.run().await.expect("Board crawl failed");

    assert_eq!(posts.len(), 4);
}

#[tokio::test]
async fn test_page_failure_fails_run_and_keeps_partial_results() {
    let server = MockServer::start().await;
    for page in 1..=2 {
        mount_listing(&server, page, 3, 1).await;
        mount_details(&server, page).await;
    }
    Mock::given(method("GET"))
        .and(path(listing_path()))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let crawler = crawler(board_config(&server.uri(), 0), sink.clone());

    let err = crawler.run().await.unwrap_err();
    assert_eq!(err.status(), Some(500));

    let collected = ids(&crawler.collected().await);
    assert!(collected.contains(&PostId::Number(11)));
    assert!(collected.contains(&PostId::Number(12)));
    assert!(!collected.contains(&PostId::Number(31)));

    // Nothing is persisted for a failed run
    assert!(sink.batches().is_empty());
}

#[tokio::test]
async fn test_first_page_failure_is_the_run_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(listing_path()))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let crawler = crawler(board_config(&server.uri(), 0), sink);

    let err = crawler.run().await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(crawler.collected().await.is_empty());
}

#[tokio::test]
async fn test_detail_failure_keeps_listing_stub() {
    let server = MockServer::start().await;
    mount_listing(&server, 1, 1, 1).await;
    // Only the first article has a detail mock; the second returns 404
    Mock::given(method("GET"))
        .and(path(detail_path(11)))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_body(11)))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let crawler = crawler(board_config(&server.uri(), 0), sink);

    let posts = crawler.run().await.expect("Board crawl failed");

    assert_eq!(posts.len(), 2);
    let stub = &posts[1];
    assert_eq!(stub.id, PostId::Number(12));
    assert_eq!(stub.title, "Article 12");
    assert!(stub.content.is_empty());
    assert!(stub.comments.is_empty());
    assert!(stub.board.as_ref().unwrap().content_html.is_none());
}

#[tokio::test]
async fn test_api_requests_carry_board_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(listing_path()))
        .and(header("x-cafe-product", "pc"))
        .and(header("cookie", COOKIE))
        .and(header("referer", "https://cafe.naver.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body(1, 1)))
        .expect(1)
        .mount(&server)
        .await;
    mount_details(&server, 1).await;

    let sink = Arc::new(RecordingSink::default());
    let crawler = crawler(board_config(&server.uri(), 0), sink);

    let posts = crawler.run().await.expect("Board crawl failed");
    assert_eq!(posts.len(), 2);
}
