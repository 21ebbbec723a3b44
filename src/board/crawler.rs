//! Concurrent, fail-fast board crawl
//!
//! Page 1 is fetched up front because it reports how many pages exist. The
//! remaining pages run as tasks on a [`JoinSet`], at most `concurrency` at a
//! time. The first page-level failure cancels every task that has not started
//! yet and becomes the run's error. Posts gathered before the failure stay in
//! the shared collection and can be read back with [`BoardCrawler::collected`].

use crate::board::api::{merge_detail, parse_detail, parse_listing, ArticleDetail, ListingPage};
use crate::config::BoardConfig;
use crate::crawler::candidates::{BOARD_DETAIL, BOARD_LISTING};
use crate::crawler::{render_all, Resolver, TemplateVars};
use crate::model::{ArticleStub, Post};
use crate::output::{BatchKey, PostSink};
use crate::HarvestError;
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Number of pages to crawl given the configured cap and the reported total
///
/// A cap of zero or less means "all pages".
pub fn pages_to_crawl(max_pages: i64, total_pages: i64) -> i64 {
    if max_pages <= 0 || max_pages >= total_pages {
        total_pages
    } else {
        max_pages
    }
}

/// Crawls one board of a community cafe through its JSON API
pub struct BoardCrawler {
    resolver: Resolver,
    config: Arc<BoardConfig>,
    collected: Arc<Mutex<Vec<Post>>>,
    sink: Arc<dyn PostSink>,
}

impl BoardCrawler {
    /// Creates a new board crawler
    ///
    /// # Arguments
    ///
    /// * `resolver` - Candidate resolver over the API client
    /// * `config` - Board identity, paging and concurrency settings
    /// * `sink` - Receives the full collection after a successful run
    pub fn new(resolver: Resolver, config: BoardConfig, sink: Arc<dyn PostSink>) -> Self {
        Self {
            resolver,
            config: Arc::new(config),
            collected: Arc::new(Mutex::new(Vec::new())),
            sink,
        }
    }

    /// Snapshot of every post collected so far, including after a failed run
    pub async fn collected(&self) -> Vec<Post> {
        self.collected.lock().await.clone()
    }

    /// Crawls the board
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Post>)` - Every collected post; page 1 first, later pages in
    ///   completion order
    /// * `Err(HarvestError)` - Page 1 could not be fetched, or the first
    ///   error raised by a later page
    pub async fn run(&self) -> Result<Vec<Post>, HarvestError> {
        let first = fetch_listing(&self.resolver, &self.config, 1).await?;
        let pages = pages_to_crawl(self.config.max_pages, first.total_pages);

        tracing::info!(
            "Crawling {} of {} pages of board {}/{} ({} concurrent)",
            pages,
            first.total_pages,
            self.config.cafe_id,
            self.config.board_id,
            self.config.concurrency
        );

        let posts = fetch_articles(&self.resolver, &self.config, first.stubs).await;
        tracing::info!("Page 1/{} done ({} posts)", pages, posts.len());
        self.collected.lock().await.extend(posts);

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let cancel = CancellationToken::new();
        let mut tasks = JoinSet::new();

        for page in 2..=pages {
            let resolver = self.resolver.clone();
            let config = Arc::clone(&self.config);
            let collected = Arc::clone(&self.collected);
            let semaphore = Arc::clone(&semaphore);
            let cancel = cancel.clone();

            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| HarvestError::Task(e.to_string()))?;

                if cancel.is_cancelled() {
                    tracing::debug!("Page {} cancelled before start", page);
                    return Ok(());
                }

                // Cancel while the permit is still held so no waiting page starts
                let listing = match fetch_listing(&resolver, &config, page).await {
                    Ok(listing) => listing,
                    Err(e) => {
                        cancel.cancel();
                        return Err(e);
                    }
                };
                let posts = fetch_articles(&resolver, &config, listing.stubs).await;
                let count = posts.len();
                collected.lock().await.extend(posts);

                tracing::info!("Page {}/{} done ({} posts)", page, pages, count);
                Ok::<(), HarvestError>(())
            });
        }

        let mut first_error = None;
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined
                .map_err(|e| HarvestError::Task(e.to_string()))
                .and_then(|result| result);

            if let Err(e) = outcome {
                if first_error.is_none() {
                    tracing::warn!("Board crawl failed, cancelling remaining pages: {}", e);
                    cancel.cancel();
                    first_error = Some(e);
                } else {
                    tracing::debug!("Additional page failure after cancel: {}", e);
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        let posts = self.collected().await;
        let key = BatchKey::BoardFull {
            cafe_id: self.config.cafe_id.clone(),
            board_id: self.config.board_id.clone(),
        };
        if let Err(e) = self.sink.persist(&posts, &key) {
            tracing::warn!("Failed to persist board crawl: {}", e);
        }

        tracing::info!("Board crawl finished: {} posts", posts.len());
        Ok(posts)
    }
}

async fn fetch_listing(
    resolver: &Resolver,
    config: &BoardConfig,
    page: i64,
) -> Result<ListingPage, HarvestError> {
    let vars = TemplateVars::new()
        .with("cafe_id", &config.cafe_id)
        .with("board_id", &config.board_id)
        .with("page", page)
        .with("page_size", config.page_size);
    let candidates = render_all(BOARD_LISTING, &config.api_base_url, &vars)?;

    let origin = config.origin.as_str();
    let cafe_id = config.cafe_id.as_str();
    let resolved = resolver
        .resolve(&candidates, |fetched| parse_listing(fetched, origin, cafe_id))
        .await?;

    Ok(resolved.value)
}

/// Fetches details for each stub in turn; a failed detail keeps the stub as is
async fn fetch_articles(
    resolver: &Resolver,
    config: &BoardConfig,
    stubs: Vec<ArticleStub>,
) -> Vec<Post> {
    let mut posts = Vec::with_capacity(stubs.len());

    for stub in stubs {
        let mut post = stub.into_post();

        match fetch_detail(resolver, config, &post).await {
            Ok(detail) => merge_detail(&mut post, detail),
            Err(e) => tracing::warn!("Failed to fetch article {}: {}", post.id, e),
        }

        if post.is_valid() {
            posts.push(post);
        } else {
            tracing::debug!("Dropping article {} with no title or content", post.id);
        }
    }

    posts
}

async fn fetch_detail(
    resolver: &Resolver,
    config: &BoardConfig,
    post: &Post,
) -> Result<ArticleDetail, HarvestError> {
    let vars = TemplateVars::new()
        .with("cafe_id", &config.cafe_id)
        .with("article_id", &post.id);
    let candidates = render_all(BOARD_DETAIL, &config.api_base_url, &vars)?;

    Ok(resolver.resolve(&candidates, parse_detail).await?.value)
}
