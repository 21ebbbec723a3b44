//! Sequential, resilient blog crawl
//!
//! Pages are walked one after another and posts within a page one after
//! another. Nothing short of a bad configuration aborts a run: failed pages
//! and posts are logged, counted, and skipped.

use crate::blog::detail::read_post;
use crate::blog::listing::read_listing;
use crate::config::BlogConfig;
use crate::crawler::candidates::{BLOG_DETAIL, BLOG_LISTING};
use crate::crawler::{render_all, Resolver, TemplateVars};
use crate::model::{ArticleStub, Post};
use crate::output::{BatchKey, PostSink};
use crate::HarvestError;
use std::sync::Arc;

/// Outcome of a blog crawl
#[derive(Debug, Default)]
pub struct BlogCrawlReport {
    /// Valid posts in page order
    pub posts: Vec<Post>,
    /// Pages whose listing could not be fetched
    pub failed_pages: Vec<u32>,
    /// Pages that were fetched but produced no valid posts
    pub empty_pages: Vec<u32>,
    /// Posts dropped because their detail failed or was empty
    pub skipped_posts: usize,
}

impl BlogCrawlReport {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Crawls the listing pages of one blog
pub struct BlogCrawler {
    resolver: Resolver,
    config: BlogConfig,
    sink: Arc<dyn PostSink>,
}

impl BlogCrawler {
    /// Creates a new blog crawler
    ///
    /// # Arguments
    ///
    /// * `resolver` - Candidate resolver over the page client
    /// * `config` - Blog identity, page count and base URL
    /// * `sink` - Receives each page batch and the full run
    pub fn new(resolver: Resolver, config: BlogConfig, sink: Arc<dyn PostSink>) -> Self {
        Self {
            resolver,
            config,
            sink,
        }
    }

    /// Crawls pages `1..=max_pages`
    ///
    /// Never fails; problems show up in the returned report and the log.
    pub async fn run(&self) -> BlogCrawlReport {
        let blog_id = self.config.blog_id.as_str();
        let mut report = BlogCrawlReport::default();

        tracing::info!(
            "Crawling blog {} ({} pages)",
            blog_id,
            self.config.max_pages
        );

        for page in 1..=self.config.max_pages {
            tracing::info!("Processing page {}/{}", page, self.config.max_pages);

            let stubs = match self.fetch_listing(page).await {
                Ok(stubs) => stubs,
                Err(e) => {
                    tracing::warn!("Failed to fetch listing page {}: {}", page, e);
                    report.failed_pages.push(page);
                    continue;
                }
            };

            if stubs.is_empty() {
                tracing::info!("No posts found on page {}", page);
                report.empty_pages.push(page);
                continue;
            }

            let mut batch = Vec::with_capacity(stubs.len());
            for (i, stub) in stubs.iter().enumerate() {
                tracing::info!(
                    "  Page {} post {}/{} (id {})",
                    page,
                    i + 1,
                    stubs.len(),
                    stub.id
                );

                match self.fetch_post(stub).await {
                    Ok(post) => batch.push(post),
                    Err(HarvestError::InvalidRecord { id }) => {
                        tracing::debug!("Dropping post {} with no title or content", id);
                        report.skipped_posts += 1;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to fetch post {}: {}", stub.id, e);
                        report.skipped_posts += 1;
                    }
                }
            }

            if batch.is_empty() {
                tracing::info!("No valid posts on page {}", page);
                report.empty_pages.push(page);
                continue;
            }

            let key = BatchKey::BlogPage {
                blog_id: blog_id.to_string(),
                page,
            };
            if let Err(e) = self.sink.persist(&batch, &key) {
                tracing::warn!("Failed to persist page {}: {}", page, e);
            }

            tracing::info!("Page {}: {} posts", page, batch.len());
            report.posts.extend(batch);
        }

        if !report.posts.is_empty() {
            let key = BatchKey::BlogFull {
                blog_id: blog_id.to_string(),
            };
            if let Err(e) = self.sink.persist(&report.posts, &key) {
                tracing::warn!("Failed to persist full run: {}", e);
            }
        }

        tracing::info!(
            "Blog crawl finished: {} posts, {} failed pages, {} skipped posts",
            report.posts.len(),
            report.failed_pages.len(),
            report.skipped_posts
        );
        report
    }

    async fn fetch_listing(&self, page: u32) -> Result<Vec<ArticleStub>, HarvestError> {
        let vars = TemplateVars::new()
            .with("blog_id", &self.config.blog_id)
            .with("page", page);
        let candidates = render_all(BLOG_LISTING, &self.config.base_url, &vars)?;

        let base_url = self.config.base_url.as_str();
        let blog_id = self.config.blog_id.as_str();
        let resolved = self
            .resolver
            .resolve(&candidates, |fetched| {
                Ok(read_listing(&fetched.body, base_url, blog_id))
            })
            .await?;

        Ok(resolved.value)
    }

    async fn fetch_post(&self, stub: &ArticleStub) -> Result<Post, HarvestError> {
        let log_no = stub.id.to_string();
        let vars = TemplateVars::new()
            .with("blog_id", &self.config.blog_id)
            .with("log_no", &log_no);
        let candidates = render_all(BLOG_DETAIL, &self.config.base_url, &vars)?;

        let resolved = self
            .resolver
            .resolve(&candidates, |fetched| {
                Ok(read_post(&fetched.body, &log_no, &fetched.url))
            })
            .await?;

        let post = resolved.value;
        if !post.is_valid() {
            return Err(HarvestError::InvalidRecord { id: log_no });
        }
        Ok(post)
    }
}
