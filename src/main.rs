//! Naver-Harvest main entry point
//!
//! This is the command-line interface for the blog and board harvester.

use clap::{Parser, ValueEnum};
use naver_harvest::config::{load_config_with_hash, BlogConfig, BoardConfig, Config, HttpConfig};
use naver_harvest::crawler::candidates::{BLOG_DETAIL, BLOG_LISTING, BOARD_LISTING};
use naver_harvest::crawler::{
    build_http_client, render_all, Fetcher, HttpProfile, PolitenessDelay, RandomDelay, Resolver,
    TemplateVars,
};
use naver_harvest::output::{print_summary, JsonFileSink, MultiSink, PostSink, SqliteSink};
use naver_harvest::storage::{open_storage, PostStore};
use naver_harvest::{BlogCrawler, BoardCrawler};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Naver-Harvest: collects posts and comments from blogs and cafe boards
///
/// Blog pages are crawled one at a time and failures are skipped. Board pages
/// are crawled a few at a time and the first failure stops the run.
#[derive(Parser, Debug)]
#[command(name = "naver-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Harvests posts and comments from blogs and cafe boards", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Which surface to crawl
    #[arg(value_enum)]
    surface: Surface,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the first requests without fetching anything
    #[arg(long)]
    dry_run: bool,

    /// Override the configured page cap for this run
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Surface {
    Blog,
    Board,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(max_pages) = cli.max_pages {
        apply_max_pages(&mut config, max_pages);
    }

    match cli.surface {
        Surface::Blog => {
            let blog = config
                .blog
                .clone()
                .ok_or("No [blog] section in configuration")?;
            if cli.dry_run {
                handle_blog_dry_run(&config.http, &blog)?;
            } else {
                handle_blog(&config, blog).await?;
            }
        }
        Surface::Board => {
            let board = config
                .board
                .clone()
                .ok_or("No [board] section in configuration")?;
            if cli.dry_run {
                handle_board_dry_run(&config.http, &board)?;
            } else {
                handle_board(&config, board).await?;
            }
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("naver_harvest=info,warn"),
            1 => EnvFilter::new("naver_harvest=debug,info"),
            2 => EnvFilter::new("naver_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn apply_max_pages(config: &mut Config, max_pages: u32) {
    if let Some(blog) = config.blog.as_mut() {
        blog.max_pages = max_pages;
    }
    if let Some(board) = config.board.as_mut() {
        board.max_pages = i64::from(max_pages);
    }
}

fn build_delay(http: &HttpConfig) -> Arc<dyn PolitenessDelay> {
    Arc::new(RandomDelay::new(http.min_delay_ms, http.max_delay_ms))
}

/// Builds the sink chain: JSON files always, SQLite when a database is configured
fn build_sink(
    config: &Config,
) -> Result<(Arc<dyn PostSink>, Option<Arc<Mutex<dyn PostStore + Send>>>), Box<dyn std::error::Error>>
{
    let mut sink = MultiSink::new().with(JsonFileSink::new(&config.output.directory));
    let mut store: Option<Arc<Mutex<dyn PostStore + Send>>> = None;

    if let Some(path) = &config.output.database_path {
        let storage = open_storage(Path::new(path))?;
        let shared: Arc<Mutex<dyn PostStore + Send>> = Arc::new(Mutex::new(storage));
        sink = sink.with(SqliteSink::new(Arc::clone(&shared)));
        store = Some(shared);
    }

    tracing::info!(
        "Writing to {} ({} sinks)",
        config.output.directory,
        sink.len()
    );
    Ok((Arc::new(sink), store))
}

fn log_store_totals(store: Option<Arc<Mutex<dyn PostStore + Send>>>) {
    let Some(store) = store else {
        return;
    };
    let Ok(store) = store.lock() else {
        return;
    };
    match (store.count_posts(), store.count_comments()) {
        (Ok(posts), Ok(comments)) => {
            tracing::info!("Database holds {} posts and {} comments", posts, comments)
        }
        (Err(e), _) | (_, Err(e)) => tracing::warn!("Failed to read database totals: {}", e),
    }
}

/// Handles the --dry-run mode for a blog: shows the first requests
fn handle_blog_dry_run(
    http: &HttpConfig,
    blog: &BlogConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Naver-Harvest Dry Run (blog) ===\n");
    print_http(http);

    println!("\nBlog:");
    println!("  Blog id: {}", blog.blog_id);
    println!("  Pages: {}", blog.max_pages);
    println!("  Base URL: {}", blog.base_url);

    let vars = TemplateVars::new()
        .with("blog_id", &blog.blog_id)
        .with("page", 1)
        .with("log_no", "LOG_NO");
    println!("\nListing candidates (page 1):");
    for request in render_all(BLOG_LISTING, &blog.base_url, &vars)? {
        println!("  - [{}] {}", request.name, request.url);
    }
    println!("\nPost candidates:");
    for request in render_all(BLOG_DETAIL, &blog.base_url, &vars)? {
        println!("  - [{}] {}", request.name, request.url);
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the --dry-run mode for a board: shows the first listing request
fn handle_board_dry_run(
    http: &HttpConfig,
    board: &BoardConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Naver-Harvest Dry Run (board) ===\n");
    print_http(http);

    println!("\nBoard:");
    println!("  Cafe id: {}", board.cafe_id);
    println!("  Board id: {}", board.board_id);
    if board.max_pages > 0 {
        println!("  Pages: up to {}", board.max_pages);
    } else {
        println!("  Pages: all");
    }
    println!("  Page size: {}", board.page_size);
    println!("  Concurrency: {}", board.concurrency);
    println!(
        "  Cookie: {}",
        if board.resolve_cookie().is_ok() {
            "present"
        } else {
            "missing"
        }
    );

    let vars = TemplateVars::new()
        .with("cafe_id", &board.cafe_id)
        .with("board_id", &board.board_id)
        .with("page", 1)
        .with("page_size", board.page_size);
    println!("\nListing request (page 1):");
    for request in render_all(BOARD_LISTING, &board.api_base_url, &vars)? {
        println!("  - [{}] {}", request.name, request.url);
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

fn print_http(http: &HttpConfig) {
    println!("HTTP:");
    println!("  User agent: {}", http.user_agent);
    println!("  Delay: {}-{}ms", http.min_delay_ms, http.max_delay_ms);
    println!(
        "  Timeouts: page {}s, api {}s",
        http.page_timeout_secs, http.api_timeout_secs
    );
}

/// Handles a blog crawl
async fn handle_blog(config: &Config, blog: BlogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = build_http_client(&HttpProfile::page(&config.http)?)?;
    let fetcher = Fetcher::new(client, build_delay(&config.http));
    let resolver = Resolver::new(Arc::new(fetcher));
    let (sink, store) = build_sink(config)?;

    let crawler = BlogCrawler::new(resolver, blog, sink);
    let report = crawler.run().await;

    if !report.failed_pages.is_empty() {
        tracing::warn!("Pages that could not be fetched: {:?}", report.failed_pages);
    }
    if !report.empty_pages.is_empty() {
        tracing::info!("Pages with no posts: {:?}", report.empty_pages);
    }

    log_store_totals(store);
    print_summary(&report.posts);
    Ok(())
}

/// Handles a board crawl
async fn handle_board(
    config: &Config,
    board: BoardConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let cookie = board.resolve_cookie()?;
    let client = build_http_client(&HttpProfile::api(&config.http, &board, &cookie)?)?;
    let fetcher = Fetcher::new(client, build_delay(&config.http));
    let resolver = Resolver::new(Arc::new(fetcher));
    let (sink, store) = build_sink(config)?;

    let crawler = BoardCrawler::new(resolver, board, sink);
    match crawler.run().await {
        Ok(posts) => {
            tracing::info!("Crawl completed successfully");
            log_store_totals(store);
            print_summary(&posts);
            Ok(())
        }
        Err(e) => {
            let partial = crawler.collected().await;
            tracing::error!(
                "Crawl failed after collecting {} posts: {}",
                partial.len(),
                e
            );
            Err(e.into())
        }
    }
}
