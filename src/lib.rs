//! Naver-Harvest: a resilient post and comment harvester
//!
//! This crate collects posts and comments from two surfaces of the same
//! platform: the markup-based blog and the JSON-API community board. Candidate
//! endpoints and markup selectors are tried in a fixed priority order, blog
//! pages are crawled sequentially with per-page fault tolerance, and board
//! pages are fanned out across a small bounded worker pool.

pub mod blog;
pub mod board;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod model;
pub mod output;
pub mod storage;

use thiserror::Error;

/// Main error type for harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Parse error for {url}: {message}")]
    Parse { url: String, message: String },

    #[error("All {attempts} candidates failed, last error: {last}")]
    AllCandidatesFailed {
        attempts: usize,
        last: Box<HarvestError>,
    },

    #[error("No candidates to resolve")]
    NoCandidates,

    #[error("Record {id} has neither title nor content")]
    InvalidRecord { id: String },

    #[error("Crawl task failed: {0}")]
    Task(String),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarvestError {
    /// Returns true for connection-level failures (including timeouts)
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }

    /// The HTTP status carried by this error, looking through resolver exhaustion
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::AllCandidatesFailed { last, .. } => last.status(),
            _ => None,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Session cookie missing: set `cookie` or the {0} environment variable")]
    MissingCookie(String),

    #[error("Invalid header value for {0}")]
    InvalidHeader(String),
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use blog::{BlogCrawlReport, BlogCrawler};
pub use board::BoardCrawler;
pub use config::Config;
pub use model::{Comment, Post, PostId};
