use crate::ConfigError;
use serde::Deserialize;

/// Main configuration structure for Naver-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    pub blog: Option<BlogConfig>,
    pub board: Option<BoardConfig>,
    pub output: OutputConfig,
}

/// HTTP client and politeness configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HttpConfig {
    /// User agent sent to the blog surface
    #[serde(default = "default_page_user_agent")]
    pub user_agent: String,

    /// User agent sent to the board API
    #[serde(default = "default_api_user_agent")]
    pub api_user_agent: String,

    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Lower bound of the randomized pre-request delay (milliseconds)
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    /// Exclusive upper bound of the randomized pre-request delay (milliseconds)
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Timeout for markup page fetches
    #[serde(default = "default_page_timeout_secs")]
    pub page_timeout_secs: u64,

    /// Timeout for board API calls
    #[serde(default = "default_api_timeout_secs")]
    pub api_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_page_user_agent(),
            api_user_agent: default_api_user_agent(),
            accept_language: default_accept_language(),
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            page_timeout_secs: default_page_timeout_secs(),
            api_timeout_secs: default_api_timeout_secs(),
        }
    }
}

/// Blog surface configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BlogConfig {
    pub blog_id: String,

    /// Pages are crawled from 1 up to and including this number
    #[serde(default = "default_blog_max_pages")]
    pub max_pages: u32,

    #[serde(default = "default_blog_base_url")]
    pub base_url: String,
}

/// Board API surface configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BoardConfig {
    pub cafe_id: String,
    pub board_id: String,

    /// Zero or negative crawls every page the platform reports
    #[serde(default)]
    pub max_pages: i64,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Sent as both Referer and Origin
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Session cookie; takes precedence over `cookie-env`
    pub cookie: Option<String>,

    #[serde(default = "default_cookie_env")]
    pub cookie_env: String,

    /// Maximum number of page tasks running at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl BoardConfig {
    /// Resolves the session cookie from the config or the environment
    pub fn resolve_cookie(&self) -> Result<String, ConfigError> {
        if let Some(cookie) = self.cookie.as_deref().filter(|c| !c.trim().is_empty()) {
            return Ok(cookie.to_string());
        }

        std::env::var(&self.cookie_env)
            .ok()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingCookie(self.cookie_env.clone()))
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory receiving one JSON file per persisted batch
    pub directory: String,

    /// Optional SQLite database that also receives every batch
    pub database_path: Option<String>,
}

fn default_page_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_api_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36".to_string()
}

fn default_accept_language() -> String {
    "ko-KR,ko;q=0.9,en;q=0.8".to_string()
}

fn default_min_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    3000
}

fn default_page_timeout_secs() -> u64 {
    30
}

fn default_api_timeout_secs() -> u64 {
    10
}

fn default_blog_max_pages() -> u32 {
    3
}

fn default_blog_base_url() -> String {
    "https://blog.naver.com".to_string()
}

fn default_page_size() -> u32 {
    15
}

fn default_api_base_url() -> String {
    "https://apis.naver.com".to_string()
}

fn default_origin() -> String {
    "https://cafe.naver.com".to_string()
}

fn default_cookie_env() -> String {
    "NAVER_COOKIE".to_string()
}

fn default_concurrency() -> usize {
    3
}
