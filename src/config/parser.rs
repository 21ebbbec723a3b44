use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so harvested batches can be traced back to the exact
/// selector and endpoint settings that produced them.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[http]
min-delay-ms = 500
max-delay-ms = 1500

[blog]
blog-id = "someblog"
max-pages = 5

[board]
cafe-id = "10050146"
board-id = "34"
max-pages = 2
cookie = "NID_AUT=abc; NID_SES=def"

[output]
directory = "./output"
database-path = "./harvest.db"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.http.min_delay_ms, 500);
        assert_eq!(config.http.page_timeout_secs, 30);
        assert_eq!(config.http.api_timeout_secs, 10);

        let blog = config.blog.unwrap();
        assert_eq!(blog.blog_id, "someblog");
        assert_eq!(blog.max_pages, 5);
        assert_eq!(blog.base_url, "https://blog.naver.com");

        let board = config.board.unwrap();
        assert_eq!(board.page_size, 15);
        assert_eq!(board.concurrency, 3);
        assert_eq!(board.resolve_cookie().unwrap(), "NID_AUT=abc; NID_SES=def");

        assert_eq!(config.output.database_path.as_deref(), Some("./harvest.db"));
    }

    #[test]
    fn test_defaults_without_http_section() {
        let config = parse_config(
            r#"
[blog]
blog-id = "someblog"

[output]
directory = "out"
"#,
        )
        .unwrap();

        assert_eq!(config.http.min_delay_ms, 1000);
        assert_eq!(config.http.max_delay_ms, 3000);
        assert_eq!(config.blog.unwrap().max_pages, 3);
        assert!(config.board.is_none());
    }

    #[test]
    fn test_missing_cookie() {
        let config = parse_config(
            r#"
[board]
cafe-id = "1"
board-id = "2"
cookie-env = "NAVER_HARVEST_TEST_UNSET_COOKIE"

[output]
directory = "out"
"#,
        )
        .unwrap();

        let result = config.board.unwrap().resolve_cookie();
        assert!(matches!(result, Err(ConfigError::MissingCookie(_))));
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[board]
cafe-id = "1"
board-id = "2"
concurrency = 0

[output]
directory = "out"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
