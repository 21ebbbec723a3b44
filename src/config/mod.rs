//! Configuration module for Naver-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use naver_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! if let Some(blog) = &config.blog {
//!     println!("Blog {} will be crawled for {} pages", blog.blog_id, blog.max_pages);
//! }
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BlogConfig, BoardConfig, Config, HttpConfig, OutputConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
