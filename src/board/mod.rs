//! Community board surface: JSON listing and article APIs
//!
//! This module contains:
//! - Wire types for the listing and article payloads
//! - The bounded-concurrency page crawler

pub mod api;
mod crawler;

pub use api::{format_epoch_millis, format_epoch_millis_in};
pub use crawler::{pages_to_crawl, BoardCrawler};
