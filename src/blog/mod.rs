//! Blog surface: HTML listing and post pages
//!
//! This module contains:
//! - The listing reader turning a listing page into article stubs
//! - The detail reader turning a post page into a full post
//! - The sequential page crawler

mod crawler;
pub mod detail;
pub mod listing;

pub use crawler::{BlogCrawlReport, BlogCrawler};
pub use detail::{read_comments, read_post};
pub use listing::read_listing;
