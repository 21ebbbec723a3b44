//! Crawler plumbing shared by both surfaces
//!
//! This module contains:
//! - HTTP fetching with per-surface clients and error classification
//! - The pluggable politeness delay taken before every request
//! - Static candidate endpoint lists and their rendering
//! - The resolver that walks candidate lists in priority order

pub mod candidates;
mod delay;
mod fetcher;
mod resolver;

pub use candidates::{render_all, EndpointTemplate, RequestDescriptor, TemplateVars};
pub use delay::{NoDelay, PolitenessDelay, RandomDelay};
pub use fetcher::{build_http_client, Fetch, FetchedPage, Fetcher, HttpProfile, PRODUCT_HEADER};
pub use resolver::{Resolved, Resolver};
