//! Markup extraction
//!
//! This module contains:
//! - Text normalization and identifier extraction
//! - Ordered-fallback field lookup over CSS selector groups
//! - Body extraction with noise stripping and short-block filtering
//! - The static selector configuration for the blog surface

mod field;
pub mod selectors;
mod text;

pub(crate) use field::parse_selector;
pub use field::{extract_content, extract_field, html_fragment_text, select_first};
pub use selectors::{Field, SelectorGroup};
pub use text::{extract_identifier, normalize, truncate_chars};
