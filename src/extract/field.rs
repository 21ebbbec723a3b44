//! Ordered-fallback field extraction over parsed markup
//!
//! All lookups work on an [`ElementRef`] scope so the same helpers serve whole
//! documents (`document.root_element()`) and listing items alike.

use crate::extract::selectors::{MIN_CONTENT_BLOCK_CHARS, NOISE_SELECTOR};
use crate::extract::text::normalize;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashSet;

/// Parses a selector string, logging and skipping ones that do not parse
pub(crate) fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!("Skipping invalid selector {:?}: {:?}", selector, e);
            None
        }
    }
}

/// Returns the first element under `scope` matching `selector`
pub fn select_first<'a>(scope: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let parsed = parse_selector(selector)?;
    scope.select(&parsed).next()
}

/// Returns the normalized text of the first non-empty selector match
///
/// Selectors are tried in order and only the first matching element of each
/// selector is read. No merging across selectors. An empty string means the
/// field is absent, which is not an error.
pub fn extract_field(scope: ElementRef<'_>, selectors: &[&str]) -> String {
    for selector in selectors {
        let Some(element) = select_first(scope, selector) else {
            continue;
        };

        let text = normalize(&element.text().collect::<String>());
        if !text.is_empty() {
            tracing::trace!("Field matched selector {:?}", selector);
            return text;
        }
    }

    String::new()
}

/// Extracts the body text of a post
///
/// For each selector in order, every matched element is read with noise
/// sub-nodes skipped; blocks longer than [`MIN_CONTENT_BLOCK_CHARS`]
/// characters qualify. The first selector with at least one qualifying block
/// wins, and its blocks are joined by newlines and normalized again.
pub fn extract_content(scope: ElementRef<'_>, selectors: &[&str]) -> String {
    let Some(noise) = parse_selector(NOISE_SELECTOR) else {
        return String::new();
    };

    for selector in selectors {
        let Some(parsed) = parse_selector(selector) else {
            continue;
        };

        let blocks: Vec<String> = scope
            .select(&parsed)
            .map(|element| normalize(&visible_text(element, &noise)))
            .filter(|block| block.chars().count() > MIN_CONTENT_BLOCK_CHARS)
            .collect();

        if !blocks.is_empty() {
            tracing::trace!(
                "Content matched selector {:?} with {} blocks",
                selector,
                blocks.len()
            );
            return normalize(&blocks.join("\n"));
        }
    }

    String::new()
}

/// Normalized visible text of a markup fragment, noise nodes excluded
pub fn html_fragment_text(fragment: &str) -> String {
    let Some(noise) = parse_selector(NOISE_SELECTOR) else {
        return String::new();
    };
    let parsed = Html::parse_fragment(fragment);
    normalize(&visible_text(parsed.root_element(), &noise))
}

/// Elements whose boundaries separate words even without whitespace
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "tr", "td", "th",
    "table", "blockquote", "section", "pre", "hr",
];

fn is_block(node: &Node) -> bool {
    node.as_element()
        .is_some_and(|element| BLOCK_TAGS.contains(&element.name()))
}

/// Concatenates descendant text nodes that are not inside a noise node
///
/// Block element boundaries become spaces so adjacent paragraphs do not
/// run together.
fn visible_text(element: ElementRef<'_>, noise: &Selector) -> String {
    let noise_ids: HashSet<_> = element.select(noise).map(|n| n.id()).collect();

    let mut text = String::new();
    for node in element.descendants() {
        if is_block(node.value()) {
            text.push(' ');
            continue;
        }
        let Some(fragment) = node.value().as_text() else {
            continue;
        };

        let hidden = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != element.id())
            .any(|ancestor| noise_ids.contains(&ancestor.id()));
        if hidden {
            continue;
        }

        if node.prev_sibling().is_some_and(|sibling| is_block(sibling.value())) {
            text.push(' ');
        }
        text.push_str(fragment);
    }
    text
}
