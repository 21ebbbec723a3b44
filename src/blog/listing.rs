//! Blog listing page reader
//!
//! Turns a listing page into article stubs. The first item selector that
//! matches anything decides the page layout; entries without an identifier
//! or a title are skipped.

use crate::extract::selectors::{LISTING_ITEM, LISTING_LINK, LISTING_TITLE};
use crate::extract::{extract_field, extract_identifier, normalize, parse_selector, select_first};
use crate::model::{ArticleStub, PostId};
use scraper::{ElementRef, Html, Selector};

/// Reads article stubs from a blog listing page
///
/// # Arguments
///
/// * `html` - The listing page markup
/// * `base_url` - Blog base URL used for canonical post links
/// * `blog_id` - The blog being crawled
pub fn read_listing(html: &str, base_url: &str, blog_id: &str) -> Vec<ArticleStub> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    for item_selector in LISTING_ITEM.selectors {
        let Some(parsed) = parse_selector(item_selector) else {
            continue;
        };

        let items: Vec<ElementRef<'_>> = root.select(&parsed).collect();
        if items.is_empty() {
            continue;
        }

        tracing::debug!(
            "Listing layout {:?} matched {} items",
            item_selector,
            items.len()
        );
        return items
            .into_iter()
            .filter_map(|item| read_item(item, base_url, blog_id))
            .collect();
    }

    // Many blogs render their post list inside a frame
    if let Ok(frames) = Selector::parse("iframe[src]") {
        for frame in root.select(&frames) {
            tracing::debug!(
                "No listing items; page embeds frame {}",
                frame.value().attr("src").unwrap_or_default()
            );
        }
    }

    Vec::new()
}

fn read_item(item: ElementRef<'_>, base_url: &str, blog_id: &str) -> Option<ArticleStub> {
    let mut href = "";
    let mut title = String::new();

    for link_selector in LISTING_LINK.selectors {
        let Some(link) = select_first(item, link_selector) else {
            continue;
        };
        if let Some(value) = link.value().attr("href") {
            href = value;
            title = normalize(&link.text().collect::<String>());
            break;
        }
    }

    if title.is_empty() {
        title = extract_field(item, LISTING_TITLE.selectors);
    }

    let id = extract_identifier(href);
    if id.is_empty() || title.is_empty() {
        tracing::trace!("Skipping listing entry (href {:?}, title {:?})", href, title);
        return None;
    }

    tracing::debug!("Found post {}: {}", id, title);
    Some(ArticleStub {
        url: format!("{}/{}/{}", base_url.trim_end_matches('/'), blog_id, id),
        id: PostId::Text(id),
        title,
        writer: String::new(),
        write_date: String::new(),
        board: None,
    })
}
