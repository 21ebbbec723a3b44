//! Candidate endpoint lists
//!
//! A candidate list is an ordered, immutable set of alternative ways to reach
//! one logical resource. Templates carry `{placeholder}` slots that are filled
//! from [`TemplateVars`] and joined onto a configured base URL, which keeps
//! the lists testable and lets tests point them at a mock server.

use crate::HarvestError;
use url::Url;

/// One request template: a path plus query parameters
#[derive(Debug, Clone, Copy)]
pub struct EndpointTemplate {
    /// Short label used in logs
    pub name: &'static str,
    pub path: &'static str,
    pub query: &'static [(&'static str, &'static str)],
}

/// A concrete request to try
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub name: &'static str,
    pub url: Url,
}

/// Values substituted into `{placeholder}` slots
#[derive(Debug, Clone, Default)]
pub struct TemplateVars {
    vars: Vec<(&'static str, String)>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        self.vars.push((key, value.to_string()));
        self
    }

    fn fill(&self, template: &str) -> String {
        self.vars.iter().fold(template.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{}}}", key), value)
        })
    }
}

impl EndpointTemplate {
    /// Renders this template against `base`
    pub fn render(&self, base: &str, vars: &TemplateVars) -> Result<RequestDescriptor, HarvestError> {
        let mut url = Url::parse(&format!(
            "{}{}",
            base.trim_end_matches('/'),
            vars.fill(self.path)
        ))?;

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in self.query {
                pairs.append_pair(key, &vars.fill(value));
            }
        }

        Ok(RequestDescriptor {
            name: self.name,
            url,
        })
    }
}

/// Renders a whole candidate list, keeping its order
pub fn render_all(
    templates: &[EndpointTemplate],
    base: &str,
    vars: &TemplateVars,
) -> Result<Vec<RequestDescriptor>, HarvestError> {
    templates.iter().map(|t| t.render(base, vars)).collect()
}

/// Blog listing pages, keyed by `blog_id` and `page`
///
/// The last candidate is the blog front page, which ignores the page number.
pub const BLOG_LISTING: &[EndpointTemplate] = &[
    EndpointTemplate {
        name: "post-list",
        path: "/PostList.naver",
        query: &[
            ("blogId", "{blog_id}"),
            ("from", "postList"),
            ("categoryNo", "0"),
            ("currentPage", "{page}"),
        ],
    },
    EndpointTemplate {
        name: "post-list-path",
        path: "/{blog_id}/postList",
        query: &[("currentPage", "{page}")],
    },
    EndpointTemplate {
        name: "front-page",
        path: "/{blog_id}",
        query: &[],
    },
];

/// Blog post pages, keyed by `blog_id` and `log_no`
pub const BLOG_DETAIL: &[EndpointTemplate] = &[
    EndpointTemplate {
        name: "post-path",
        path: "/{blog_id}/{log_no}",
        query: &[],
    },
    EndpointTemplate {
        name: "post-view",
        path: "/PostView.naver",
        query: &[("blogId", "{blog_id}"), ("logNo", "{log_no}")],
    },
    EndpointTemplate {
        name: "post-view-legacy",
        path: "/PostView.nhn",
        query: &[("blogId", "{blog_id}"), ("logNo", "{log_no}")],
    },
];

/// Board article list, keyed by `cafe_id`, `board_id`, `page`, `page_size`
pub const BOARD_LISTING: &[EndpointTemplate] = &[EndpointTemplate {
    name: "board-list-api",
    path: "/cafe-web/cafe-boardlist-api/v1/cafes/{cafe_id}/menus/{board_id}/articles",
    query: &[
        ("page", "{page}"),
        ("pageSize", "{page_size}"),
        ("sortBy", "TIME"),
        ("viewType", "L"),
    ],
}];

/// Board article detail, keyed by `cafe_id` and `article_id`
pub const BOARD_DETAIL: &[EndpointTemplate] = &[EndpointTemplate {
    name: "article-api",
    path: "/cafe-web/cafe-articleapi/v3/cafes/{cafe_id}/articles/{article_id}",
    query: &[("query", ""), ("useCafeId", "true"), ("requestFrom", "A")],
}];
