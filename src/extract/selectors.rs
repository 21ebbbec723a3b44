//! Static selector configuration for the blog surface
//!
//! Every logical field has an ordered list of CSS selectors. Order is trial
//! priority: the first selector that yields non-empty text wins. These lists
//! are data, so they can be tested without any network access.

/// Logical field a selector group locates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Writer,
    WriteDate,
    Content,
    ListingItem,
    ListingLink,
    ListingTitle,
    CommentContainer,
    CommentText,
    CommentWriter,
    CommentDate,
}

/// Ordered selectors for one logical field
#[derive(Debug, Clone, Copy)]
pub struct SelectorGroup {
    pub field: Field,
    pub selectors: &'static [&'static str],
}

/// Sub-nodes stripped from content blocks before their text is read
pub const NOISE_SELECTOR: &str =
    "img, .se-sticker, .se-module-oglink, .se-map-container, .se-file-block, script, style";

/// Content blocks must be longer than this many characters to count
pub const MIN_CONTENT_BLOCK_CHARS: usize = 10;

pub const LISTING_ITEM: SelectorGroup = SelectorGroup {
    field: Field::ListingItem,
    selectors: &[
        ".post-item",
        ".blog2_series",
        ".item_post",
        ".post_area",
        "#content-area .post",
        ".list_post .post",
        ".area_list_post .post",
        ".blog_list .post",
    ],
};

pub const LISTING_LINK: SelectorGroup = SelectorGroup {
    field: Field::ListingLink,
    selectors: &[
        "a[href*='logNo=']",
        ".link_post",
        ".post_title a",
        ".title a",
        "a.link_title",
    ],
};

pub const LISTING_TITLE: SelectorGroup = SelectorGroup {
    field: Field::ListingTitle,
    selectors: &[".post_title", ".title", ".subject", ".tit"],
};

pub const TITLE: SelectorGroup = SelectorGroup {
    field: Field::Title,
    selectors: &[
        ".se-title-text",
        ".pcol1 .itemSubjectBoldfont",
        ".tit_area .tit",
        ".post_title",
        ".title_area .title",
        "#content-area .post_title",
        ".se-module-text h1",
        ".se-module-text h2",
        ".se-module-text .se-text-paragraph:first-child",
    ],
};

pub const WRITER: SelectorGroup = SelectorGroup {
    field: Field::Writer,
    selectors: &[
        ".nick_name",
        ".blog_author .author_name",
        ".author",
        ".writer",
        ".nickname",
        ".blog_name",
    ],
};

pub const WRITE_DATE: SelectorGroup = SelectorGroup {
    field: Field::WriteDate,
    selectors: &[
        ".se_time",
        ".blog_header_info .date",
        "._postContents .post_info .date",
        ".post_date",
        ".date",
        ".write_date",
    ],
};

pub const CONTENT: SelectorGroup = SelectorGroup {
    field: Field::Content,
    selectors: &[
        ".se-main-container",
        ".post_content",
        ".se-component.se-text.se-section",
        ".sect_dsc",
        ".post_ct",
        "#content-area .post_content",
        ".se-module-text",
        ".pcol1 .post_content",
    ],
};

pub const COMMENT_CONTAINER: SelectorGroup = SelectorGroup {
    field: Field::CommentContainer,
    selectors: &[
        ".comment_area .comment_item",
        "._commentWrapper .comment_row",
        ".comment_list .comment",
        ".cmt_area .cmt_item",
    ],
};

// Comment parts are selector lists: the first match in document order wins.
pub const COMMENT_TEXT: SelectorGroup = SelectorGroup {
    field: Field::CommentText,
    selectors: &[".comment_text, .text_comment, .cmt_text"],
};

pub const COMMENT_WRITER: SelectorGroup = SelectorGroup {
    field: Field::CommentWriter,
    selectors: &[".comment_nick, .author_name, .cmt_nick"],
};

pub const COMMENT_DATE: SelectorGroup = SelectorGroup {
    field: Field::CommentDate,
    selectors: &[".comment_date, .date, .cmt_date"],
};

/// Every group, for validation and diagnostics
pub const ALL_GROUPS: &[SelectorGroup] = &[
    LISTING_ITEM,
    LISTING_LINK,
    LISTING_TITLE,
    TITLE,
    WRITER,
    WRITE_DATE,
    CONTENT,
    COMMENT_CONTAINER,
    COMMENT_TEXT,
    COMMENT_WRITER,
    COMMENT_DATE,
];
