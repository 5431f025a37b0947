// src/model.rs
//! The domain model: posts as the renderer consumes them.
//!
//! Everything here is immutable once constructed. Raw store documents are
//! validated into these types at the client boundary; nothing downstream
//! ever touches ad-hoc JSON.

use crate::types::{PublishDate, Uid};
use serde::Serialize;
use std::fmt;

/// One entry in the post feed.
///
/// Carries exactly the fields the list page renders — title, subtitle,
/// author, publication date — plus the UID that links to the detail page.
/// All other store metadata is dropped during mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    pub uid: Uid,
    pub first_publication_date: Option<PublishDate>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// A full post as the detail page renders it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDetail {
    pub uid: Uid,
    pub first_publication_date: Option<PublishDate>,
    pub title: String,
    pub banner_url: String,
    pub author: String,
    pub sections: Vec<Section>,
}

/// A heading plus its body blocks, in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub heading: String,
    pub blocks: Vec<TextBlock>,
}

/// One renderable block of text with its inline formatting spans.
///
/// `spans` is always present — a block with no formatting carries an
/// empty list, never a missing field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub text: String,
    pub kind: BlockKind,
    pub spans: Vec<Span>,
}

/// The kind of a body block, as a typed vocabulary.
///
/// The store names kinds with strings; the known ones get variants so
/// rendering can match without string comparison, and anything new passes
/// through untouched rather than failing the whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Preformatted,
    ListItem,
    OrderedListItem,
    Unknown(String),
}

impl BlockKind {
    /// Parse a store block-type string into the typed vocabulary.
    pub fn from_api(kind: &str) -> Self {
        match kind {
            "paragraph" => Self::Paragraph,
            "preformatted" => Self::Preformatted,
            "list-item" => Self::ListItem,
            "o-list-item" => Self::OrderedListItem,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The store's name for this kind — the inverse of [`from_api`](Self::from_api).
    pub fn as_api_str(&self) -> &str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Preformatted => "preformatted",
            Self::ListItem => "list-item",
            Self::OrderedListItem => "o-list-item",
            Self::Unknown(other) => other,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_api_str())
    }
}

impl Serialize for BlockKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_api_str())
    }
}

/// The list page's render contract: summaries plus the continuation
/// cursor, exactly what the renderer needs to show the feed and its
/// "load more" control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedView {
    pub posts: Vec<PostSummary>,
    pub next_page: crate::types::PageCursor,
}

/// The detail page's render contract: the post plus its computed
/// reading time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostView {
    pub post: PostDetail,
    pub reading_minutes: u32,
}

/// An inline formatting annotation over a text range.
///
/// The two variants make "data present only for reference-type spans"
/// impossible to violate: a plain annotation physically has no `data`
/// field to serialize, and a reference always has one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Span {
    /// Pure formatting: bold, italic, etc. Serializes without a `data` key.
    Annotation { start: usize, end: usize, kind: String },
    /// A link or similar reference carrying a structured payload.
    Reference {
        start: usize,
        end: usize,
        kind: String,
        data: serde_json::Map<String, serde_json::Value>,
    },
}

impl Span {
    pub fn start(&self) -> usize {
        match self {
            Self::Annotation { start, .. } | Self::Reference { start, .. } => *start,
        }
    }

    pub fn end(&self) -> usize {
        match self {
            Self::Annotation { end, .. } | Self::Reference { end, .. } => *end,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::Annotation { kind, .. } | Self::Reference { kind, .. } => kind,
        }
    }

    pub fn data(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        match self {
            Self::Annotation { .. } => None,
            Self::Reference { data, .. } => Some(data),
        }
    }
}
