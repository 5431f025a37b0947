// src/types/cursor.rs
//! The continuation token of a paginated feed.

use super::ValidationError;
use serde::Serialize;
use std::fmt;
use url::Url;

/// Where the next page of a feed lives, if anywhere.
///
/// The store hands back a fully-qualified URL for the next page, or null
/// when the feed is exhausted. The URL is opaque: the client never builds
/// or decomposes one, it only follows it verbatim. `End` is terminal —
/// no fetch is ever attempted past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCursor {
    /// The next page can be fetched at this address.
    Next(Url),
    /// The feed is exhausted.
    End,
}

impl PageCursor {
    /// Builds a cursor from the store's `next_page` field.
    ///
    /// `None` means the feed is exhausted; `Some` must hold a valid URL,
    /// anything else is a malformed response.
    pub fn from_next_page(next_page: Option<&str>) -> Result<Self, ValidationError> {
        match next_page {
            None => Ok(Self::End),
            Some(raw) => {
                let url = Url::parse(raw).map_err(|e| ValidationError::InvalidUrl {
                    url: raw.to_string(),
                    reason: e.to_string(),
                })?;
                Ok(Self::Next(url))
            }
        }
    }

    /// Whether further pages exist.
    pub fn has_more(&self) -> bool {
        matches!(self, Self::Next(_))
    }

    /// The continuation URL, if the feed has more pages.
    pub fn next_url(&self) -> Option<&Url> {
        match self {
            Self::Next(url) => Some(url),
            Self::End => None,
        }
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next(url) => write!(f, "{}", url),
            Self::End => write!(f, "(end of feed)"),
        }
    }
}

// Serializes as the raw URL or null — the same shape the store uses,
// so composed output mirrors the wire format.
impl Serialize for PageCursor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Next(url) => serializer.serialize_str(url.as_str()),
            Self::End => serializer.serialize_none(),
        }
    }
}
