//! Pagination types and traits
//!
//! Constants of the GtR paging protocol and the value types shared by the
//! cursor, the collection and the record stream.

use super::cursor::Cursor;
use crate::decode::Format;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

// ============================================================================
// Protocol Constants
// ============================================================================

/// Smallest page size the API accepts
pub const MIN_PAGE_SIZE: u32 = 25;

/// Largest page size the API accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: u32 = MIN_PAGE_SIZE;

/// Response header carrying the total number of records
pub const RECORD_COUNT_HEADER: &str = "link-records";

/// Response header carrying the total number of pages
pub const PAGE_COUNT_HEADER: &str = "link-pages";

/// Response header carrying the first/previous/next/last links
pub const LINK_HEADER: &str = "link";

/// Query parameter selecting the page
pub const PAGE_PARAM: &str = "page";

/// Query parameter selecting the page size
pub const PAGE_SIZE_PARAM: &str = "fetchSize";

/// Clamp a requested page size to the range the API accepts
pub fn constrain_page_size(page_size: Option<u32>) -> Option<u32> {
    page_size.map(|size| size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE))
}

// ============================================================================
// Link Relations
// ============================================================================

/// Relation of one entry in the `link` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rel {
    /// First page
    First,
    /// Page before the current one
    Previous,
    /// Page after the current one
    Next,
    /// Last page
    Last,
}

impl Rel {
    /// Parse an unquoted relation value such as `next`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "first" => Some(Rel::First),
            "previous" => Some(Rel::Previous),
            "next" => Some(Rel::Next),
            "last" => Some(Rel::Last),
            _ => None,
        }
    }
}

impl fmt::Display for Rel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rel::First => "first",
            Rel::Previous => "previous",
            Rel::Next => "next",
            Rel::Last => "last",
        };
        f.write_str(name)
    }
}

/// Where a navigation should move the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    /// Follow the `first` link
    First,
    /// Follow the `previous` link
    Previous,
    /// Follow the `next` link
    Next,
    /// Follow the `last` link
    Last,
    /// Jump to a page number, counted from 1
    Number(u32),
}

impl PageTarget {
    /// Link relation followed by this target, if it follows one
    pub fn rel(self) -> Option<Rel> {
        match self {
            PageTarget::First => Some(Rel::First),
            PageTarget::Previous => Some(Rel::Previous),
            PageTarget::Next => Some(Rel::Next),
            PageTarget::Last => Some(Rel::Last),
            PageTarget::Number(_) => None,
        }
    }
}

impl fmt::Display for PageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageTarget::Number(n) => write!(f, "page {n}"),
            other => match other.rel() {
                Some(rel) => write!(f, "{rel} page"),
                None => Ok(()),
            },
        }
    }
}

// ============================================================================
// Pages
// ============================================================================

/// One fetched page: the decoded body and the paging state parsed from the
/// same response. Both are always replaced together.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Decoded response body
    pub body: Value,
    /// Paging state, absent when the response carried no paging headers
    pub cursor: Option<Cursor>,
}

impl Page {
    /// Create a page
    pub fn new(body: Value, cursor: Option<Cursor>) -> Self {
        Self { body, cursor }
    }
}

/// Fetches one page of a collection
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` in `format`, overriding the `page` and `fetchSize`
    /// parameters when given. Any failure is returned as `Err`.
    async fn fetch_page(
        &self,
        url: &str,
        format: Format,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<Page>;
}

// ============================================================================
// Stream Options
// ============================================================================

/// How a record stream starts and when it stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamOptions {
    /// Move to the first page before yielding anything
    pub reset_to_first_page: bool,
    /// Stop once the starting page is exhausted
    pub stop_at_page_boundary: bool,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            reset_to_first_page: true,
            stop_at_page_boundary: false,
        }
    }
}

impl StreamOptions {
    /// Stream from wherever the collection currently is
    pub fn from_current_page() -> Self {
        Self {
            reset_to_first_page: false,
            ..Self::default()
        }
    }

    /// Yield only the records of a single page
    #[must_use]
    pub fn single_page(mut self) -> Self {
        self.stop_at_page_boundary = true;
        self
    }
}
