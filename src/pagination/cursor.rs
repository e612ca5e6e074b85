//! Paging state parsed from response headers
//!
//! The API never states which page a response is. It sends a record count,
//! a page count and a `link` header such as
//!
//! ```text
//! <https://host/api/project/?page=1&fetchSize=25>;rel=first,
//! <https://host/api/project/?page=2&fetchSize=25>;rel=previous,
//! <https://host/api/project/?page=4&fetchSize=25>;rel=next,
//! <https://host/api/project/?page=9&fetchSize=25>;rel=last
//! ```
//!
//! and the current page has to be inferred from the neighbouring links.

use super::types::{
    Rel, LINK_HEADER, PAGE_COUNT_HEADER, PAGE_PARAM, PAGE_SIZE_PARAM, RECORD_COUNT_HEADER,
};
use crate::query::get_query_param;
use reqwest::header::HeaderMap;

/// Immutable paging state of one response
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cursor {
    record_count: u64,
    page_count: u32,
    first_url: Option<String>,
    previous_url: Option<String>,
    next_url: Option<String>,
    last_url: Option<String>,
}

impl Cursor {
    /// Create a cursor with counts and no links
    pub fn new(record_count: u64, page_count: u32) -> Self {
        Self {
            record_count,
            page_count,
            ..Self::default()
        }
    }

    /// Set the link for `rel`; an empty URL counts as no link
    #[must_use]
    pub fn with_link(mut self, rel: Rel, url: impl Into<String>) -> Self {
        let url = url.into();
        let url = (!url.is_empty()).then_some(url);
        match rel {
            Rel::First => self.first_url = url,
            Rel::Previous => self.previous_url = url,
            Rel::Next => self.next_url = url,
            Rel::Last => self.last_url = url,
        }
        self
    }

    /// Parse the paging headers of a response.
    ///
    /// Returns `None` when a header is missing, a count is not an integer or
    /// a link entry is malformed. Entries with an unknown or quoted relation
    /// are ignored.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
        Self::parse(
            header(RECORD_COUNT_HEADER),
            header(PAGE_COUNT_HEADER),
            header(LINK_HEADER),
        )
    }

    /// Parse raw header values
    pub fn parse(
        record_count: Option<&str>,
        page_count: Option<&str>,
        link: Option<&str>,
    ) -> Option<Self> {
        let record_count = record_count?.trim().parse().ok()?;
        let page_count = page_count?.trim().parse().ok()?;
        let mut cursor = Self::new(record_count, page_count);

        for entry in link?.split(',').filter(|e| !e.trim().is_empty()) {
            let (target, params) = entry.split_once(';')?;
            let url = target
                .trim()
                .strip_prefix('<')
                .and_then(|t| t.strip_suffix('>'))?;

            let rel = params
                .split(';')
                .filter_map(|param| param.trim().strip_prefix("rel="))
                .find_map(Rel::parse);
            if let Some(rel) = rel {
                cursor = cursor.with_link(rel, url);
            }
        }

        Some(cursor)
    }

    /// Total number of records in the collection
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Total number of pages in the collection
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Link to the first page
    pub fn first_url(&self) -> Option<&str> {
        self.first_url.as_deref()
    }

    /// Link to the previous page
    pub fn previous_url(&self) -> Option<&str> {
        self.previous_url.as_deref()
    }

    /// Link to the next page
    pub fn next_url(&self) -> Option<&str> {
        self.next_url.as_deref()
    }

    /// Link to the last page
    pub fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }

    /// Link for `rel`
    pub fn link(&self, rel: Rel) -> Option<&str> {
        match rel {
            Rel::First => self.first_url(),
            Rel::Previous => self.previous_url(),
            Rel::Next => self.next_url(),
            Rel::Last => self.last_url(),
        }
    }

    /// Number of the page this cursor describes, counted from 1.
    ///
    /// No previous link means page 1 and no next link means the last page.
    /// Otherwise the number is one past the previous link's `page`, or one
    /// before the next link's. `None` when neither link carries a usable
    /// `page` parameter.
    pub fn current_page_number(&self) -> Option<u32> {
        let Some(previous) = self.previous_url() else {
            return Some(1);
        };
        let Some(next) = self.next_url() else {
            return Some(self.page_count);
        };

        page_param(previous)
            .and_then(|page| page.checked_add(1))
            .or_else(|| page_param(next).and_then(|page| page.checked_sub(1)))
    }

    /// Page size, read from the `fetchSize` parameter of the first link
    pub fn current_page_size(&self) -> Option<u32> {
        let first = self.first_url()?;
        get_query_param(first, PAGE_SIZE_PARAM)?.trim().parse().ok()
    }
}

fn page_param(url: &str) -> Option<u32> {
    get_query_param(url, PAGE_PARAM)?.trim().parse().ok()
}
