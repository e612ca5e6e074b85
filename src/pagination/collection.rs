//! Paged collection
//!
//! Holds the current page of one collection endpoint and moves between pages.

use super::cursor::Cursor;
use super::stream::RecordStream;
use super::types::{Page, PageFetcher, PageTarget, StreamOptions};
use crate::decode::Format;
use crate::error::{Error, Result};
use crate::record::{Listing, Record};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// The current page of a paged collection.
///
/// Navigation never leaves a half-updated collection: the body and cursor
/// are swapped together, and only after the new page was fetched and decoded.
#[derive(Clone)]
pub struct PagedCollection {
    fetcher: Arc<dyn PageFetcher>,
    url: String,
    listing: Listing,
    format: Format,
    page_size: Option<u32>,
    page: Page,
}

impl PagedCollection {
    /// Wrap an initial page fetched from `url`
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        url: impl Into<String>,
        listing: Listing,
        format: Format,
        page_size: Option<u32>,
        page: Page,
    ) -> Self {
        Self {
            fetcher,
            url: url.into(),
            listing,
            format,
            page_size,
            page,
        }
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Collection URL, without page parameters
    pub fn url(&self) -> &str {
        &self.url
    }

    /// What the pages of this collection list
    pub fn listing(&self) -> Listing {
        self.listing
    }

    /// Format pages are requested in
    pub fn format(&self) -> Format {
        self.format
    }

    /// Page size requested when jumping to a page number
    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    /// The current page
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Decoded body of the current page
    pub fn body(&self) -> &Value {
        &self.page.body
    }

    /// Paging state of the current page
    pub fn cursor(&self) -> Option<&Cursor> {
        self.page.cursor.as_ref()
    }

    /// Server-reported record total; 1 when the response was not paged
    pub fn record_count(&self) -> u64 {
        self.cursor().map_or(1, Cursor::record_count)
    }

    /// Server-reported page total; 1 when the response was not paged
    pub fn page_count(&self) -> u32 {
        self.cursor().map_or(1, Cursor::page_count)
    }

    /// Number of the current page; an unpaged response is page 1
    pub fn current_page_number(&self) -> Option<u32> {
        self.cursor().map_or(Some(1), Cursor::current_page_number)
    }

    /// Page size reported by the server, if known
    pub fn current_page_size(&self) -> Option<u32> {
        self.cursor().and_then(Cursor::current_page_size)
    }

    /// Records of the current page, in page order
    pub fn list_elements(&self) -> Vec<Record> {
        self.listing.records(&self.page.body)
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Fetch the page `target` points at and return the collection moved
    /// there, leaving `self` untouched.
    ///
    /// `Ok(None)` means there is nowhere to go: no cursor, no such link, or a
    /// page number outside `1..=page_count`. A response without paging
    /// headers is an error.
    pub async fn advance(&self, target: PageTarget) -> Result<Option<PagedCollection>> {
        let Some(cursor) = self.cursor() else {
            return Ok(None);
        };

        let (url, page) = match target {
            PageTarget::Number(number) => {
                if number < 1 || number > cursor.page_count() {
                    return Ok(None);
                }
                let page = self
                    .fetcher
                    .fetch_page(&self.url, self.format, Some(number), self.page_size)
                    .await?;
                (self.url.as_str(), page)
            }
            linked => {
                let Some(url) = linked.rel().and_then(|rel| cursor.link(rel)) else {
                    return Ok(None);
                };
                let page = self.fetcher.fetch_page(url, self.format, None, None).await?;
                (url, page)
            }
        };

        // A paged collection stays paged
        if page.cursor.is_none() {
            return Err(Error::missing_paging(url));
        }

        Ok(Some(self.moved_to(page)))
    }

    /// Move to `target` in place. Returns whether the collection moved; on
    /// `false` the current page is unchanged.
    pub async fn go_to(&mut self, target: PageTarget) -> bool {
        match self.advance(target).await {
            Ok(Some(moved)) => {
                *self = moved;
                true
            }
            Ok(None) => {
                debug!(url = %self.url, "No {} to move to", target);
                false
            }
            Err(e) => {
                warn!(url = %self.url, error = %e, "Failed to fetch {}", target);
                false
            }
        }
    }

    /// Move to the next page
    pub async fn next_page(&mut self) -> bool {
        self.go_to(PageTarget::Next).await
    }

    /// Move to the previous page
    pub async fn previous_page(&mut self) -> bool {
        self.go_to(PageTarget::Previous).await
    }

    /// Move to the first page
    pub async fn first_page(&mut self) -> bool {
        self.go_to(PageTarget::First).await
    }

    /// Move to the last page
    pub async fn last_page(&mut self) -> bool {
        self.go_to(PageTarget::Last).await
    }

    /// Jump to page `number`, counted from 1
    pub async fn skip_to_page(&mut self, number: u32) -> bool {
        self.go_to(PageTarget::Number(number)).await
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Stream every record, starting from the first page
    pub fn records(&mut self) -> RecordStream<'_> {
        RecordStream::new(self, StreamOptions::default())
    }

    /// Stream records with explicit start and stop behaviour
    pub fn records_with(&mut self, options: StreamOptions) -> RecordStream<'_> {
        RecordStream::new(self, options)
    }

    fn moved_to(&self, page: Page) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            url: self.url.clone(),
            listing: self.listing,
            format: self.format,
            page_size: self.page_size,
            page,
        }
    }
}

impl std::fmt::Debug for PagedCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedCollection")
            .field("url", &self.url)
            .field("listing", &self.listing)
            .field("format", &self.format)
            .field("page_size", &self.page_size)
            .field("cursor", &self.page.cursor)
            .finish_non_exhaustive()
    }
}
