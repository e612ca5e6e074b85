//! Pagination module
//!
//! Turns a sequence of paged responses into one restartable stream of records.
//!
//! # Overview
//!
//! - [`Cursor`]: paging state parsed from one response's headers
//! - [`PagedCollection`]: the current page plus navigation between pages
//! - [`RecordStream`]: lazy iteration across page boundaries
//!
//! Navigation is a value-returning transition ([`PagedCollection::advance`]);
//! the boolean methods wrap it and swap the new page in on success.

mod collection;
mod cursor;
mod stream;
mod types;

pub use collection::PagedCollection;
pub use cursor::Cursor;
pub use stream::RecordStream;
pub use types::{
    constrain_page_size, Page, PageFetcher, PageTarget, Rel, StreamOptions, DEFAULT_PAGE_SIZE,
    LINK_HEADER, MAX_PAGE_SIZE, MIN_PAGE_SIZE, PAGE_COUNT_HEADER, PAGE_PARAM, PAGE_SIZE_PARAM,
    RECORD_COUNT_HEADER,
};
