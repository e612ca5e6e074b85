// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Gateway to Research client
//!
//! An async client and crawler for the UKRI Gateway to Research (GtR) REST
//! API, which publishes funded projects, research organisations, people and
//! publications as paged XML or JSON.
//!
//! ## Features
//!
//! - **Paged collections**: page navigation driven by the `link-records`,
//!   `link-pages` and `link` response headers
//! - **Lazy streams**: iterate a whole collection one page fetch at a time
//! - **XML or JSON**: both wire formats decode to the same record tree
//! - **Typed accessors**: titles, funding, dates, relations and roles
//! - **Crawler**: per-kind callbacks with limits, refresh and a fixed throttle
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gtr_client::{ClientConfig, GtrClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = GtrClient::new(ClientConfig::new("https://gtr.ukri.org/gtr/api"))?;
//!
//!     let mut projects = client.projects(None, Some(100)).await?;
//!     println!("{} projects", projects.record_count());
//!
//!     let mut records = projects.records();
//!     while let Some(project) = records.next().await {
//!         println!("{:?}", project.title());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            Crawler                              │
//! │     crawl(kind, config, callback)    crawl_all(settings, ...)   │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────────────┬──────────────────┐
//! │   Records    │          Pagination           │     Client       │
//! ├──────────────┼───────────────────────────────┼──────────────────┤
//! │ Record       │ RecordStream                  │ GtrClient        │
//! │ Listing      │ PagedCollection               │ (PageFetcher)    │
//! │              │ Cursor                        │                  │
//! └──────────────┴───────────────────────────────┴──────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────────────┬──────────────────┐
//! │    Decode    │             HTTP              │      Auth        │
//! ├──────────────┼───────────────────────────────┼──────────────────┤
//! │ JSON, XML    │ Transport, retry, rate limit  │ Basic            │
//! └──────────────┴───────────────────────────────┴──────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication
pub mod auth;

/// HTTP transport with retry and rate limiting
pub mod http;

/// Query-string helpers
pub mod query;

/// Response decoders (JSON, XML)
pub mod decode;

/// Typed views over decoded records
pub mod record;

/// Paged collections and record streams
pub mod pagination;

/// The GtR client
pub mod client;

/// Client and crawl configuration
pub mod config;

/// Crawling whole entity lists
pub mod crawl;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use client::GtrClient;
pub use config::{ClientConfig, CrawlSettings, HttpSettings};
pub use crawl::{CrawlCallbacks, CrawlConfig, CrawlStats, Crawler, RecordCallback};
pub use decode::Format;
pub use http::{HttpClient, RawResponse, Transport};
pub use pagination::{Cursor, PageTarget, PagedCollection, RecordStream, StreamOptions};
pub use record::{Listing, Record};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
