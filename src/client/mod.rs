//! GtR client module
//!
//! The page fetcher and the endpoint methods built on top of it.
//!
//! # Endpoints
//!
//! - **Lists**: `{base}/project/`, `{base}/organisation/`, `{base}/person/`,
//!   `{base}/publication/`, returned as [`PagedCollection`]s
//! - **Entities**: `{base}/<kind>/<id>`, returned as [`Record`]s
//! - **Organisation projects**: `{base}/organisation/<id>`, paged over projects
//!
//! [`PagedCollection`]: crate::pagination::PagedCollection
//! [`Record`]: crate::record::Record

mod gateway;

pub use gateway::GtrClient;
