//! Record module
//!
//! A single generic record type covers every entity kind and both wire
//! formats. Entity fields are read-only projections over the decoded view.
//!
//! # Overview
//!
//! - [`Record`] wraps one decoded entity together with its relations
//! - [`Listing`] projects a decoded page body into records

mod listing;
mod types;

pub use listing::Listing;
pub use types::Record;
