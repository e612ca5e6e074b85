//! Response decoder module
//!
//! Supports: JSON, XML
//!
//! # Overview
//!
//! Both wire formats decode into the same generic view, a `serde_json::Value`
//! tree, so record accessors are written once and work for either format.

mod decoders;
mod types;

pub use decoders::{as_list, extract_path, value_text, JsonDecoder, XmlDecoder};
pub use types::{BodyDecoder, Format};

#[cfg(test)]
mod tests;
