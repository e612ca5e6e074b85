//! Decoder types and traits
//!
//! Defines the wire formats and the decoder abstraction.

use super::decoders::{JsonDecoder, XmlDecoder};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Serialisation negotiated with the API through the `Accept` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// `application/json` (default)
    #[default]
    Json,
    /// `application/xml`
    Xml,
}

impl Format {
    /// MIME type sent in the `Accept` header
    pub fn mime_type(self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Xml => "application/xml",
        }
    }

    /// Look up a format by MIME type, ignoring parameters such as `charset`
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "application/json" => Some(Format::Json),
            "application/xml" | "text/xml" => Some(Format::Xml),
            _ => None,
        }
    }

    /// Decoder for bodies in this format
    pub fn decoder(self) -> Box<dyn BodyDecoder> {
        match self {
            Format::Json => Box::new(JsonDecoder::new()),
            Format::Xml => Box::new(XmlDecoder::new()),
        }
    }

    /// Decode a body in this format
    pub fn decode(self, body: &str) -> Result<Value> {
        self.decoder().decode(body)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => f.write_str("json"),
            Format::Xml => f.write_str("xml"),
        }
    }
}

/// Trait for decoding response bodies into the generic view
pub trait BodyDecoder: Send + Sync {
    /// Decode the whole response body
    fn decode(&self, body: &str) -> Result<Value>;
}
