//! Transport abstraction
//!
//! The paging core never talks to reqwest directly. It goes through
//! [`Transport`], so tests and callers can plug in their own fetch function.

use crate::decode::Format;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::HeaderMap;

/// A raw HTTP response: status, headers and undecoded body
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers, including the paging headers
    pub headers: HeaderMap,
    /// Response body text
    pub body: String,
}

impl RawResponse {
    /// Create a response with no headers
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Check for the one status the API uses for success
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Header value as text, if present and valid
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Issues a single GET with content negotiation
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url`, asking for `accept` as the response format.
    ///
    /// Transport failures and error statuses are returned as `Err`.
    async fn get(&self, url: &str, accept: Format) -> Result<RawResponse>;
}
