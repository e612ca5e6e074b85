//! HTTP transport module
//!
//! Provides the pluggable [`Transport`] seam and its reqwest implementation.
//!
//! # Features
//!
//! - **Content Negotiation**: `Accept` header per requested format
//! - **Authentication**: Basic credentials through the auth module
//! - **Rate Limiting**: Optional token bucket rate limiter using governor
//! - **Retries**: Opt-in, with constant, linear or exponential backoff

mod client;
mod rate_limit;
mod types;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use types::{RawResponse, Transport};
