//! Error types for Textgate operations.
//!
//! This module defines the main error type [`TextgateError`] which represents
//! all possible failures of the import pipeline: target validation, SSRF
//! rejection, bounded fetching, and content extraction.
//!
//! # Example
//!
//! ```rust
//! use textgate_core::{TextgateError, Result};
//!
//! fn check_content(text: &str) -> Result<()> {
//!     if text.is_empty() {
//!         return Err(TextgateError::NoContent);
//!     }
//!     Ok(())
//! }
//! ```

use std::net::IpAddr;
use thiserror::Error;

/// Main error type for the import pipeline.
///
/// Each variant corresponds to one terminal outcome of the pipeline; the
/// server boundary maps variants to HTTP statuses. No variant is ever
/// retried automatically.
#[derive(Error, Debug)]
pub enum TextgateError {
    /// The supplied string does not parse as an absolute URL, or a redirect
    /// target could not be resolved against its base.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The URL scheme is something other than http or https.
    ///
    /// Raised before any DNS query is made.
    #[error("Scheme '{0}' not allowed; only http and https are supported")]
    SchemeNotAllowed(String),

    /// At least one resolved address for the target is private, loopback,
    /// or link-local.
    ///
    /// A single private answer rejects the whole target, even when other
    /// answers are public.
    #[error("Private network access denied: {host} resolves to {address}")]
    PrivateNetworkDenied { host: String, address: IpAddr },

    /// DNS resolution failed or returned no addresses.
    ///
    /// Resolution failure is never silently treated as a public target.
    #[error("Could not resolve host '{host}': {reason}")]
    ResolutionFailed { host: String, reason: String },

    /// The retrieval exceeded the configured wall-clock deadline.
    #[error("Fetch timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// The response body exceeded the configured byte ceiling.
    ///
    /// The transfer is aborted mid-stream; nothing past the ceiling is
    /// buffered.
    #[error("Content exceeds the {limit_bytes} byte limit")]
    TooLarge { limit_bytes: usize },

    /// The redirect chain exceeded the configured hop count.
    #[error("Redirect limit of {max} hops exceeded")]
    RedirectLimit { max: u32 },

    /// The upstream server answered with a non-redirect, non-success status.
    #[error("Upstream returned HTTP {status}")]
    UpstreamStatus { status: u16 },

    /// Transport-level failures from reqwest.
    ///
    /// Wraps connection refusals, TLS failures, and mid-flight stream
    /// errors. The underlying cause is retained for logging.
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The extractor found no article content in the document.
    ///
    /// A legitimate outcome for non-article pages (login walls, navigation
    /// pages), distinct from a crash.
    #[error("No article content could be extracted from the document")]
    NoContent,
}

/// Result type alias for TextgateError.
pub type Result<T> = std::result::Result<T, TextgateError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_invalid_url_display() {
        let err = TextgateError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_private_network_display() {
        let err = TextgateError::PrivateNetworkDenied {
            host: "internal.example".to_string(),
            address: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
        };
        assert!(err.to_string().contains("internal.example"));
        assert!(err.to_string().contains("10.0.0.1"));
    }

    #[test]
    fn test_too_large_display() {
        let err = TextgateError::TooLarge { limit_bytes: 5_000_000 };
        assert!(err.to_string().contains("5000000"));
    }

    #[test]
    fn test_timeout_display() {
        let err = TextgateError::Timeout { timeout_ms: 5000 };
        assert!(err.to_string().contains("5000"));
    }
}
