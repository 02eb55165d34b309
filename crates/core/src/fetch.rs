//! Bounded content fetching.
//!
//! Retrieval runs under two hard limits: a wall-clock deadline over the
//! whole transfer and a byte ceiling on the response body. The body is
//! streamed and the ceiling checked before every append, so an oversized
//! response is aborted mid-flight instead of buffered.
//!
//! The fetcher only accepts targets that passed the SSRF guard, and it
//! keeps that guarantee across the connection itself: automatic redirects
//! are disabled, the client is pinned to the guard-validated address (the
//! hostname is retained for TLS and the Host header), and every redirect
//! hop re-enters the guard before it is followed.

use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, Instant};

use futures_util::StreamExt;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, LOCATION};
use reqwest::redirect::Policy;
use url::Url;

use crate::guard::{AuthorizedTarget, Resolver, SystemResolver, authorize_with_resolver};
use crate::{Result, TextgateError};

/// Limits and client settings for a single retrieval.
///
/// Explicit configuration rather than compile-time constants, so tests can
/// run the pipeline with small synthetic limits.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Wall-clock deadline over the entire retrieval, in milliseconds.
    pub timeout_ms: u64,
    /// Hard ceiling on the response body size, in bytes.
    pub max_bytes: usize,
    /// Maximum number of redirect hops to follow.
    pub max_redirects: u32,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            max_bytes: 5_000_000,
            max_redirects: 5,
            user_agent: "Mozilla/5.0 (compatible; Textgate/1.0; +https://github.com/stormlightlabs/textgate)"
                .to_string(),
        }
    }
}

/// The raw bytes of a completed retrieval.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// The full response body; never longer than the configured ceiling.
    pub bytes: Vec<u8>,
    /// The URL the body was actually served from, after redirects.
    pub final_url: Url,
}

/// Retrieves the target's content within the configured limits.
///
/// Single-attempt semantics: transport failures surface immediately and
/// are never retried, since the caller is waiting synchronously.
pub async fn fetch(target: &AuthorizedTarget, config: &FetchConfig) -> Result<FetchResult> {
    fetch_with_resolver(target, config, &SystemResolver::default()).await
}

/// Same as [`fetch`] with an explicit resolver for redirect re-validation.
pub async fn fetch_with_resolver<R: Resolver>(
    target: &AuthorizedTarget, config: &FetchConfig, resolver: &R,
) -> Result<FetchResult> {
    let deadline = Instant::now() + Duration::from_millis(config.timeout_ms);
    let mut current = target.clone();
    let mut hops = 0u32;

    loop {
        let response = send_pinned(&current, config, deadline).await?;
        let status = response.status();

        if matches!(status.as_u16(), 301 | 302 | 303 | 307 | 308) {
            hops += 1;
            if hops > config.max_redirects {
                return Err(TextgateError::RedirectLimit { max: config.max_redirects });
            }

            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .ok_or_else(|| TextgateError::InvalidUrl("redirect missing Location header".to_string()))?;

            let next = current
                .url
                .join(location)
                .map_err(|e| TextgateError::InvalidUrl(format!("unresolvable redirect target: {}", e)))?;

            tracing::debug!(from = %current.url, to = %next, hop = hops, "re-validating redirect target");
            current = authorize_with_resolver(next.as_str(), resolver).await?;
            continue;
        }

        if !status.is_success() {
            return Err(TextgateError::UpstreamStatus { status: status.as_u16() });
        }

        if let Some(length) = response.content_length()
            && length > config.max_bytes as u64
        {
            return Err(TextgateError::TooLarge { limit_bytes: config.max_bytes });
        }

        let mut body: Vec<u8> = Vec::new();
        let mut stream = response.bytes_stream();

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(TextgateError::Timeout { timeout_ms: config.timeout_ms });
            }

            let next_chunk = tokio::time::timeout(remaining, stream.next())
                .await
                .map_err(|_| TextgateError::Timeout { timeout_ms: config.timeout_ms })?;

            let Some(chunk) = next_chunk else { break };
            let chunk = chunk?;

            if body.len() + chunk.len() > config.max_bytes {
                return Err(TextgateError::TooLarge { limit_bytes: config.max_bytes });
            }
            body.extend_from_slice(&chunk);
        }

        tracing::debug!(url = %current.url, bytes = body.len(), "fetch complete");
        return Ok(FetchResult { bytes: body, final_url: current.url });
    }
}

/// Sends one GET with redirects off and the connection pinned to the
/// guard-validated address.
async fn send_pinned(target: &AuthorizedTarget, config: &FetchConfig, deadline: Instant) -> Result<reqwest::Response> {
    let host = target
        .url
        .host_str()
        .ok_or_else(|| TextgateError::InvalidUrl("URL has no host".to_string()))?;
    let port = target.url.port_or_known_default().unwrap_or(80);

    let mut builder = reqwest::Client::builder()
        .redirect(Policy::none())
        .user_agent(&config.user_agent)
        .no_proxy();

    // IP-literal hosts already connect where the guard looked; hostnames
    // must not be re-resolved by the transport.
    let is_literal = host.parse::<IpAddr>().is_ok() || host.starts_with('[');
    if !is_literal && let Some(ip) = target.addresses.first() {
        builder = builder.resolve(host, SocketAddr::new(*ip, port));
    }

    let client = builder.build()?;

    let remaining = deadline.saturating_duration_since(Instant::now());
    if remaining.is_zero() {
        return Err(TextgateError::Timeout { timeout_ms: config.timeout_ms });
    }

    let request = client
        .get(target.url.clone())
        .header(ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9");

    match tokio::time::timeout(remaining, request.send()).await {
        Ok(response) => response.map_err(TextgateError::from),
        Err(_) => Err(TextgateError::Timeout { timeout_ms: config.timeout_ms }),
    }
}
