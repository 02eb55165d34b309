//! SSRF guard: URL and target validation ahead of any network connection.
//!
//! The guard parses a candidate URL, checks its scheme, resolves its
//! hostname, and rejects targets whose resolved addresses fall in private,
//! loopback, or link-local ranges. Its only side effect is the DNS query;
//! no connection is opened here.
//!
//! DNS resolution is a capability behind the [`Resolver`] trait so that
//! tests can substitute fixed answers. The production [`SystemResolver`]
//! wraps the operating system resolver with a timeout.

use std::io;
use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::lookup_host;
use url::Url;

use crate::ipcheck::is_private_ip;
use crate::{Result, TextgateError};

/// A validated fetch target: the parsed URL plus every address its host
/// resolved to, in resolver order.
///
/// Produced once per authorization and consumed by the bounded fetcher;
/// never cached, so every call re-resolves.
#[derive(Debug, Clone)]
pub struct AuthorizedTarget {
    /// The parsed, scheme-checked URL.
    pub url: Url,
    /// All resolved addresses for the URL's host, both address families.
    pub addresses: Vec<IpAddr>,
}

/// Hostname resolution capability.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolves a hostname to all of its addresses.
    async fn resolve(&self, host: &str, port: u16) -> io::Result<Vec<IpAddr>>;
}

/// Resolver backed by the operating system, bounded by a timeout.
///
/// Unbounded resolution is a resource-exhaustion risk on a caller-facing
/// endpoint, so lookups that outlast the deadline fail the request.
#[derive(Debug, Clone)]
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(5) }
    }
}

#[async_trait]
impl Resolver for SystemResolver {
    async fn resolve(&self, host: &str, port: u16) -> io::Result<Vec<IpAddr>> {
        let lookup = lookup_host((host, port));
        let addrs = tokio::time::timeout(self.timeout, lookup)
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "DNS lookup timed out"))??;

        Ok(addrs.map(|addr| addr.ip()).collect())
    }
}

/// Validates a candidate URL and resolves its target addresses.
///
/// Checks, in order:
/// 1. the string parses as an absolute URL;
/// 2. the scheme is exactly `http` or `https` (checked before any DNS
///    traffic);
/// 3. the host resolves to at least one address;
/// 4. no resolved address is private.
///
/// A hostname answering with a mix of public and private addresses is
/// rejected outright; multi-answer DNS must not smuggle a private target
/// past the filter.
///
/// # Example
///
/// ```no_run
/// use textgate_core::guard::authorize;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let target = authorize("https://example.com/article").await?;
/// assert_eq!(target.url.scheme(), "https");
/// # Ok(())
/// # }
/// ```
pub async fn authorize(url: &str) -> Result<AuthorizedTarget> {
    authorize_with_resolver(url, &SystemResolver::default()).await
}

/// Same as [`authorize`] with an explicit resolver capability.
pub async fn authorize_with_resolver<R: Resolver>(url: &str, resolver: &R) -> Result<AuthorizedTarget> {
    let parsed = Url::parse(url).map_err(|e| TextgateError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(TextgateError::SchemeNotAllowed(other.to_string())),
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| TextgateError::InvalidUrl("URL has no host".to_string()))?
        .to_string();

    authorize_parsed(parsed, &host, resolver).await
}

async fn authorize_parsed<R: Resolver>(parsed: Url, host: &str, resolver: &R) -> Result<AuthorizedTarget> {
    let port = parsed.port_or_known_default().unwrap_or(80);

    let addresses = match parsed.host() {
        Some(url::Host::Ipv4(ip)) => vec![IpAddr::V4(ip)],
        Some(url::Host::Ipv6(ip)) => vec![IpAddr::V6(ip)],
        _ => {
            let resolved = resolver.resolve(host, port).await.map_err(|e| {
                TextgateError::ResolutionFailed { host: host.to_string(), reason: e.to_string() }
            })?;

            if resolved.is_empty() {
                return Err(TextgateError::ResolutionFailed {
                    host: host.to_string(),
                    reason: "lookup returned no addresses".to_string(),
                });
            }

            resolved
        }
    };

    if let Some(private) = addresses.iter().find(|ip| is_private_ip(**ip)) {
        tracing::warn!(host = %host, address = %private, "rejected private network target");
        return Err(TextgateError::PrivateNetworkDenied { host: host.to_string(), address: *private });
    }

    Ok(AuthorizedTarget { url: parsed, addresses })
}
