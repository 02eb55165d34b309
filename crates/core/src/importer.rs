//! Pipeline orchestration.
//!
//! [`Importer`] runs the stages in strict sequence: SSRF guard, bounded
//! fetch, encoding resolution, article extraction, text normalization.
//! Each stage owns its output and hands it to the next by value; nothing
//! is shared between concurrent imports, so an `Importer` can serve any
//! number of requests at once.

use crate::article::NormalizedArticle;
use crate::encoding::decode;
use crate::extract::{ArticleExtractor, ExtractorConfig, HeuristicExtractor};
use crate::fetch::{FetchConfig, fetch_with_resolver};
use crate::guard::{Resolver, SystemResolver, authorize_with_resolver};
use crate::{Result, TextgateError};

/// Configuration for the whole pipeline.
#[derive(Debug, Clone, Default)]
pub struct ImportConfig {
    /// Limits for the bounded fetcher.
    pub fetch: FetchConfig,
    /// Thresholds for the default extractor.
    pub extractor: ExtractorConfig,
}

/// The import pipeline.
///
/// Generic over the extractor capability and the DNS resolver so both can
/// be substituted in tests; production code uses the defaults.
///
/// # Example
///
/// ```no_run
/// use textgate_core::Importer;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let importer = Importer::new();
/// let article = importer.import("https://example.com/article").await?;
/// println!("{} ({} chars)", article.title, article.length);
/// # Ok(())
/// # }
/// ```
pub struct Importer<E = HeuristicExtractor, R = SystemResolver> {
    config: ImportConfig,
    extractor: E,
    resolver: R,
}

impl Importer {
    /// Creates an importer with default limits, extractor, and resolver.
    pub fn new() -> Self {
        Self::with_config(ImportConfig::default())
    }

    /// Creates an importer with custom limits.
    pub fn with_config(config: ImportConfig) -> Self {
        let extractor = HeuristicExtractor::new(config.extractor.clone());
        Self { config, extractor, resolver: SystemResolver::default() }
    }
}

impl Default for Importer {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ArticleExtractor, R: Resolver> Importer<E, R> {
    /// Creates an importer from explicit parts.
    pub fn with_parts(config: ImportConfig, extractor: E, resolver: R) -> Self {
        Self { config, extractor, resolver }
    }

    /// Imports the document at `url` as a normalized article.
    ///
    /// Stage order is fixed; no stage starts before its predecessor
    /// completes, and the first failure is terminal. The extractor finding
    /// no article maps to [`TextgateError::NoContent`].
    pub async fn import(&self, url: &str) -> Result<NormalizedArticle> {
        let target = authorize_with_resolver(url, &self.resolver).await?;
        let fetched = fetch_with_resolver(&target, &self.config.fetch, &self.resolver).await?;
        let decoded = decode(&fetched.bytes);

        let extracted = self
            .extractor
            .extract(&decoded.text, &fetched.final_url)
            .ok_or(TextgateError::NoContent)?;

        tracing::debug!(url = %url, encoding = decoded.encoding, "imported article");
        Ok(NormalizedArticle::new(extracted, url.to_string()))
    }
}

/// Convenience function: import with all defaults.
pub async fn import_article(url: &str) -> Result<NormalizedArticle> {
    Importer::new().import(url).await
}
