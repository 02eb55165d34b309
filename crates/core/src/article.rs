//! The normalized article returned to callers.

use serde::Serialize;

use crate::extract::ExtractedArticle;
use crate::normalize::normalize;

/// Terminal entity of the import pipeline.
///
/// Every field is computed from the fetched document; nothing here is
/// user-supplied, so callers cannot inject fabricated metadata. Serializes
/// to the wire shape (`htmlContent`, `textContent`, `sourceUrl`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedArticle {
    /// Article title; empty when none could be determined.
    pub title: String,
    /// The extracted content region as HTML.
    pub html_content: String,
    /// Plain-text rendition with paragraph structure preserved.
    pub text_content: String,
    /// Character count of `text_content`.
    pub length: usize,
    /// The URL the caller asked to import.
    pub source_url: String,
}

impl NormalizedArticle {
    /// Builds the terminal article from an extraction result.
    ///
    /// Runs the text normalizer over the content HTML and derives the
    /// character count from the normalized text.
    pub fn new(extracted: ExtractedArticle, source_url: String) -> Self {
        let text_content = normalize(&extracted.content_html);
        let length = text_content.chars().count();

        Self {
            title: extracted.title.unwrap_or_default(),
            html_content: extracted.content_html,
            text_content,
            length,
            source_url,
        }
    }
}
