//! Character-encoding detection and decoding.
//!
//! Remote documents arrive as raw bytes in whatever encoding the origin
//! chose. This module sniffs the most probable encoding from the byte
//! content and decodes to a `String`, substituting replacement characters
//! for malformed sequences. Decoding is total: it always produces text.

use chardetng::EncodingDetector;
use encoding_rs::UTF_8;

/// A fetched document decoded to text.
#[derive(Debug, Clone)]
pub struct DecodedDocument {
    /// The decoded text (normally HTML).
    pub text: String,
    /// Name of the detected encoding, kept for diagnostics only.
    pub encoding: &'static str,
}

/// Detects the encoding of `bytes` and decodes them.
///
/// Bytes that already form valid UTF-8 are taken as UTF-8; everything else
/// goes through the statistical detector over the full byte sequence.
/// Malformed sequences become U+FFFD rather than failing the pipeline.
///
/// # Example
///
/// ```rust
/// use textgate_core::encoding::decode;
///
/// let doc = decode("<p>Hello</p>".as_bytes());
/// assert_eq!(doc.text, "<p>Hello</p>");
/// assert_eq!(doc.encoding, "UTF-8");
/// ```
pub fn decode(bytes: &[u8]) -> DecodedDocument {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return DecodedDocument { text: text.to_string(), encoding: UTF_8.name() };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);

    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(encoding = actual.name(), "malformed sequences replaced during decode");
    }
    tracing::debug!(encoding = actual.name(), bytes = bytes.len(), "decoded document");

    DecodedDocument { text: text.into_owned(), encoding: actual.name() }
}
