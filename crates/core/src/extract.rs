//! Article extraction behind a trait seam.
//!
//! The pipeline consumes extraction as an opaque capability: HTML plus a
//! base URL go in, a title and content HTML come out, or nothing when the
//! page holds no article (a legitimate outcome, not an error). The default
//! [`HeuristicExtractor`] scores candidate containers and keeps the best
//! one; callers needing a different algorithm implement [`ArticleExtractor`]
//! themselves.

use url::Url;

use crate::parse::Document;
use crate::sanitize::sanitize_html;
use crate::scoring::score_element;

/// The outcome of a successful extraction.
#[derive(Debug, Clone)]
pub struct ExtractedArticle {
    /// Document title, when one could be determined.
    pub title: Option<String>,
    /// The HTML of the main content region.
    pub content_html: String,
}

/// Capability for turning a decoded HTML document into an article.
///
/// Implementations must be deterministic for a given input and must not
/// panic on arbitrary HTML. `None` means the page has no extractable
/// article (login walls, pure navigation pages).
pub trait ArticleExtractor: Send + Sync {
    fn extract(&self, html: &str, base_url: &Url) -> Option<ExtractedArticle>;
}

/// Configuration for the scoring-based default extractor.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Minimum score the best candidate must reach.
    pub min_score: f64,
    /// Candidates below this text length are skipped, unless they are
    /// semantic containers (`article`, `section`, `main`).
    pub min_text_chars: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self { min_score: 10.0, min_text_chars: 50 }
    }
}

/// Tags considered as potential content containers.
const CANDIDATE_TAGS: &[&str] = &["article", "main", "section", "div", "td", "pre", "blockquote"];

/// Default extractor: scores candidate containers and keeps the winner.
#[derive(Debug, Clone, Default)]
pub struct HeuristicExtractor {
    config: ExtractorConfig,
}

impl HeuristicExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }
}

impl ArticleExtractor for HeuristicExtractor {
    fn extract(&self, html: &str, base_url: &Url) -> Option<ExtractedArticle> {
        let cleaned = sanitize_html(html, Some(base_url));
        let doc = Document::parse(&cleaned);

        let mut best_score = f64::NEG_INFINITY;
        let mut best_content: Option<String> = None;

        for tag in CANDIDATE_TAGS {
            for element in doc.select(tag) {
                let semantic = matches!(*tag, "article" | "section" | "main");
                if !semantic && element.text().chars().count() < self.config.min_text_chars {
                    continue;
                }

                let score = score_element(&element);
                if score > best_score {
                    best_score = score;
                    best_content = Some(element.outer_html());
                }
            }
        }

        let content_html = best_content?;
        if best_score < self.config.min_score {
            tracing::debug!(score = best_score, threshold = self.config.min_score, "no candidate above threshold");
            return None;
        }

        Some(ExtractedArticle { title: doc.extract_title(), content_html })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head><title>Test Article</title></head>
        <body>
            <nav class="menu"><a href="/">Home</a> <a href="/about">About</a></nav>
            <article class="post-content">
                <h1>Article Title</h1>
                <p>This is a long paragraph with lots of content, commas, and
                enough text to pass the character threshold comfortably.</p>
                <p>Another paragraph with plenty of content, text, clauses,
                and meaningful sentences for the scorer to reward.</p>
            </article>
            <footer class="footer">Copyright</footer>
        </body>
        </html>
    "#;

    fn base() -> Url {
        Url::parse("https://example.com/articles/1").unwrap()
    }

    #[test]
    fn test_extracts_article_content() {
        let extractor = HeuristicExtractor::default();
        let article = extractor.extract(ARTICLE_HTML, &base()).unwrap();

        assert!(article.content_html.contains("long paragraph"));
        assert!(!article.content_html.contains("Copyright"));
    }

    #[test]
    fn test_extracts_title() {
        let extractor = HeuristicExtractor::default();
        let article = extractor.extract(ARTICLE_HTML, &base()).unwrap();

        assert_eq!(article.title, Some("Test Article".to_string()));
    }

    #[test]
    fn test_navigation_page_yields_none() {
        let html = r##"
            <html><body>
                <nav class="menu">
                    <a href="#">Link 1</a> <a href="#">Link 2</a> <a href="#">Link 3</a>
                </nav>
            </body></html>
        "##;

        let extractor = HeuristicExtractor::default();
        assert!(extractor.extract(html, &base()).is_none());
    }

    #[test]
    fn test_empty_page_yields_none() {
        let extractor = HeuristicExtractor::default();
        assert!(extractor.extract("<html><body></body></html>", &base()).is_none());
    }

    #[test]
    fn test_deterministic() {
        let extractor = HeuristicExtractor::default();
        let first = extractor.extract(ARTICLE_HTML, &base()).unwrap();
        let second = extractor.extract(ARTICLE_HTML, &base()).unwrap();

        assert_eq!(first.content_html, second.content_html);
        assert_eq!(first.title, second.title);
    }

    #[test]
    fn test_title_absent_is_allowed() {
        let html = r#"
            <html><body>
                <article class="post">
                    A long enough run of article text, with commas, detail, and
                    sufficient length to be selected as the main content region.
                </article>
            </body></html>
        "#;

        let extractor = HeuristicExtractor::default();
        let article = extractor.extract(html, &base()).unwrap();
        assert_eq!(article.title, None);
    }

    #[test]
    fn test_script_text_does_not_win() {
        let html = r#"
            <html><body>
                <div class="content">
                    Short but real text, with a comma, and a little more prose
                    to clear the candidate threshold for scoring.
                </div>
                <script>
                    var padding = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
                    var more = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
                </script>
            </body></html>
        "#;

        let extractor = HeuristicExtractor::default();
        let article = extractor.extract(html, &base()).unwrap();
        assert!(article.content_html.contains("real text"));
        assert!(!article.content_html.contains("padding"));
    }
}
