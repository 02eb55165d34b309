//! HTML sanitization ahead of scoring.
//!
//! Strips elements that carry no article text but pollute text-density
//! measurements (scripts, styles, embedded frames and graphics), and
//! rewrites relative link and image URLs against the document's base URL
//! so extracted content stands alone.

use url::Url;

/// Removes non-content elements and absolutizes relative URLs.
///
/// On any rewriter failure the input is returned unchanged; sanitization
/// is an accuracy improvement, not a correctness gate.
pub fn sanitize_html(html: &str, base_url: Option<&Url>) -> String {
    let mut output = String::new();

    let href_base = base_url.cloned();
    let src_base = base_url.cloned();

    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![
                lol_html::element!("script", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("style", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("noscript", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("iframe", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("svg", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("canvas", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("a[href]", move |el| {
                    if let (Some(base), Some(href)) = (href_base.as_ref(), el.get_attribute("href"))
                        && Url::parse(&href).is_err()
                        && let Ok(absolute) = base.join(&href)
                    {
                        el.set_attribute("href", absolute.as_str())?;
                    }
                    Ok(())
                }),
                lol_html::element!("img[src]", move |el| {
                    if let (Some(base), Some(src)) = (src_base.as_ref(), el.get_attribute("src"))
                        && Url::parse(&src).is_err()
                        && let Ok(absolute) = base.join(&src)
                    {
                        el.set_attribute("src", absolute.as_str())?;
                    }
                    Ok(())
                }),
            ],
            ..Default::default()
        },
        |chunk: &[u8]| {
            output.push_str(&String::from_utf8_lossy(chunk));
        },
    );

    if rewriter.write(html.as_bytes()).is_err() {
        return html.to_string();
    }

    if rewriter.end().is_err() {
        return html.to_string();
    }

    if output.is_empty() && !html.is_empty() {
        html.to_string()
    } else {
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_scripts_and_styles() {
        let html = "<p>keep</p><script>alert(1)</script><style>p{color:red}</style>";
        let cleaned = sanitize_html(html, None);

        assert!(cleaned.contains("<p>keep</p>"));
        assert!(!cleaned.contains("script"));
        assert!(!cleaned.contains("style"));
    }

    #[test]
    fn test_removes_iframes_and_graphics() {
        let html = r#"<div>text<iframe src="x"></iframe><svg></svg><canvas></canvas></div>"#;
        let cleaned = sanitize_html(html, None);

        assert!(cleaned.contains("text"));
        assert!(!cleaned.contains("iframe"));
        assert!(!cleaned.contains("svg"));
        assert!(!cleaned.contains("canvas"));
    }

    #[test]
    fn test_rewrites_relative_href() {
        let base = Url::parse("https://example.com/articles/post").unwrap();
        let html = r#"<a href="/about">About</a>"#;
        let cleaned = sanitize_html(html, Some(&base));

        assert!(cleaned.contains(r#"href="https://example.com/about""#));
    }

    #[test]
    fn test_rewrites_relative_img_src() {
        let base = Url::parse("https://example.com/articles/post").unwrap();
        let html = r#"<img src="hero.jpg">"#;
        let cleaned = sanitize_html(html, Some(&base));

        assert!(cleaned.contains(r#"src="https://example.com/articles/hero.jpg""#));
    }

    #[test]
    fn test_absolute_urls_untouched() {
        let base = Url::parse("https://example.com/").unwrap();
        let html = r#"<a href="https://other.example/page">x</a>"#;
        let cleaned = sanitize_html(html, Some(&base));

        assert!(cleaned.contains(r#"href="https://other.example/page""#));
    }

    #[test]
    fn test_no_base_url_leaves_relative_links() {
        let html = r#"<a href="/about">About</a>"#;
        let cleaned = sanitize_html(html, None);

        assert!(cleaned.contains(r#"href="/about""#));
    }
}
