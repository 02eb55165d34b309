//! Content-likelihood scoring for candidate elements.
//!
//! Each candidate is scored from its tag, its class/id naming, its text
//! density, and how much of its text sits inside links. The extractor
//! keeps the best-scoring candidate above a threshold.

use regex::Regex;

use crate::parse::Element;

/// Class and id fragments that suggest main content.
const POSITIVE_PATTERNS: &str = r"(?i)(article|body|content|entry|main|page|post|text|blog|story)";

/// Class and id fragments that suggest chrome, not content.
const NEGATIVE_PATTERNS: &str =
    r"(?i)(banner|breadcrumbs?|comment|community|extra|foot|header|menu|related|rss|sidebar|sponsor|pagination|pager|popup|nav|promo|share|social|widget)";

/// Base score for an element by how likely its tag is to hold an article.
fn base_tag_score(element: &Element<'_>) -> f64 {
    match element.tag_name().as_str() {
        "article" => 10.0,
        "section" | "main" => 8.0,
        "div" => 5.0,
        "td" | "blockquote" | "pre" => 3.0,
        "form" | "ol" | "ul" | "li" => -3.0,
        "header" | "footer" | "nav" => -5.0,
        _ => 0.0,
    }
}

/// Weight adjustment from class/id naming conventions.
fn class_id_weight(element: &Element<'_>) -> f64 {
    let positive = Regex::new(POSITIVE_PATTERNS).unwrap();
    let negative = Regex::new(NEGATIVE_PATTERNS).unwrap();

    for attr in ["id", "class"] {
        if let Some(value) = element.attr(attr) {
            if positive.is_match(value) {
                return 25.0;
            }
            if negative.is_match(value) {
                return -25.0;
            }
        }
    }

    0.0
}

/// Density score from text volume and comma frequency, both capped.
///
/// Prose accumulates characters and commas; navigation rarely does.
fn content_density(text: &str) -> f64 {
    let char_score = ((text.chars().count() / 100) as f64).min(3.0);
    let comma_score = (text.matches(',').count() as f64).min(3.0);

    char_score + comma_score
}

/// Ratio of link text to total text, 0.0 to 1.0.
pub fn link_density(element: &Element<'_>) -> f64 {
    let text = element.text();
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }

    let linked: usize = element
        .select("a")
        .iter()
        .map(|link| link.text().chars().count())
        .sum();

    linked as f64 / total as f64
}

/// Final content-likelihood score for a candidate element.
///
/// Combines tag score, class/id weight, and density, then penalizes by
/// link density. Content-rich elements get a reduced penalty so long
/// articles with many citations are not mistaken for navigation.
pub fn score_element(element: &Element<'_>) -> f64 {
    let text = element.text();
    let raw = base_tag_score(element) + class_id_weight(element) + content_density(&text);

    let ld = link_density(element);
    let content_rich = text.chars().count() > 500;
    let penalty = if content_rich { 1.0 - ld * 0.5 } else { 1.0 - ld };

    raw * penalty
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;

    fn first<'a>(doc: &'a Document, selector: &str) -> Element<'a> {
        doc.select(selector).into_iter().next().unwrap()
    }

    #[test]
    fn test_article_tag_scores_highest() {
        let doc = Document::parse("<article>x</article><div>x</div><nav>x</nav>");
        assert!(base_tag_score(&first(&doc, "article")) > base_tag_score(&first(&doc, "div")));
        assert!(base_tag_score(&first(&doc, "div")) > base_tag_score(&first(&doc, "nav")));
    }

    #[test]
    fn test_positive_class_weight() {
        let doc = Document::parse(r#"<div class="post-content">x</div>"#);
        assert_eq!(class_id_weight(&first(&doc, "div")), 25.0);
    }

    #[test]
    fn test_negative_class_weight() {
        let doc = Document::parse(r#"<div class="sidebar">x</div>"#);
        assert_eq!(class_id_weight(&first(&doc, "div")), -25.0);
    }

    #[test]
    fn test_positive_id_weight() {
        let doc = Document::parse(r#"<div id="main-article">x</div>"#);
        assert_eq!(class_id_weight(&first(&doc, "div")), 25.0);
    }

    #[test]
    fn test_neutral_class_weight() {
        let doc = Document::parse(r#"<div class="wrapper">x</div>"#);
        assert_eq!(class_id_weight(&first(&doc, "div")), 0.0);
    }

    #[test]
    fn test_content_density_rewards_prose() {
        let prose = "A long sentence with commas, clauses, and plenty of words, \
                     repeated until the character count crosses a few hundred. "
            .repeat(3);
        assert!(content_density(&prose) > content_density("short"));
    }

    #[test]
    fn test_link_density_bounds() {
        let doc = Document::parse(
            r##"<div id="all"><a href="#">only link</a></div>
                <div id="none">no links at all</div>"##,
        );
        assert_eq!(link_density(&first(&doc, "#all")), 1.0);
        assert_eq!(link_density(&first(&doc, "#none")), 0.0);
    }

    #[test]
    fn test_score_prefers_article_over_nav() {
        let html = r##"
            <article class="post">
                This is a long paragraph of real prose, with commas, detail,
                and enough characters to register as content in the density
                measurement used by the scorer.
            </article>
            <nav class="menu">
                <a href="#">Home</a><a href="#">About</a><a href="#">Contact</a>
            </nav>
        "##;
        let doc = Document::parse(html);

        let article = score_element(&first(&doc, "article"));
        let nav = score_element(&first(&doc, "nav"));
        assert!(article > nav);
        assert!(nav < 0.0);
    }

    #[test]
    fn test_link_heavy_div_penalized() {
        let html = r##"
            <div id="links"><a href="#">one</a> <a href="#">two</a> <a href="#">three</a></div>
        "##;
        let doc = Document::parse(html);
        let scored = score_element(&first(&doc, "#links"));

        assert!(scored < 5.0);
    }
}
