//! HTML parsing and DOM queries.
//!
//! A thin wrapper over `scraper` giving the extractor CSS-selector access,
//! text extraction, and the metadata lookups it needs for titles.

use scraper::{Html, Selector};

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// `scraper` recovers from arbitrary malformed markup, so parsing
    /// itself cannot fail.
    ///
    /// # Example
    ///
    /// ```rust
    /// use textgate_core::parse::Document;
    ///
    /// let doc = Document::parse("<html><head><title>Test</title></head></html>");
    /// assert_eq!(doc.title(), Some("Test".to_string()));
    /// ```
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector.
    ///
    /// Invalid selectors yield an empty list; every selector used by the
    /// pipeline is a compile-time literal.
    pub fn select(&self, selector: &str) -> Vec<Element<'_>> {
        match Selector::parse(selector) {
            Ok(sel) => self.html.select(&sel).map(|element| Element { element }).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Content of the `<title>` element, if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }

    /// Content attribute of a `<meta>` tag matched by `name` or `property`.
    pub fn meta_content(&self, name: &str) -> Option<String> {
        let selector_str = format!("meta[name=\"{}\"], meta[property=\"{}\"]", name, name);
        let selector = Selector::parse(&selector_str).ok()?;

        self.html
            .select(&selector)
            .find_map(|el| el.value().attr("content"))
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
    }

    /// Document title with priority fallback:
    /// 1. Open Graph `og:title`
    /// 2. Twitter `twitter:title`
    /// 3. `<title>` element
    /// 4. First non-empty `<h1>`
    pub fn extract_title(&self) -> Option<String> {
        if let Some(title) = self.meta_content("og:title") {
            return Some(title);
        }

        if let Some(title) = self.meta_content("twitter:title") {
            return Some(title);
        }

        if let Some(title) = self.title() {
            let title = title.trim().to_string();
            if !title.is_empty() {
                return Some(title);
            }
        }

        self.select("h1")
            .into_iter()
            .map(|h1| h1.text().trim().to_string())
            .find(|text| !text.is_empty())
    }
}

/// A single element in the parsed document.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl Element<'_> {
    /// The element's HTML including its own tags.
    pub fn outer_html(&self) -> String {
        self.element.html()
    }

    /// Concatenated text of all text nodes within the element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Attribute value, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Lowercase tag name.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Selects descendant elements using a CSS selector.
    pub fn select(&self, selector: &str) -> Vec<Element<'_>> {
        match Selector::parse(selector) {
            Ok(sel) => self.element.select(&sel).map(|element| Element { element }).collect(),
            Err(_) => Vec::new(),
        }
    }
}
