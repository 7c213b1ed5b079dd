//! Document query facade.
//!
//! Analyzers never touch a parsing library directly. They read the page through
//! [`DocumentQuery`], a small capability set (select by tag, select by attribute
//! predicate, read attributes and text, count matches) that any parser backend
//! can provide. [`HtmlDocument`] is the `scraper`-backed implementation.
//!
//! Selections are returned in document order; the image and link analyzers
//! depend on this for position-sensitive checks.

mod html;

pub use html::HtmlDocument;

/// An owned snapshot of one element: tag name, attributes, and text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
}

impl Element {
    /// Creates an element snapshot. Attribute names are matched case-insensitively.
    pub fn new(tag: impl Into<String>, attributes: Vec<(String, String)>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes,
            text: text.into(),
        }
    }

    /// Lowercase tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Value of attribute `name`, or `None` if the attribute is absent.
    ///
    /// A present attribute with an empty value returns `Some("")`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whether attribute `name` is present, regardless of its value.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Concatenated text content of the element and its descendants.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Read-only query capability over a parsed document.
pub trait DocumentQuery {
    /// All elements named `tag`, in document order.
    fn select_by_tag(&self, tag: &str) -> Vec<Element>;

    /// Visible body text with block elements separated by blank lines.
    fn body_text(&self) -> String;

    /// Elements named `tag` whose `attribute` is present and satisfies `predicate`.
    fn select_by_attribute(
        &self,
        tag: &str,
        attribute: &str,
        predicate: &dyn Fn(&str) -> bool,
    ) -> Vec<Element> {
        self.select_by_tag(tag)
            .into_iter()
            .filter(|element| element.attr(attribute).is_some_and(predicate))
            .collect()
    }

    /// Number of elements named `tag`.
    fn count(&self, tag: &str) -> usize {
        self.select_by_tag(tag).len()
    }

    /// Trimmed text of the first element named `tag`, if any.
    fn first_text(&self, tag: &str) -> Option<String> {
        self.select_by_tag(tag)
            .first()
            .map(|element| element.text().trim().to_string())
    }

    /// Trimmed, non-empty `content` of the first `<meta>` whose `name` or
    /// `property` equals `key` (case-insensitive).
    fn meta_content(&self, key: &str) -> Option<String> {
        let matches_key = |value: &str| value.trim().eq_ignore_ascii_case(key);
        self.select_by_tag("meta")
            .into_iter()
            .filter(|element| {
                element.attr("property").is_some_and(matches_key)
                    || element.attr("name").is_some_and(matches_key)
            })
            .find_map(|element| {
                element
                    .attr("content")
                    .map(str::trim)
                    .filter(|content| !content.is_empty())
                    .map(str::to_string)
            })
    }
}
