//! `scraper`-backed document implementation.

use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;

use super::{DocumentQuery, Element};
use crate::utils::{is_valid_tag_name, parse_selector_unsafe, parse_selector_with_fallback};

const BODY_SELECTOR_STR: &str = "body";

/// Elements whose text is never visible content.
const SKIPPED_TEXT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "svg"];

/// Elements that start a new block of text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li",
    "main", "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Void and replaced elements that separate the words around them.
const WORD_BREAK_ELEMENTS: &[&str] = &["img", "input", "wbr", "embed", "object", "video", "audio", "iframe"];

static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(BODY_SELECTOR_STR, "BODY_SELECTOR"));

/// A parsed HTML document.
///
/// Owns the `scraper` tree; queries return owned [`Element`] snapshots so
/// results can outlive the borrow and be handed to analyzers freely.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parses raw markup. HTML parsing is error-tolerant, so this never fails.
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }
}

impl std::fmt::Debug for HtmlDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlDocument").finish_non_exhaustive()
    }
}

impl DocumentQuery for HtmlDocument {
    fn select_by_tag(&self, tag: &str) -> Vec<Element> {
        if !is_valid_tag_name(tag) {
            log::warn!("Ignoring selection by invalid tag name '{tag}'");
            return Vec::new();
        }
        let selector = parse_selector_with_fallback(tag, "tag selection");
        self.html.select(&selector).map(snapshot).collect()
    }

    fn body_text(&self) -> String {
        let mut text = String::new();
        match self.html.select(&BODY_SELECTOR).next() {
            Some(body) => collect_text(body, &mut text),
            None => collect_text(self.html.root_element(), &mut text),
        }
        text
    }
}

fn snapshot(element: ElementRef<'_>) -> Element {
    let value = element.value();
    Element::new(
        value.name(),
        value
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        element.text().collect::<String>(),
    )
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = child_element.value().name();
                if SKIPPED_TEXT_ELEMENTS.contains(&name) {
                    continue;
                }
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                let is_block = BLOCK_ELEMENTS.contains(&name);
                if is_block {
                    out.push_str("\n\n");
                }
                collect_text(child_element, out);
                if is_block {
                    out.push_str("\n\n");
                } else if WORD_BREAK_ELEMENTS.contains(&name) {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}
