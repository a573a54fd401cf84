//! Extraction of `<style>` contents from HTML documents, with coverage
//! ranges remapped from document offsets to offsets in the combined CSS.
//!
//! Each style element's text is located in the document by first-occurrence
//! search. When the same style text appears more than once, ranges are
//! attributed to the first occurrence only; this is a known limitation.
use kuchiki::traits::TendrilSink;

use crate::model::Range;

/// Something that can list the text of every `<style>` element in an HTML
/// document, in document order.
pub trait StyleExtractor {
    fn style_contents(&self, html: &str) -> Vec<String>;
}

impl<F> StyleExtractor for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn style_contents(&self, html: &str) -> Vec<String> {
        self(html)
    }
}

/// Default extractor backed by a full HTML5 parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlStyleExtractor;

impl StyleExtractor for HtmlStyleExtractor {
    fn style_contents(&self, html: &str) -> Vec<String> {
        let document = kuchiki::parse_html().one(html);
        let mut contents = Vec::new();
        if let Ok(styles) = document.select("style") {
            for style in styles {
                contents.push(style.as_node().text_contents());
            }
        }
        contents
    }
}

/// Combined CSS of a document and the ranges that fell inside it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedCss {
    pub css: String,
    pub ranges: Vec<Range>,
}

/// Concatenate the document's style contents and remap `ranges` (measured
/// against `html`) into the combined CSS. Ranges not entirely inside one
/// style element's text are dropped. Whitespace-only style elements are
/// skipped.
pub fn remap_html(extractor: &dyn StyleExtractor, html: &str, ranges: &[Range]) -> ExtractedCss {
    let mut extracted = ExtractedCss::default();

    for content in extractor.style_contents(html) {
        if content.trim().is_empty() {
            continue;
        }

        let offset = extracted.css.len();
        extracted.css.push_str(&content);

        let Some(start) = html.find(content.as_str()) else {
            tracing::warn!(
                bytes = content.len(),
                "style element text not found in document; its ranges are dropped"
            );
            continue;
        };
        let end = start + content.len();

        for range in ranges {
            if range.start >= start && range.end <= end {
                extracted.ranges.push(Range::new(
                    offset + (range.start - start),
                    offset + (range.end - start),
                ));
            }
        }
    }

    extracted
}
