//! Classification of coverage records.
//!
//! Strategy:
//!   1. Check the URL's file extension for strong hints (`.js`, `.css`)
//!   2. Otherwise peek at the text: markup means an HTML document whose
//!      `<style>` elements need extracting, anything else is taken as CSS
//!      (dev servers often serve stylesheets from extension-less paths)
use std::sync::LazyLock;

use regex::Regex;

use crate::model::CoverageRecord;

/// Structural test for HTML-like text: an opening or closing tag of one of
/// a handful of elements that never appear in a stylesheet.
static HTML_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?(html|body|head|div|span|script|style)").unwrap());

/// What a coverage record turned out to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// JavaScript coverage; not ours to report on.
    Script,
    /// A stylesheet, either by extension or by content.
    Css,
    /// An HTML document that may embed `<style>` elements.
    Html,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Script => "script",
            EntryKind::Css => "css",
            EntryKind::Html => "html",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a record by URL extension first, then by content.
pub fn classify(record: &CoverageRecord) -> EntryKind {
    match url_extension(&record.url).as_deref() {
        Some("js") => EntryKind::Script,
        Some("css") => EntryKind::Css,
        _ if is_html(&record.text) => EntryKind::Html,
        _ => EntryKind::Css,
    }
}

/// Whether `text` looks like an HTML document rather than a stylesheet.
pub fn is_html(text: &str) -> bool {
    HTML_RE.is_match(text)
}

/// Lowercase extension of the last path segment of `url`, if it has one.
///
/// The scheme, authority, query string and fragment are ignored, so
/// `https://example.com` has no extension while
/// `https://example.com/a/style.CSS?v=2` has `css`.
pub fn url_extension(url: &str) -> Option<String> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let url = &url[..end];

    let path = match url.find("://") {
        Some(scheme_end) => {
            let rest = &url[scheme_end + 3..];
            // Everything before the first '/' is the authority.
            &rest[rest.find('/')?..]
        }
        None => url,
    };

    let segment = path.rsplit('/').next()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}
