//! Link and sitemap extraction
//!
//! This module turns fetched documents into the URL sequences the checkers
//! walk: outbound hyperlinks from an HTML body, and location entries from a
//! sitemap XML document. Both preserve document order, which the report
//! aggregation rules depend on.

use crate::LinkError;
use scraper::{Html, Selector};
use serde::Deserialize;
use std::collections::HashSet;
use url::Url;

/// Extracts the outbound links of an HTML page
///
/// Hyperlinks are taken from `a[href]` in document order, resolved against
/// the page's own URL, and deduplicated keeping the first occurrence.
/// Same-document fragments and non-HTTP schemes (javascript:, mailto:,
/// tel:, data:) are skipped before resolution.
///
/// A href that fails URL resolution is not a skippable link: it aborts the
/// extraction so the page can be reported as carrying a broken link.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - The page's own URL, base for resolving relative hrefs
///
/// # Returns
///
/// * `Ok(Vec<Url>)` - Absolute link URLs in first-occurrence order
/// * `Err(LinkError)` - A href could not be resolved
pub fn extract_links(html: &str, page_url: &Url) -> Result<Vec<Url>, LinkError> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(resolved) = resolve_link(href, page_url)? {
                    if seen.insert(resolved.as_str().to_string()) {
                        links.push(resolved);
                    }
                }
            }
        }
    }

    Ok(links)
}

/// Resolves one href against the page URL.
///
/// Returns `Ok(None)` for links that are not probe targets: empty hrefs,
/// same-document fragments, javascript:/mailto:/tel:/data: schemes, and
/// anything that resolves outside http(s).
fn resolve_link(href: &str, page_url: &Url) -> Result<Option<Url>, LinkError> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return Ok(None);
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return Ok(None);
    }

    let resolved = page_url.join(href).map_err(|source| LinkError {
        href: href.to_string(),
        source,
    })?;

    if resolved.scheme() == "http" || resolved.scheme() == "https" {
        Ok(Some(resolved))
    } else {
        Ok(None)
    }
}

#[derive(Debug, Deserialize)]
struct SitemapUrlset {
    #[serde(rename = "url", default)]
    entries: Vec<SitemapUrl>,
}

#[derive(Debug, Deserialize)]
struct SitemapUrl {
    loc: String,
}

/// Parses a sitemap document into its location entries
///
/// Deserializes the standard `<urlset><url><loc>` structure, keeping
/// document order and trimming whitespace around each location. A document
/// that cannot be deserialized at all is a parse failure, which fails the
/// whole sitemap check.
///
/// # Arguments
///
/// * `xml` - The sitemap document content
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Location entries in document order
/// * `Err(quick_xml::DeError)` - The document is not a parseable urlset
pub fn parse_sitemap(xml: &str) -> Result<Vec<String>, quick_xml::DeError> {
    let urlset: SitemapUrlset = quick_xml::de::from_str(xml)?;
    Ok(urlset
        .entries
        .into_iter()
        .map(|entry| entry.loc.trim().to_string())
        .collect())
}
