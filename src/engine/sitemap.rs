//! Sitemap checking
//!
//! Downloads a sitemap document, drops the entries matching the excluded
//! patterns, and checks every remaining entry as a single page. Failures
//! are aggregated in document order; a sitemap that cannot be downloaded
//! or parsed fails the whole check.

use crate::check::{CheckSpec, HttpMethod};
use crate::engine::fetcher::fetch_page;
use crate::engine::page::PageChecker;
use crate::engine::parser::parse_sitemap;
use crate::engine::report;
use crate::url::PatternSet;
use crate::{FetchError, SitemapError};
use reqwest::Client;
use url::Url;

/// Runs a sitemap check
///
/// Returns the aggregated failure report, or `None` when every checked
/// entry passed.
pub(crate) async fn check_sitemap(client: Client, spec: &CheckSpec) -> Option<String> {
    let url = match Url::parse(&spec.url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => url,
        _ => return Some(report::page_error(&spec.url, FetchError::IncorrectUrl)),
    };

    let entries = match download_entries(&client, &url, spec).await {
        Ok(entries) => entries,
        Err(error) => return Some(report::page_error(&spec.url, error)),
    };

    tracing::info!(url = %spec.url, entries = entries.len(), "Sitemap downloaded");

    let excluded = PatternSet::parse(&spec.excluded_urls);
    let checker = PageChecker::new(client, spec);
    let mut failures = String::new();

    for entry in entries {
        if excluded.matches(&entry) {
            tracing::debug!(entry = %entry, "Skipping excluded sitemap entry");
            continue;
        }

        if let Some(failure) = checker.check(&entry).await.failure {
            failures.push_str(&failure);
            failures.push_str(report::BR);
        }
    }

    if failures.is_empty() {
        None
    } else {
        Some(failures)
    }
}

/// Downloads and parses the sitemap document.
///
/// The download always uses GET regardless of the definition's method, and
/// the server must answer 200; entry checks are where the definition's
/// method and expected status apply.
async fn download_entries(
    client: &Client,
    url: &Url,
    spec: &CheckSpec,
) -> Result<Vec<String>, SitemapError> {
    let response = fetch_page(client, url, HttpMethod::Get, spec.credentials.as_ref()).await?;

    if response.status != 200 {
        return Err(SitemapError::Status(response.status));
    }

    Ok(parse_sitemap(&response.body)?)
}
