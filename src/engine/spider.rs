//! Site crawling
//!
//! Walks the page graph reachable from a directory-style base URL,
//! checking every visited page and collecting failures in visit order.
//! The crawl stays on the base URL's site; the frontier is a FIFO queue so
//! pages of one discovery generation are visited before their children,
//! and a visited set keyed by the fragment-free URL keeps cyclic link
//! graphs terminating.

use crate::check::CheckSpec;
use crate::engine::page::PageChecker;
use crate::engine::report;
use crate::url::{same_site, visit_key, PatternSet};
use crate::FetchError;
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Runs a spider check
///
/// Returns the aggregated failure report across the whole crawl, or
/// `None` when every visited page passed. The base page's own failure is
/// recorded verbatim; every other page's failure is wrapped with the URL
/// of the page it was first discovered from.
pub(crate) async fn crawl_site(client: Client, spec: &CheckSpec) -> Option<String> {
    let base = match Url::parse(&spec.url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => url,
        _ => return Some(report::page_error(&spec.url, FetchError::IncorrectUrl)),
    };

    let do_not_follow = PatternSet::parse(&spec.do_not_follow);
    let checker = PageChecker::for_crawl(client, spec);

    // Frontier entries carry the URL of the page that discovered them;
    // the base URL has no parent.
    let mut frontier: VecDeque<(Option<String>, Url)> = VecDeque::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut failures = String::new();
    let mut pages = 0usize;

    frontier.push_back((None, base.clone()));

    while let Some((parent, url)) = frontier.pop_front() {
        if !visited.insert(visit_key(&url)) {
            continue;
        }
        pages += 1;
        tracing::debug!(url = %url, "Visiting page");

        let result = checker.check(url.as_str()).await;

        if let Some(failure) = result.failure {
            match &parent {
                Some(parent) => failures.push_str(&report::nested(parent, failure)),
                None => failures.push_str(&failure),
            }
        }

        for link in result.links {
            if !same_site(&base, &link) {
                continue;
            }
            if do_not_follow.matches(link.as_str()) {
                tracing::debug!(link = %link, "Not following link (do-not-follow)");
                continue;
            }
            if visited.contains(&visit_key(&link)) {
                continue;
            }
            frontier.push_back((Some(url.as_str().to_string()), link));
        }
    }

    tracing::info!(url = %spec.url, pages, "Crawl finished");

    if failures.is_empty() {
        None
    } else {
        Some(failures)
    }
}
