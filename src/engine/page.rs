//! Single page checking
//!
//! This module implements the page check that every mode bottoms out in:
//! fetch the page, validate the response status, validate the content
//! condition, and optionally probe the page's links for broken targets.
//! The sitemap and spider modes reuse it per entry and per visited page.

use crate::check::CheckSpec;
use crate::engine::fetcher::fetch_page;
use crate::engine::parser::extract_links;
use crate::engine::report;
use crate::url::{same_site, PatternSet};
use crate::{ContentCondition, FetchError};
use reqwest::Client;
use url::Url;

/// Runs a single-page check
///
/// Checks the definition's own URL once; the outcome of that one page is
/// the outcome of the whole check.
pub(crate) async fn check_single_page(client: Client, spec: &CheckSpec) -> Option<String> {
    PageChecker::new(client, spec).check(&spec.url).await.failure
}

/// Result of checking one page
///
/// `failure` carries the formatted report when the page failed. `links`
/// carries the page's resolved links when the page passed status and
/// condition validation and its links could be extracted; the spider
/// expands the crawl frontier from them.
pub(crate) struct PageCheck {
    pub failure: Option<String>,
    pub links: Vec<Url>,
}

impl PageCheck {
    fn failed(report: String) -> Self {
        Self {
            failure: Some(report),
            links: Vec::new(),
        }
    }
}

/// Checks individual pages against one check definition
///
/// Holds the HTTP client and the definition for the duration of one check
/// run, plus the probe-filtering rules that differ between modes: direct
/// checks skip links matching the do-not-follow patterns, while a crawl
/// probes every link and applies the patterns to frontier expansion
/// instead.
pub(crate) struct PageChecker<'a> {
    client: Client,
    spec: &'a CheckSpec,
    skip_probe: PatternSet,
    always_extract: bool,
}

impl<'a> PageChecker<'a> {
    /// Creates a checker for direct page checks (single page and sitemap
    /// entries). Links matching the do-not-follow patterns are not probed.
    pub(crate) fn new(client: Client, spec: &'a CheckSpec) -> Self {
        Self {
            client,
            skip_probe: PatternSet::parse(&spec.do_not_follow),
            always_extract: false,
            spec,
        }
    }

    /// Creates a checker for crawl visits. Links are always extracted so
    /// the crawl can expand, and no probe is suppressed by do-not-follow
    /// patterns; those only stop the crawl from following a link.
    pub(crate) fn for_crawl(client: Client, spec: &'a CheckSpec) -> Self {
        Self {
            client,
            skip_probe: PatternSet::empty(),
            always_extract: true,
            spec,
        }
    }

    /// Checks one page
    ///
    /// Runs the full validation sequence: URL parsing, fetch, status
    /// comparison, content condition, then the optional broken-link scan.
    /// The first failing stage produces the page's failure report; status
    /// and condition failures are mutually exclusive per attempt.
    ///
    /// # Arguments
    ///
    /// * `url_str` - The page URL exactly as it should appear in reports
    pub(crate) async fn check(&self, url_str: &str) -> PageCheck {
        let url = match Url::parse(url_str) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => url,
            _ => {
                return PageCheck::failed(report::page_error(url_str, FetchError::IncorrectUrl));
            }
        };

        let response = match fetch_page(
            &self.client,
            &url,
            self.spec.method,
            self.spec.credentials.as_ref(),
        )
        .await
        {
            Ok(response) => response,
            Err(error) => return PageCheck::failed(report::page_error(url_str, error)),
        };

        if response.status != self.spec.expected_status {
            return PageCheck::failed(report::invalid_status(
                url_str,
                self.spec.expected_status,
                response.status,
            ));
        }

        if let Some(failure) = self.evaluate_condition(url_str, &response.body) {
            return PageCheck::failed(failure);
        }

        if !self.spec.check_broken_links && !self.always_extract {
            return PageCheck {
                failure: None,
                links: Vec::new(),
            };
        }

        let links = match extract_links(&response.body, &url) {
            Ok(links) => links,
            Err(error) => return PageCheck::failed(report::page_error(url_str, error)),
        };

        let failure = if self.spec.check_broken_links {
            self.scan_links(url_str, &url, &links).await
        } else {
            None
        };

        PageCheck { failure, links }
    }

    /// Evaluates the content condition, returning the failure report when
    /// the body does not satisfy it.
    fn evaluate_condition(&self, url_str: &str, body: &str) -> Option<String> {
        if self.spec.condition.evaluate(body) {
            return None;
        }

        match &self.spec.condition {
            ContentCondition::Contains(text) => Some(report::missing_text(url_str, text)),
            ContentCondition::DoesntContain(text) => Some(report::forbidden_text(url_str, text)),
            ContentCondition::None => None,
        }
    }

    /// Probes the page's links and aggregates the failures
    ///
    /// Each probed link that fails contributes one wrapped sub-report, in
    /// link document order. Links matching the probe filter are skipped,
    /// as are links leaving the page's site unless the definition opts
    /// into outbound probing.
    async fn scan_links(&self, page: &str, page_url: &Url, links: &[Url]) -> Option<String> {
        let mut failures = String::new();

        for link in links {
            if self.skip_probe.matches(link.as_str()) {
                tracing::debug!(link = %link, "Skipping link probe (do-not-follow)");
                continue;
            }

            if !same_site(page_url, link) && !self.spec.probes_outbound_links() {
                tracing::debug!(link = %link, "Skipping outbound link probe");
                continue;
            }

            if let Some(failure) = self.probe_link(link).await {
                failures.push_str(&report::nested(page, failure));
            }
        }

        if failures.is_empty() {
            None
        } else {
            Some(failures)
        }
    }

    /// Probes one link for a valid response
    ///
    /// The probe reuses the definition's method and expected status but
    /// never evaluates the content condition, and never follows further
    /// links.
    async fn probe_link(&self, link: &Url) -> Option<String> {
        match fetch_page(
            &self.client,
            link,
            self.spec.method,
            self.spec.credentials.as_ref(),
        )
        .await
        {
            Ok(response) => {
                if response.status == self.spec.expected_status {
                    None
                } else {
                    Some(report::invalid_status(
                        link.as_str(),
                        self.spec.expected_status,
                        response.status,
                    ))
                }
            }
            Err(error) => Some(report::link_failure(link.as_str(), error)),
        }
    }
}
