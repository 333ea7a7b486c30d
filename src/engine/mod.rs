//! Check execution engine
//!
//! This module contains the core check logic, including:
//! - HTTP fetching with timeout, proxy, and credential handling
//! - Link and sitemap extraction
//! - Single page validation (status, content condition, broken links)
//! - Sitemap and spider orchestration with ordered report aggregation

mod fetcher;
mod page;
mod parser;
mod report;
mod sitemap;
mod spider;

pub use parser::parse_sitemap;

use crate::check::{CheckKind, CheckSpec};

/// The result of one check run
///
/// A check either passes without a report or fails with a single
/// fully formatted, human-readable report string. The report text is the
/// engine's only output; callers display or deliver it as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The check passed; there is nothing to report
    Success,
    /// The check failed with the given report
    Failure(String),
}

impl CheckOutcome {
    fn from_report(report: Option<String>) -> Self {
        match report {
            Some(message) => CheckOutcome::Failure(message),
            None => CheckOutcome::Success,
        }
    }

    /// Whether the check passed.
    pub fn is_success(&self) -> bool {
        matches!(self, CheckOutcome::Success)
    }

    /// The failure report, if the check failed.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            CheckOutcome::Failure(message) => Some(message),
            CheckOutcome::Success => None,
        }
    }
}

/// Runs one check to completion
///
/// This is the main entry point of the engine. It will:
/// 1. Build an HTTP client from the definition's timeouts, proxy, and
///    credentials, scoped to this run
/// 2. Dispatch to the single-page, sitemap, or spider mode
/// 3. Fold every failure into one formatted report
///
/// Every failure category resolves into a [`CheckOutcome`]; the engine
/// never panics on bad input or unreachable targets.
///
/// # Arguments
///
/// * `spec` - The check definition to execute
///
/// # Returns
///
/// * `CheckOutcome::Success` - The target passed every validation
/// * `CheckOutcome::Failure` - The formatted failure report
pub async fn run_check(spec: &CheckSpec) -> CheckOutcome {
    tracing::info!(kind = %spec.kind, url = %spec.url, "Starting check");

    let client = match fetcher::build_client(spec) {
        Ok(client) => client,
        Err(error) => return CheckOutcome::Failure(report::page_error(&spec.url, error)),
    };

    let failure = match spec.kind {
        CheckKind::SinglePage => page::check_single_page(client, spec).await,
        CheckKind::Sitemap => sitemap::check_sitemap(client, spec).await,
        CheckKind::Spider => spider::crawl_site(client, spec).await,
    };

    let outcome = CheckOutcome::from_report(failure);

    match &outcome {
        CheckOutcome::Success => tracing::info!(url = %spec.url, "Check passed"),
        CheckOutcome::Failure(message) => {
            tracing::info!(url = %spec.url, failure = %message, "Check failed");
        }
    }

    outcome
}
