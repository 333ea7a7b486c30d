//! Error report formatting
//!
//! Every failure a check produces is rendered through the helpers in this
//! module, so the exact report wording lives in one place. Aggregated
//! reports join sub-reports with an HTML line break, which downstream
//! consumers rely on when splitting a report back into lines.

use std::fmt::Display;

/// Separator appended after each sub-report in an aggregated failure.
pub(crate) const BR: &str = "<br />";

/// Formats a status mismatch report
///
/// # Arguments
///
/// * `url` - The URL that was checked
/// * `required` - The status code the check expected
/// * `received` - The status code the server returned
pub(crate) fn invalid_status(url: &str, required: u16, received: u16) -> String {
    format!(
        "Invalid status: {} required: {}, received: {} ",
        url, required, received
    )
}

/// Formats a page-level error report
///
/// # Arguments
///
/// * `url` - The URL that was checked
/// * `error` - The failure description to attach
pub(crate) fn page_error(url: &str, error: impl Display) -> String {
    format!("{} has error: {}", url, error)
}

/// Formats one sub-report of an aggregated failure
///
/// The parent page wraps the child failure and the line-break separator
/// closes the entry, ready to be concatenated with its siblings.
pub(crate) fn nested(parent: &str, child: impl Display) -> String {
    format!("{} has error: {}{}", parent, child, BR)
}

/// Formats a failed link probe
///
/// # Arguments
///
/// * `link` - The link URL that was probed
/// * `error` - The failure description from the probe
pub(crate) fn link_failure(link: &str, error: impl Display) -> String {
    format!("{}: {}", link, error)
}

/// Formats a report for required text missing from a page body.
pub(crate) fn missing_text(url: &str, text: &str) -> String {
    format!("Invalid content: {} doesn't contain: {}", url, text)
}

/// Formats a report for forbidden text present in a page body.
pub(crate) fn forbidden_text(url: &str, text: &str) -> String {
    format!("Invalid content: {} contains: {}", url, text)
}
