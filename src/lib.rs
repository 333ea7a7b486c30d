//! Sitesentry: a check-execution engine for scheduled website monitoring
//!
//! This crate implements the execution core of a website monitor: given a
//! check definition it performs an HTTP probe (optionally following and
//! validating discovered links) and produces a deterministic human-readable
//! error report, or confirms success. Persistence, scheduling, and email
//! notification live outside this crate; the caller hands in a fully
//! populated [`CheckSpec`] and receives a single [`CheckOutcome`].

pub mod check;
pub mod engine;
pub mod url;

use thiserror::Error;

/// Failure categories for a single HTTP probe.
///
/// The `Display` strings of these variants are report text: they appear
/// verbatim inside check failure messages, so their wording is part of the
/// report format and must stay stable.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("incorrect URL")]
    IncorrectUrl,

    #[error("Unknown host: {0}")]
    UnknownHost(String),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("socket timeout")]
    SocketTimeout,

    #[error("{0}")]
    Io(String),
}

/// A hyperlink whose href could not be resolved against its page URL.
///
/// Raised during broken-link extraction; aborts the scan of the page that
/// contains the offending href.
#[derive(Debug, Error)]
#[error("cannot parse link {href}: {source}")]
pub struct LinkError {
    pub href: String,
    pub source: ::url::ParseError,
}

/// Errors that fail an entire sitemap check before any entry is probed.
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("cannot download sitemap: status {0}")]
    Status(u16),

    #[error("cannot parse sitemap: {0}")]
    Parse(#[from] quick_xml::DeError),
}

/// Errors raised while loading a check definition file
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("Failed to read definition file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for definition-file operations
pub type DefinitionResult<T> = std::result::Result<T, DefinitionError>;

// Re-export commonly used types
pub use check::{CheckKind, CheckSpec, ContentCondition, Credentials, HttpMethod, ProxySettings};
pub use engine::{run_check, CheckOutcome};
