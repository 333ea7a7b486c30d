//! URL handling module for Sitesentry
//!
//! This module provides the glob pattern matching used by do-not-follow and
//! excluded URL rules, plus the URL identity helpers the crawler and the
//! outbound-link rule rely on.

mod matcher;
mod normalize;

// Re-export main types and functions
pub use matcher::{PatternSet, UrlPattern};
pub use normalize::{same_site, visit_key};
