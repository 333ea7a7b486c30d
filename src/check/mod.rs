//! Check definition module for Sitesentry
//!
//! This module holds the check definition model and the loading/validation
//! of TOML definition files consumed by the runner binary. The engine takes
//! a [`CheckSpec`] however it was produced; file loading is a convenience
//! around it.
//!
//! # Example
//!
//! ```no_run
//! use sitesentry::check::load_definition;
//! use std::path::Path;
//!
//! let spec = load_definition(Path::new("check.toml")).unwrap();
//! println!("Will run a {} check against {}", spec.kind, spec.url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CheckKind, CheckSpec, ContentCondition, Credentials, HttpMethod, ProxySettings};

// Re-export parser and validation functions
pub use parser::load_definition;
pub use validation::validate;
