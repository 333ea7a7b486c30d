use crate::check::types::CheckSpec;
use crate::check::validation::validate;
use crate::DefinitionResult;
use std::path::Path;

/// Loads and validates a check definition from a TOML file
///
/// # Arguments
///
/// * `path` - Path to the TOML definition file
///
/// # Returns
///
/// * `Ok(CheckSpec)` - Successfully loaded and validated definition
/// * `Err(DefinitionError)` - Failed to read, parse, or validate it
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sitesentry::check::load_definition;
///
/// let spec = load_definition(Path::new("check.toml")).unwrap();
/// println!("Will check: {}", spec.url);
/// ```
pub fn load_definition(path: &Path) -> DefinitionResult<CheckSpec> {
    // Read the definition file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let spec: CheckSpec = toml::from_str(&content)?;

    // Validate the definition
    validate(&spec)?;

    Ok(spec)
}
