use crate::check::types::{CheckKind, CheckSpec, ContentCondition};
use crate::DefinitionError;

/// Validates a check definition loaded from a file.
///
/// These checks guard against obvious authoring mistakes in definition
/// files. The engine itself accepts any `CheckSpec`: a URL that slips past
/// here still folds into a fetch-category outcome at run time instead of
/// crashing.
pub fn validate(spec: &CheckSpec) -> Result<(), DefinitionError> {
    validate_target(spec)?;
    validate_timeouts(spec)?;
    validate_condition(&spec.condition)?;
    validate_proxy(spec)?;
    Ok(())
}

fn validate_target(spec: &CheckSpec) -> Result<(), DefinitionError> {
    if spec.url.trim().is_empty() {
        return Err(DefinitionError::Validation(
            "url cannot be empty".to_string(),
        ));
    }

    if spec.kind == CheckKind::Spider && !spec.url.ends_with('/') {
        return Err(DefinitionError::Validation(format!(
            "spider checks need a directory-style base url ending with '/', got '{}'",
            spec.url
        )));
    }

    Ok(())
}

fn validate_timeouts(spec: &CheckSpec) -> Result<(), DefinitionError> {
    if spec.socket_timeout_ms == 0 {
        return Err(DefinitionError::Validation(
            "socket-timeout-ms must be greater than 0".to_string(),
        ));
    }

    if spec.connection_timeout_ms == 0 {
        return Err(DefinitionError::Validation(
            "connection-timeout-ms must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

fn validate_condition(condition: &ContentCondition) -> Result<(), DefinitionError> {
    let text = match condition {
        ContentCondition::None => return Ok(()),
        ContentCondition::Contains(text) => text,
        ContentCondition::DoesntContain(text) => text,
    };

    if text.is_empty() {
        return Err(DefinitionError::Validation(
            "condition text cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_proxy(spec: &CheckSpec) -> Result<(), DefinitionError> {
    let Some(proxy) = &spec.proxy else {
        return Ok(());
    };

    if proxy.host.trim().is_empty() {
        return Err(DefinitionError::Validation(
            "proxy host cannot be empty".to_string(),
        ));
    }

    if proxy.port == 0 {
        return Err(DefinitionError::Validation(format!(
            "proxy port must be between 1 and 65535, got {}",
            proxy.port
        )));
    }

    Ok(())
}
