use std::path::Path;
use crate::errors::TriageError;
use super::types::{CacheBackend, TriageConfig};
use super::schema::CONFIG_SCHEMA;
use tracing::{debug, warn};

/// Load the config at `path`, or the defaults when no file is given.
pub async fn load_config(path: Option<&Path>) -> Result<TriageConfig, TriageError> {
    match path {
        Some(path) => parse_config(path).await,
        None => {
            debug!("No config file given, using defaults");
            Ok(TriageConfig::default())
        }
    }
}

pub async fn parse_config(path: &Path) -> Result<TriageConfig, TriageError> {
    if !path.exists() {
        return Err(TriageError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(TriageError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;

    // JSON Schema validation
    validate_schema(&yaml)?;

    // Parse into typed config
    let config: TriageConfig = serde_yaml::from_value(yaml)?;

    validate_semantics(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), TriageError> {
    let json_value: serde_json::Value = serde_json::to_value(yaml)
        .map_err(|e| TriageError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| TriageError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only; the typed parse and semantic checks are authoritative
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

/// Reject configurations that parse but cannot work.
pub fn validate_semantics(config: &TriageConfig) -> Result<(), TriageError> {
    if config.sources.timeout_secs == 0 {
        return Err(TriageError::Config("sources.timeout_secs must be greater than zero".into()));
    }

    for (kind, endpoint) in config.sources.all_endpoints() {
        if !(endpoint.url.starts_with("https://") || endpoint.url.starts_with("http://")) {
            return Err(TriageError::Config(format!(
                "Endpoint for {} must be an http(s) URL, got '{}'",
                kind, endpoint.url
            )));
        }
        if endpoint.timeout_secs == Some(0) {
            return Err(TriageError::Config(format!("Timeout for {} must be greater than zero", kind)));
        }
    }

    if config.policy.description_languages.iter().all(|l| l.trim().is_empty()) {
        return Err(TriageError::Config(
            "policy.description_languages must name at least one language".into(),
        ));
    }

    if config.cache.backend == CacheBackend::Memory && config.cache.directory.is_some() {
        warn!("cache.directory is ignored by the memory cache backend");
    }

    Ok(())
}
