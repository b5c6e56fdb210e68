//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AggregatorConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AggregatorConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AggregatorConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load from `path` when given, otherwise fall back to validated defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<AggregatorConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let config = AggregatorConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [index]
            url = "https://example.com/index.txt"
            max_candidates = 3
            "#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.index.max_candidates, 3);
        assert_eq!(config.index.host_marker, "github");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[index\nurl = ").unwrap();
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::Parse(_)
        ));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[index]\nmax_candidates = 0").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: index.max_candidates must be greater than zero"
        );
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = load_or_default(None).unwrap();
        assert_eq!(config.index.max_candidates, 10);
    }
}
