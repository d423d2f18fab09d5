//! Configuration error types

use thiserror::Error;

/// Configuration result type
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    /// A value in the configuration tree does not have the shape its position requires
    #[error("Unexpected shape for '{field}': expected {expected}")]
    Shape { field: String, expected: &'static str },

    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Unsupported configuration file format: {0}")]
    Unsupported(String),
}

impl ConfigError {
    pub fn shape(field: impl Into<String>, expected: &'static str) -> Self {
        Self::Shape {
            field: field.into(),
            expected,
        }
    }
}
