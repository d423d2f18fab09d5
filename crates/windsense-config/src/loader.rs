//! File-backed configuration collaborators

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{
    error::{ConfigError, ConfigResult},
    types::{ConfigurationParser, ConfigurationScanner},
    value::ConfigValue,
};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::Unsupported(path.display().to_string())),
        }
    }
}

/// Parse configuration text into the raw tree
pub fn parse_str(content: &str, format: ConfigFormat) -> ConfigResult<ConfigValue> {
    let value = match format {
        ConfigFormat::Json => ConfigValue::from(serde_json::from_str::<serde_json::Value>(content)?),
        ConfigFormat::Yaml => ConfigValue::from(serde_yaml::from_str::<serde_yaml::Value>(content)?),
        ConfigFormat::Toml => ConfigValue::from(toml::from_str::<toml::Value>(content)?),
    };
    Ok(value)
}

/// Reads the configuration tree from a JSON, YAML or TOML file on every request
pub struct FileConfigurationParser {
    path: PathBuf,
}

impl FileConfigurationParser {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigurationParser for FileConfigurationParser {
    async fn get_configuration(&self) -> ConfigResult<ConfigValue> {
        let format = ConfigFormat::from_path(&self.path)?;
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(self.path.display().to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let value = parse_str(&content, format)?;
        tracing::debug!("Parsed configuration from {}", self.path.display());
        Ok(value)
    }
}

/// Scanner that reports a single known path
pub struct FileScanner {
    path: PathBuf,
}

impl FileScanner {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigurationScanner for FileScanner {
    fn has_configuration_file(&self) -> bool {
        self.path.is_file()
    }
}
