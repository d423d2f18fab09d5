//! Settings record and the collaborator contracts the completion core consumes

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::ConfigResult;
use crate::value::ConfigValue;

/// User-facing extension settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Path of the utility framework configuration file
    pub tailwind_configuration_file: Option<String>,
    /// Name of the generated stylesheet when none is configured
    pub default_output_css_name: String,
    /// Input stylesheet fed to the build
    pub tailwind_css_file: Option<String>,
    /// Output stylesheet produced by the build
    pub tailwind_output_css_file: Option<String>,
    /// Master switch for class completion
    pub enable_tailwind_css: bool,
    pub build_type: BuildProcessOptions,
    pub build_script: Option<String>,
    pub override_build: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tailwind_configuration_file: None,
            default_output_css_name: "tailwind.output.css".to_string(),
            tailwind_css_file: None,
            tailwind_output_css_file: None,
            enable_tailwind_css: true,
            build_type: BuildProcessOptions::default(),
            build_script: None,
            override_build: false,
        }
    }
}

/// When the external build runs; carried for the settings record only
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum BuildProcessOptions {
    #[default]
    Default,
    OnSave,
    OnBuild,
    Manual,
    None,
}

/// Reports whether a configuration file is present in the workspace
pub trait ConfigurationScanner: Send + Sync {
    fn has_configuration_file(&self) -> bool;
}

/// Produces the raw configuration tree from the configuration file
#[async_trait]
pub trait ConfigurationParser: Send + Sync {
    async fn get_configuration(&self) -> ConfigResult<ConfigValue>;
}

/// Source of settings and settings-change notifications
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    async fn get_settings(&self) -> ConfigResult<Settings>;

    /// Subscribe to settings changes; every update is delivered in full
    fn subscribe(&self) -> broadcast::Receiver<Settings>;
}
