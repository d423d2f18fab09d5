//! Windsense configuration
//!
//! Settings, the raw configuration tree read from the utility framework's
//! configuration file, and the collaborator traits the completion core uses to
//! reach them (scanner, parser, settings provider).

pub mod error;
pub mod loader;
pub mod manager;
pub mod types;
pub mod value;

pub use error::{ConfigError, ConfigResult};
pub use loader::{parse_str, ConfigFormat, FileConfigurationParser, FileScanner};
pub use manager::SettingsManager;
pub use types::{
    BuildProcessOptions, ConfigurationParser, ConfigurationScanner, Settings, SettingsProvider,
};
pub use value::{ConfigMap, ConfigValue};
