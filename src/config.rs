//! Configuration System
//!
//! Layered runtime configuration for the provisioning tool. Defaults are
//! overridden by the vendor config file, then the administrator-writable
//! system config file, then `SEEDCONF_*` environment variables.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod merge;
mod sources;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedconfConfig {
    /// Where the userdata payload comes from
    #[serde(default)]
    pub source: SourceConfig,

    /// Base template locations for file synthesis
    #[serde(default)]
    pub templates: TemplateConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Userdata source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Userdata file path for the local-file data source, relative to the root
    #[serde(default = "default_userdata_path")]
    pub userdata_path: PathBuf,
}

/// Base template locations, relative to the provisioning root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Administrator-writable template, checked first
    #[serde(default = "default_system_template")]
    pub system_path: PathBuf,

    /// Vendored default template, used when the system template is absent
    #[serde(default = "default_vendor_template")]
    pub vendor_path: PathBuf,
}

fn default_userdata_path() -> PathBuf {
    PathBuf::from("var/lib/seedconf/userdata")
}

fn default_system_template() -> PathBuf {
    PathBuf::from("etc/seedconf/update.conf")
}

fn default_vendor_template() -> PathBuf {
    PathBuf::from("usr/share/seedconf/update.conf")
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            userdata_path: default_userdata_path(),
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            system_path: default_system_template(),
            vendor_path: default_vendor_template(),
        }
    }
}

impl Default for SeedconfConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            templates: TemplateConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SeedconfConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.userdata_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "Userdata path cannot be empty".to_string(),
            ));
        }
        if self.templates.system_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "System template path cannot be empty".to_string(),
            ));
        }
        if self.templates.vendor_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "Vendor template path cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads configuration from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a provisioning root.
    ///
    /// Precedence (lowest to highest): built-in defaults, vendor config file,
    /// system config file, `SEEDCONF_*` environment variables.
    pub fn load(root: &Path) -> Result<SeedconfConfig, ConfigError> {
        let mut builder = merge::builder_with_defaults()?;
        builder = sources::vendor_file::add_to_builder(builder, root)?;
        builder = sources::system_file::add_to_builder(builder, root)?;
        builder = builder.add_source(
            config::Environment::with_prefix("SEEDCONF")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Load configuration from an explicit file, bypassing the layered sources.
    pub fn load_from_file(path: &Path) -> Result<SeedconfConfig, ConfigError> {
        let path_str = path.to_string_lossy();
        let config = merge::builder_with_defaults()?
            .add_source(config::File::with_name(path_str.as_ref()))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }
}
