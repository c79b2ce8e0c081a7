//! System config file source: <root>/etc/seedconf/config.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};

/// Path to the administrator-writable config file under `root`.
pub fn system_config_path(root: &Path) -> PathBuf {
    root.join("etc").join("seedconf").join("config.toml")
}

/// Add the system config file source to the builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
    root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = system_config_path(root);
    if path.exists() {
        builder = builder.add_source(File::from(path).required(false));
    }
    Ok(builder)
}
