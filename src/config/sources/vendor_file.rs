//! Vendor config file source: <root>/usr/share/seedconf/config.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Path to the vendored default config file under `root`.
pub fn vendor_config_path(root: &Path) -> PathBuf {
    root.join("usr")
        .join("share")
        .join("seedconf")
        .join("config.toml")
}

/// Add the vendor config file source to the builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
    root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = vendor_config_path(root);
    if path.exists() {
        builder = builder.add_source(File::from(path).required(false));
    } else {
        warn!(
            config_path = %path.display(),
            "Vendor configuration file not found; relying on built-in defaults"
        );
    }
    Ok(builder)
}
