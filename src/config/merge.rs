//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("source.userdata_path", "var/lib/seedconf/userdata")?
        .set_default("templates.system_path", "etc/seedconf/update.conf")?
        .set_default("templates.vendor_path", "usr/share/seedconf/update.conf")
}
