//! Provisioning Data Sources
//!
//! Abstraction over where provisioning input (metadata, userdata, network
//! config) originates. Every provider is a peer implementing the same
//! capability contract; callers stay agnostic of the medium behind it.

pub mod local_file;

pub use local_file::LocalFile;

use crate::error::SourceError;

/// Capability contract every provisioning data source must satisfy.
pub trait DataSource {
    /// Non-blocking probe of whether the medium currently exposes data.
    ///
    /// Must not fail: unreachable or unknown states are reported as
    /// unavailable, never as an error.
    fn is_available(&self) -> bool;

    /// Whether availability may change during the provisioning run.
    ///
    /// `true` means the caller should poll; `false` means one check suffices.
    fn availability_changes(&self) -> bool;

    /// Root path/prefix hint for resolving relative network-config names.
    ///
    /// Empty string means "no hint, use defaults".
    fn config_root(&self) -> String;

    /// Retrieve provider metadata. Empty bytes with no error is legitimate.
    fn fetch_metadata(&self) -> Result<Vec<u8>, SourceError>;

    /// Retrieve the primary user-supplied configuration payload.
    fn fetch_userdata(&self) -> Result<Vec<u8>, SourceError>;

    /// Retrieve a named network-configuration fragment relative to
    /// [`config_root`]. `Ok(None)` signals "provider does not support network
    /// config" and is not an error.
    ///
    /// [`config_root`]: DataSource::config_root
    fn fetch_network_config(&self, name: &str) -> Result<Option<Vec<u8>>, SourceError>;

    /// Stable, human-readable identifier of the provider kind.
    ///
    /// For logging and diagnostics only; callers must not branch on it.
    fn kind(&self) -> &'static str;
}
