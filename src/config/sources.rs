//! Layered configuration file sources.

pub mod system_file;
pub mod vendor_file;
