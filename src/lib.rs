//! Seedconf: Declarative Update-Configuration Provisioning
//!
//! Synthesizes a system update configuration file from a declarative option set
//! layered onto an on-disk template, and derives the service-lifecycle actions
//! that make the new configuration take effect.

pub mod cli;
pub mod config;
pub mod datasource;
pub mod error;
pub mod logging;
pub mod options;
pub mod update;
