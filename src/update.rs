//! Update Configuration Synthesis
//!
//! Merges the declarative option set into a line-oriented base template and
//! derives the service actions that apply the result. Synthesis is
//! deterministic: identical options and an unmodified template always produce
//! byte-identical output.

use crate::config::TemplateConfig;
use crate::error::SynthesisError;
use crate::options::{UpdateOptions, REBOOT_STRATEGY_OFF};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Unit coordinating reboots after updates are applied.
pub const REBOOT_MANAGER_UNIT: &str = "reboot-manager.service";

/// Unit performing update downloads and installation.
pub const UPDATE_ENGINE_UNIT: &str = "update-engine.service";

/// Destination of the synthesized file, relative to the materialization root.
pub const UPDATE_CONF_PATH: &str = "etc/seedconf/update.conf";

/// Permission bits of the synthesized file, as an octal string.
pub const UPDATE_CONF_PERMISSIONS: &str = "0644";

/// An output file to be materialized by the caller.
///
/// The synthesizer never writes to disk itself; it hands the complete artifact
/// to a filesystem collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileArtifact {
    /// Destination path, relative to the materialization root
    pub path: PathBuf,
    /// Permission bits as an octal string
    pub permissions: String,
    /// Full textual content
    pub content: String,
}

/// Desired effect on a service unit's running/enabled state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCommand {
    Restart,
    Stop,
}

/// One derived instruction for the service-management collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceAction {
    /// Target unit name
    pub unit: String,
    /// Control command to issue
    pub command: UnitCommand,
    /// Mask the unit to prevent future activation
    pub mask: bool,
    /// Apply without persisting past the next reboot
    pub runtime: bool,
}

/// Synthesizer for one option set.
///
/// Both operations are pure functions of the options plus, for [`file`],
/// one sequential read of the caller-supplied base template.
///
/// [`file`]: UpdateSynthesizer::file
#[derive(Debug, Clone)]
pub struct UpdateSynthesizer {
    options: UpdateOptions,
}

impl UpdateSynthesizer {
    pub fn new(options: UpdateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &UpdateOptions {
        &self.options
    }

    /// Generate the update configuration file by rewriting the base template.
    ///
    /// Returns `Ok(None)` when no option is set: absence of configuration must
    /// not touch the target file at all. Each template line whose prefix
    /// matches a configured key is replaced whole by the rendered `KEY=value`
    /// line; all other lines pass through verbatim and in order. Keys that
    /// never matched are appended in lexicographic order.
    pub fn file<R: BufRead>(&self, base: R) -> Result<Option<FileArtifact>, SynthesisError> {
        if self.options.is_empty() {
            debug!("No update options configured; skipping file synthesis");
            return Ok(None);
        }
        self.options.validate()?;

        // Drained as keys match: whatever survives the scan was never present
        // in the template and gets appended.
        let mut subs = self.options.substitutions();

        let mut out = String::new();
        for line in base.lines() {
            let line = line?;
            let matched = subs.keys().copied().find(|key| line.starts_with(key));
            match matched.and_then(|key| subs.remove(key)) {
                Some(rendered) => out.push_str(&rendered),
                None => out.push_str(&line),
            }
            out.push('\n');
        }

        for rendered in subs.values() {
            out.push_str(rendered);
            out.push('\n');
        }

        Ok(Some(FileArtifact {
            path: PathBuf::from(UPDATE_CONF_PATH),
            permissions: UPDATE_CONF_PERMISSIONS.to_string(),
            content: out,
        }))
    }

    /// Derive the service actions implied by the option set.
    ///
    /// The reboot-coordinator action (if any) precedes the update-coordinator
    /// action (if any). The error return is reserved; current derivation
    /// cannot fail.
    pub fn units(&self) -> Result<Vec<ServiceAction>, SynthesisError> {
        let mut actions = Vec::new();

        if let Some(strategy) = self.options.reboot_strategy.as_deref() {
            let action = if strategy == REBOOT_STRATEGY_OFF {
                ServiceAction {
                    unit: REBOOT_MANAGER_UNIT.to_string(),
                    command: UnitCommand::Stop,
                    mask: true,
                    runtime: false,
                }
            } else {
                ServiceAction {
                    unit: REBOOT_MANAGER_UNIT.to_string(),
                    command: UnitCommand::Restart,
                    mask: false,
                    runtime: true,
                }
            };
            actions.push(action);
        }

        if self.options.group.is_some() || self.options.server.is_some() {
            actions.push(ServiceAction {
                unit: UPDATE_ENGINE_UNIT.to_string(),
                command: UnitCommand::Restart,
                mask: false,
                runtime: false,
            });
        }

        Ok(actions)
    }
}

/// Open the base template under `root`.
///
/// The administrator-writable system path wins; the vendored default is the
/// fallback when the system path does not exist. Any other I/O failure
/// propagates unchanged.
pub fn open_base_template(
    root: &Path,
    templates: &TemplateConfig,
) -> std::io::Result<BufReader<File>> {
    let system_path = root.join(&templates.system_path);
    match File::open(&system_path) {
        Ok(file) => {
            debug!(path = %system_path.display(), "Using system base template");
            Ok(BufReader::new(file))
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            let vendor_path = root.join(&templates.vendor_path);
            debug!(path = %vendor_path.display(), "Falling back to vendor base template");
            Ok(BufReader::new(File::open(vendor_path)?))
        }
        Err(err) => Err(err),
    }
}
