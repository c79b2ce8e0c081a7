//! CLI domain: parse, execute, and output formatting only.
//!
//! The CLI is the materialization collaborator: the synthesis core hands it a
//! complete artifact and the derived service actions, and `--apply` is what
//! actually touches the filesystem.

use crate::config::SeedconfConfig;
use crate::datasource::{DataSource, LocalFile};
use crate::options::UpdateOptions;
use crate::update::{open_base_template, FileArtifact, ServiceAction, UpdateSynthesizer};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::info;

/// Seedconf CLI - declarative update-configuration provisioning
#[derive(Parser)]
#[command(name = "seedconf")]
#[command(about = "Synthesize system update configuration from declarative options")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Provisioning root directory
    #[arg(long, default_value = "/")]
    pub root: PathBuf,

    /// Configuration file path (overrides layered config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synthesize the update configuration file and derived service actions
    Synth {
        /// Userdata file path (overrides the configured source)
        #[arg(long)]
        userdata: Option<PathBuf>,

        /// Base template path (bypasses system/vendor template resolution)
        #[arg(long)]
        base: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the artifact under the root instead of only printing it
        #[arg(long)]
        apply: bool,
    },
    /// Probe the userdata source and report its state
    Probe {
        /// Userdata file path (overrides the configured source)
        #[arg(long)]
        userdata: Option<PathBuf>,
    },
}

/// Execute a parsed command against the loaded configuration.
pub fn execute(cli: &Cli, config: &SeedconfConfig) -> Result<String> {
    match &cli.command {
        Commands::Synth {
            userdata,
            base,
            format,
            apply,
        } => synth(cli, config, userdata.as_deref(), base.as_deref(), format, *apply),
        Commands::Probe { userdata } => probe(cli, config, userdata.as_deref()),
    }
}

fn userdata_source(cli: &Cli, config: &SeedconfConfig, override_path: Option<&Path>) -> LocalFile {
    let path = match override_path {
        Some(path) => path.to_path_buf(),
        None => cli.root.join(&config.source.userdata_path),
    };
    LocalFile::new(path)
}

fn synth(
    cli: &Cli,
    config: &SeedconfConfig,
    userdata: Option<&Path>,
    base: Option<&Path>,
    format: &str,
    apply: bool,
) -> Result<String> {
    let source = userdata_source(cli, config, userdata);
    if !source.is_available() {
        info!(path = %source.path().display(), kind = source.kind(), "Userdata source unavailable; nothing to do");
        return render(format, None, &[]);
    }

    let payload = source
        .fetch_userdata()
        .with_context(|| format!("Failed to read userdata from {}", source.path().display()))?;
    let options = UpdateOptions::from_userdata(&payload).context("Failed to decode userdata")?;

    let synthesizer = UpdateSynthesizer::new(options);

    // The base template is only touched when something was configured; an
    // empty option set must stay a strict no-op.
    let artifact = if synthesizer.options().is_empty() {
        None
    } else {
        let reader: Box<dyn BufRead> = match base {
            Some(path) => Box::new(BufReader::new(
                File::open(path)
                    .with_context(|| format!("Failed to open base template {}", path.display()))?,
            )),
            None => Box::new(
                open_base_template(&cli.root, &config.templates)
                    .context("Failed to open base template")?,
            ),
        };
        synthesizer.file(reader)?
    };
    let actions = synthesizer.units()?;

    if apply {
        if let Some(ref artifact) = artifact {
            materialize(&cli.root, artifact)?;
            info!(path = %artifact.path.display(), "Artifact written");
        }
    }

    render(format, artifact.as_ref(), &actions)
}

fn probe(cli: &Cli, config: &SeedconfConfig, userdata: Option<&Path>) -> Result<String> {
    let source = userdata_source(cli, config, userdata);
    Ok(format!(
        "kind: {}\npath: {}\navailable: {}\navailability-changes: {}",
        source.kind(),
        source.path().display(),
        source.is_available(),
        source.availability_changes()
    ))
}

/// Write the artifact below `root` with its declared permission bits.
fn materialize(root: &Path, artifact: &FileArtifact) -> Result<()> {
    let destination = root.join(&artifact.path);
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&destination, &artifact.content)
        .with_context(|| format!("Failed to write {}", destination.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = u32::from_str_radix(&artifact.permissions, 8)
            .with_context(|| format!("Invalid permission string '{}'", artifact.permissions))?;
        std::fs::set_permissions(&destination, std::fs::Permissions::from_mode(mode))
            .with_context(|| format!("Failed to set permissions on {}", destination.display()))?;
    }

    Ok(())
}

fn render(format: &str, artifact: Option<&FileArtifact>, actions: &[ServiceAction]) -> Result<String> {
    match format {
        "json" => {
            let value = json!({
                "artifact": artifact,
                "actions": actions,
            });
            Ok(serde_json::to_string_pretty(&value)?)
        }
        "text" => {
            let mut out = String::new();
            match artifact {
                Some(artifact) => {
                    out.push_str(&format!(
                        "artifact: {} (mode {})\n",
                        artifact.path.display(),
                        artifact.permissions
                    ));
                    for line in artifact.content.lines() {
                        out.push_str(&format!("  {}\n", line));
                    }
                }
                None => out.push_str("artifact: none\n"),
            }
            if actions.is_empty() {
                out.push_str("actions: none");
            } else {
                out.push_str("actions:");
                for action in actions {
                    out.push_str(&format!(
                        "\n  {} {:?} mask={} runtime={}",
                        action.unit, action.command, action.mask, action.runtime
                    ));
                }
            }
            Ok(out)
        }
        other => bail!("Unknown output format '{}' (expected 'text' or 'json')", other),
    }
}
