//! Update Options
//!
//! The declarative option set that drives synthesis. Fields map 1:1 to the
//! environment-style keys of the target configuration file through a statically
//! declared association table; an unset field never contributes a substitution.

use crate::error::{DecodeError, SynthesisError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reboot strategies accepted by the reboot coordinator.
pub const VALID_REBOOT_STRATEGIES: [&str; 4] = ["best-effort", "etcd-lock", "reboot", "off"];

/// Sentinel strategy value that disables coordinated reboots entirely.
pub const REBOOT_STRATEGY_OFF: &str = "off";

/// Declarative update configuration options.
///
/// Constructed once per provisioning run from decoded external input and
/// read-only thereafter. A field is either `None` (unset) or holds a trimmed,
/// non-empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct UpdateOptions {
    /// Release channel / update group
    pub group: Option<String>,

    /// Update server endpoint
    pub server: Option<String>,

    /// Reboot coordination strategy
    pub reboot_strategy: Option<String>,
}

/// Userdata document shape: an optional `[update]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Userdata {
    update: UpdateOptions,
}

impl UpdateOptions {
    /// Association table: external key name paired with the field it renders.
    /// Replaces field-tag reflection with a compile-time declaration.
    fn fields(&self) -> [(&'static str, Option<&str>); 3] {
        [
            ("GROUP", self.group.as_deref()),
            ("REBOOT_STRATEGY", self.reboot_strategy.as_deref()),
            ("SERVER", self.server.as_deref()),
        ]
    }

    /// Decode options from a raw userdata payload (TOML with an `[update]` table).
    ///
    /// A payload without an `[update]` table decodes to an empty option set,
    /// which downstream synthesis treats as "nothing configured".
    pub fn from_userdata(raw: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(raw)?;
        let userdata: Userdata = toml::from_str(text)?;
        Ok(userdata.update.normalized())
    }

    /// Normalize fields: trim whitespace and treat empty strings as unset.
    pub fn normalized(&self) -> Self {
        let clean = |field: &Option<String>| {
            field
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Self {
            group: clean(&self.group),
            server: clean(&self.server),
            reboot_strategy: clean(&self.reboot_strategy),
        }
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_none())
    }

    /// Validate options against domain constraints.
    pub fn validate(&self) -> Result<(), SynthesisError> {
        if let Some(strategy) = self.reboot_strategy.as_deref() {
            if !VALID_REBOOT_STRATEGIES.contains(&strategy) {
                return Err(SynthesisError::Validation {
                    field: "reboot-strategy",
                    reason: format!(
                        "'{}' is not one of {}",
                        strategy,
                        VALID_REBOOT_STRATEGIES.join(", ")
                    ),
                });
            }
        }
        Ok(())
    }

    /// Build the substitution map: external key -> rendered `KEY=value` line.
    ///
    /// A `BTreeMap` keeps both the match order during the merge pass and the
    /// append order of leftover keys deterministic (lexicographic).
    pub fn substitutions(&self) -> BTreeMap<&'static str, String> {
        self.fields()
            .iter()
            .filter_map(|(key, value)| value.map(|v| (*key, format!("{}={}", key, v))))
            .collect()
    }
}
