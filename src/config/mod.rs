// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for rimsort-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. rimsort.toml (cwd, optional)
//! 3. --ini files
//! 4. RIMSORT_* env vars
//! 5. --set overrides and CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! RIMSORT_SORTING__METHOD=alphabetical  → sorting.method = "alphabetical"
//! RIMSORT_METADATA__PATH=mods.json      → metadata.path = "mods.json"
//! RIMSORT_GLOBAL__OUTPUT_LOG_LEVEL=4    → global.output_log_level = 4
//! ```
//!
//! # Mitigation Table
//!
//! ```toml
//! [[cycles.ignored_edges]]
//! from = "brrainz.harmony"
//! to = "zetrith.prepatcher"
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::cycles::CycleMitigator;
use crate::error::{ConfigError, Result};
use crate::tiers::TierSeeds;

use loader::ConfigLoader;
use types::{CyclesConfig, GlobalConfig, IgnoredEdge, MetadataConfig, SortingConfig, TiersConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Ordering options.
    pub sorting: SortingConfig,
    /// Metadata snapshot options.
    pub metadata: MetadataConfig,
    /// Tier seeds.
    pub tiers: TiersConfig,
    /// Cycle mitigation.
    pub cycles: CyclesConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rimsort_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("rimsort.toml")
    ///     .with_env_prefix("RIMSORT")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML, does not match the
    /// `Config` structure, or fails validation.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Check values serde cannot check.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a seed that is not a valid
    /// glob, and [`ConfigError::MissingKey`] for an ignored edge with an
    /// empty endpoint.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.tier_seeds()?;
        for edge in &self.cycles.ignored_edges {
            for (key, value) in [("from", &edge.from), ("to", &edge.to)] {
                if value.trim().is_empty() {
                    return Err(ConfigError::MissingKey {
                        section: "cycles.ignored_edges".to_string(),
                        key: key.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Compiled tier seeds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a seed that is not a valid
    /// glob.
    pub fn tier_seeds(&self) -> std::result::Result<TierSeeds, ConfigError> {
        TierSeeds::new(&self.tiers.first, &self.tiers.last)
    }

    #[must_use]
    pub fn mitigator(&self) -> CycleMitigator {
        CycleMitigator::new(self.cycles.ignored_edges.iter().map(IgnoredEdge::to_pair))
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_sorting_options(&mut options);
        self.format_tier_options(&mut options);
        self.format_cycle_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global.log_file.display().to_string(),
        );
        options.insert("global.json_log".into(), self.global.json_log.to_string());
    }

    fn format_sorting_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("sorting.method".into(), self.sorting.method.to_string());
        if let Some(path) = &self.metadata.path {
            options.insert("metadata.path".into(), path.display().to_string());
        }
        options.insert(
            "metadata.mirror_rules".into(),
            self.metadata.mirror_rules.to_string(),
        );
    }

    fn format_tier_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("tiers.first".into(), self.tiers.first.join(", "));
        options.insert("tiers.last".into(), self.tiers.last.join(", "));
    }

    fn format_cycle_options(&self, options: &mut BTreeMap<String, String>) {
        let edges: Vec<String> = self
            .cycles
            .ignored_edges
            .iter()
            .map(|edge| format!("{} -> {}", edge.from, edge.to))
            .collect();
        options.insert("cycles.ignored_edges".into(), edges.join(", "));
    }
}
