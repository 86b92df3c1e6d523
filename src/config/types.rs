// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! ```text
//! Config: GlobalConfig, SortingConfig, MetadataConfig, TiersConfig, CyclesConfig
//! CyclesConfig.ignored_edges: [{ from, to }]
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cycles::DEFAULT_IGNORED_EDGES;
use crate::logging::LogLevel;
use crate::metadata::PackageId;
use crate::sort::SortMethod;
use crate::tiers::{DEFAULT_FIRST_SEEDS, DEFAULT_LAST_SEEDS};

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Path to log file.
    pub log_file: PathBuf,
    /// Write the log file as JSON lines.
    pub json_log: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::from("rimsort.log"),
            json_log: false,
        }
    }
}

/// Ordering options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SortingConfig {
    pub method: SortMethod,
}

/// Metadata snapshot options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetadataConfig {
    /// Snapshot file or directory.
    pub path: Option<PathBuf>,
    /// Infer the opposite rule for every declared rule before sorting.
    pub mirror_rules: bool,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            path: None,
            mirror_rules: true,
        }
    }
}

/// Tier seed patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TiersConfig {
    pub first: Vec<String>,
    pub last: Vec<String>,
}

impl Default for TiersConfig {
    fn default() -> Self {
        Self {
            first: DEFAULT_FIRST_SEEDS.iter().map(|&s| s.to_owned()).collect(),
            last: DEFAULT_LAST_SEEDS.iter().map(|&s| s.to_owned()).collect(),
        }
    }
}

/// One dependency edge removed before ordering: `to` no longer has to load
/// before `from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IgnoredEdge {
    pub from: String,
    pub to: String,
}

impl IgnoredEdge {
    #[must_use]
    pub fn to_pair(&self) -> (PackageId, PackageId) {
        (PackageId::new(&self.from), PackageId::new(&self.to))
    }
}

/// Cycle mitigation options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CyclesConfig {
    pub ignored_edges: Vec<IgnoredEdge>,
}

impl Default for CyclesConfig {
    fn default() -> Self {
        Self {
            ignored_edges: DEFAULT_IGNORED_EDGES
                .iter()
                .map(|&(from, to)| IgnoredEdge {
                    from: from.to_string(),
                    to: to.to_string(),
                })
                .collect(),
        }
    }
}
