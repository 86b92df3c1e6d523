// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            RimSortError (~24 bytes)
//!                     |
//!   +--------+--------+--------+--------+
//!   |        |        |        |        |
//!   v        v        v        v        v
//! Bail     Sort   Metadata   Cfg    Io/Other
//!          Box      Box      Box    Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Sort      MalformedRule, CycleDetected, Strategy
//!   Metadata  Read, Parse, NotFound, MissingSource
//!   Config    MissingKey, InvalidValue, NotFound
//! ```
//!
//! `MalformedRule` never leaves the graph builder; it exists so the skipped
//! entry can be rendered in a log line. `CycleDetected` is the only sort
//! error that reaches callers of the resolver.

use thiserror::Error;

use crate::tiers::Tier;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`RimSortError`].
pub type RimSortResult<T> = std::result::Result<T, RimSortError>;

/// Result type using [`SortError`].
pub type SortResult<T> = std::result::Result<T, SortError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum RimSortError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Load-order resolution failed.
    #[error("sort error: {0}")]
    Sort(#[from] Box<SortError>),

    /// Metadata snapshot could not be loaded.
    #[error("metadata error: {0}")]
    Metadata(#[from] Box<MetadataError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`RimSortError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> RimSortError {
    RimSortError::Bailed(message.into().into_boxed_str())
}

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for RimSortError {
                fn from(err: $error) -> Self {
                    RimSortError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    SortError => Sort,
    MetadataError => Metadata,
    ConfigError => Config,
    std::io::Error => Io,
}

// --- Sort Errors ---

/// Load-order resolution errors.
#[derive(Debug, Error)]
pub enum SortError {
    /// A rule entry is not a `[package_id, explicit]` pair.
    #[error("malformed rule in '{owner}': {entry}")]
    MalformedRule { owner: String, entry: String },

    /// The dependency graph contains a cycle and cannot be layered.
    #[error("{}", cycle_message(.tier, .nodes))]
    CycleDetected {
        tier: Option<Tier>,
        nodes: Vec<String>,
    },

    /// A custom ordering strategy failed.
    #[error("strategy '{strategy}' failed: {message}")]
    Strategy { strategy: String, message: String },
}

impl SortError {
    /// Returns `true` for [`SortError::CycleDetected`].
    #[must_use]
    pub const fn is_cycle(&self) -> bool {
        matches!(self, Self::CycleDetected { .. })
    }

    /// Attach the tier a cycle was found in, keeping any tier already set.
    #[must_use]
    pub fn in_tier(self, tier: Tier) -> Self {
        match self {
            Self::CycleDetected { tier: None, nodes } => Self::CycleDetected {
                tier: Some(tier),
                nodes,
            },
            other => other,
        }
    }
}

#[allow(clippy::ref_option)]
fn cycle_message(tier: &Option<Tier>, nodes: &[String]) -> String {
    let scope = tier.map_or_else(String::new, |t| format!(" in {} tier", t.name()));
    format!(
        "dependency cycle detected{scope} among {} mods: {}",
        nodes.len(),
        nodes.join(", ")
    )
}

// --- Metadata Errors ---

/// Metadata snapshot errors.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Failed to read a snapshot file.
    #[error("failed to read metadata '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot contents are not valid JSON or do not match the record layout.
    #[error("failed to parse metadata '{path}': {message}")]
    Parse { path: String, message: String },

    /// Snapshot path does not exist.
    #[error("metadata not found: {0}")]
    NotFound(String),

    /// Neither the command line nor the config names a snapshot.
    #[error("no metadata snapshot configured (use --metadata or [metadata] path)")]
    MissingSource,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),
}
