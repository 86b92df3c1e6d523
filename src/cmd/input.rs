// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Inputs shared by the resolving commands.
//!
//! ```text
//! --metadata | metadata.path --> loader::load --> MetadataStore
//!                                   (+ mirrored rules unless disabled)
//! --active FILE              --> Vec<ModUuid>   (default: whole store)
//! Config + store + notifier  --> Resolver
//! ```

use std::path::Path;

use anyhow::Context;

use crate::cli::sort::InputArgs;
use crate::config::Config;
use crate::cycles::CycleNotifier;
use crate::error::{MetadataError, Result, RimSortError};
use crate::metadata::{MetadataStore, ModUuid, loader};
use crate::resolver::Resolver;

/// Writes cycle reports to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl CycleNotifier for ConsoleNotifier {
    fn report_cycles(&self, title: &str, summary: &str, details: &str) {
        eprintln!("{title}\n{summary}\n{details}");
    }
}

/// Load the metadata snapshot named by `--metadata` or `metadata.path`.
///
/// # Errors
///
/// Returns [`RimSortError::Metadata`] holding
/// [`MetadataError::MissingSource`] when neither names a path, or the error
/// from [`loader::load`].
pub fn load_store(input: &InputArgs, config: &Config) -> Result<MetadataStore> {
    let path = input
        .metadata
        .as_deref()
        .or(config.metadata.path.as_deref())
        .ok_or_else(|| RimSortError::from(MetadataError::MissingSource))?;

    let mut store = loader::load(path).map_err(RimSortError::from)?;
    if config.metadata.mirror_rules && !input.no_mirror {
        store.infer_mirrored_rules();
    }
    Ok(store)
}

/// Active UUIDs from `--active`, or every mod in the store in snapshot order.
///
/// # Errors
///
/// Returns an error if the active list cannot be read or parsed.
pub fn active_uuids(input: &InputArgs, store: &MetadataStore) -> Result<Vec<ModUuid>> {
    input
        .active
        .as_deref()
        .map_or_else(|| Ok(store.uuids()), read_active_list)
}

/// Read an active list file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds malformed JSON.
pub fn read_active_list(path: &Path) -> Result<Vec<ModUuid>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read active list '{}'", path.display()))?;
    parse_active_list(&content)
        .with_context(|| format!("failed to parse active list '{}'", path.display()))
}

/// Parse a JSON array of UUID strings, or one UUID per line with `#`
/// comments.
///
/// # Errors
///
/// Returns an error if content starting with `[` is not a JSON string array.
pub fn parse_active_list(content: &str) -> Result<Vec<ModUuid>> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        let uuids: Vec<ModUuid> = serde_json::from_str(trimmed)?;
        return Ok(uuids);
    }

    Ok(content
        .lines()
        .map(|line| line.split_once('#').map_or(line, |(head, _)| head).trim())
        .filter(|line| !line.is_empty())
        .map(ModUuid::new)
        .collect())
}

/// Resolver configured from `config`.
///
/// # Errors
///
/// Returns an error if a tier seed is not a valid glob.
pub fn build_resolver<'a>(
    config: &Config,
    store: &'a MetadataStore,
    notifier: &'a dyn CycleNotifier,
) -> Result<Resolver<'a>> {
    Ok(Resolver::new(store)
        .with_seeds(config.tier_seeds()?)
        .with_mitigator(config.mitigator())
        .with_notifier(notifier))
}
