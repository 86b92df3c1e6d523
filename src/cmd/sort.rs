// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sort command implementation for rimsort-rs.

use tracing::info;

use crate::cli::sort::SortArgs;
use crate::cmd::input::{ConsoleNotifier, active_uuids, build_resolver, load_store};
use crate::config::Config;
use crate::error::{Result, RimSortError};
use crate::metadata::{MetadataSource, MetadataStore, ModUuid};
use crate::sort::SortStrategy;

/// Main handler for sort command.
///
/// # Errors
///
/// Returns an error if the inputs cannot be loaded or the order cannot be
/// resolved. A dependency cycle is reported on stderr first.
pub fn run_sort_command(args: &SortArgs, config: &Config) -> Result<()> {
    let store = load_store(&args.input, config)?;
    let uuids = active_uuids(&args.input, &store)?;
    let method = args.method.unwrap_or(config.sorting.method);

    let notifier = ConsoleNotifier;
    let resolver = build_resolver(config, &store, &notifier)?;

    info!(method = %method, mods = uuids.len(), "Resolving load order");
    let order = resolver
        .resolve(&SortStrategy::from(method), &uuids)
        .map_err(RimSortError::from)?;
    info!(mods = order.len(), "Resolved load order");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&order)?);
    } else {
        for line in format_order(&store, &order) {
            println!("{line}");
        }
    }
    Ok(())
}

/// `package_id  name  uuid` lines with the first two columns aligned.
#[must_use]
pub fn format_order(store: &MetadataStore, order: &[ModUuid]) -> Vec<String> {
    let rows: Vec<(&str, &str, &str)> = order
        .iter()
        .filter_map(|uuid| store.lookup(uuid))
        .map(|m| (m.package_id.as_str(), m.display_name(), m.uuid.as_str()))
        .collect();

    let id_width = rows.iter().map(|(id, _, _)| id.len()).max().unwrap_or(0);
    let name_width = rows
        .iter()
        .map(|(_, name, _)| name.len())
        .max()
        .unwrap_or(0);

    rows.into_iter()
        .map(|(id, name, uuid)| format!("{id:<id_width$}  {name:<name_width$}  {uuid}"))
        .collect()
}
