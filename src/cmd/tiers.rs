// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tiers command implementation for rimsort-rs.

use crate::cli::sort::InputArgs;
use crate::cmd::input::{ConsoleNotifier, active_uuids, build_resolver, load_store};
use crate::config::Config;
use crate::error::Result;
use crate::resolver::ResolvePlan;

/// Main handler for tiers command.
///
/// # Errors
///
/// Returns an error if the inputs cannot be loaded.
pub fn run_tiers_command(input: &InputArgs, config: &Config) -> Result<()> {
    let store = load_store(input, config)?;
    let uuids = active_uuids(input, &store)?;
    let resolver = build_resolver(config, &store, &ConsoleNotifier)?;

    for line in format_tiers(&resolver.plan(&uuids)) {
        println!("{line}");
    }
    Ok(())
}

/// One header per tier followed by its members in package id order.
#[must_use]
pub fn format_tiers(plan: &ResolvePlan<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    for (tier, slice) in plan.tiers.iter() {
        lines.push(format!("[{tier}] {} mod(s)", slice.members.len()));
        for id in &slice.members {
            lines.push(format!("  {id}  {}", plan.active.name_of(id)));
        }
    }
    lines
}
