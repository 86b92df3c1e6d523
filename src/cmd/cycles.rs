// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cycles command implementation for rimsort-rs.

use crate::cli::sort::InputArgs;
use crate::cmd::input::{ConsoleNotifier, active_uuids, build_resolver, load_store};
use crate::config::Config;
use crate::cycles::{find_cycles, format_cycle};
use crate::error::Result;

/// Main handler for cycles command.
///
/// Lists the cycles left in the forward graph after mitigation. Finding
/// cycles is not an error.
///
/// # Errors
///
/// Returns an error if the inputs cannot be loaded.
pub fn run_cycles_command(input: &InputArgs, config: &Config) -> Result<()> {
    let store = load_store(input, config)?;
    let uuids = active_uuids(input, &store)?;
    let resolver = build_resolver(config, &store, &ConsoleNotifier)?;

    let plan = resolver.plan(&uuids);
    let graph = resolver.mitigator().mitigate(&plan.forward);
    let cycles = find_cycles(&graph);

    if cycles.is_empty() {
        println!("No dependency cycles found");
    } else {
        for cycle in &cycles {
            println!("{}", format_cycle(cycle));
        }
    }
    Ok(())
}
