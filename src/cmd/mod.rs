// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   sort, tiers, cycles   input --> Resolver --> stdout
//!   options, inis         Config --> stdout
//! ```

pub mod config;
pub mod cycles;
pub mod input;
pub mod sort;
pub mod tiers;
