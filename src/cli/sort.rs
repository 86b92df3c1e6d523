// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the resolving commands.

use clap::Args;
use std::path::PathBuf;

use crate::sort::SortMethod;

/// Where the mod metadata and the active list come from.
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Metadata snapshot file or directory, overrides `metadata.path`.
    #[arg(short = 'm', long = "metadata", value_name = "PATH")]
    pub metadata: Option<PathBuf>,

    /// Active mod list: one UUID per line or a JSON array.
    /// Every mod in the snapshot is active when omitted.
    #[arg(short = 'a', long = "active", value_name = "FILE")]
    pub active: Option<PathBuf>,

    /// Do not infer mirrored load order rules.
    #[arg(long = "no-mirror")]
    pub no_mirror: bool,
}

/// Arguments for the `sort` command.
#[derive(Debug, Clone, Default, Args)]
pub struct SortArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Ordering strategy, overrides `sorting.method`.
    #[arg(long = "method", value_enum, value_name = "METHOD")]
    pub method: Option<SortMethod>,

    /// Print the order as a JSON array of UUIDs.
    #[arg(long)]
    pub json: bool,
}
