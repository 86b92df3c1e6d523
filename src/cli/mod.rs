// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for rimsort-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! rimsort [global options] <command>
//! version
//! options
//! inis
//! sort   [--method M] [--metadata PATH] [--active FILE] [--json]
//! tiers  [--metadata PATH] [--active FILE]
//! cycles [--metadata PATH] [--active FILE]
//! ```

pub mod global;
pub mod sort;


use crate::cli::global::GlobalOptions;
use crate::cli::sort::{InputArgs, SortArgs};
use clap::{Parser, Subcommand};

/// RimWorld Mod Load-Order Resolver
///
/// Orders an active mod list from a metadata snapshot.
#[derive(Debug, Parser)]
#[command(
    name = "rimsort",
    author,
    version,
    about = "RimWorld Mod Load-Order Resolver",
    long_about = "rimsort-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Orders an active RimWorld mod list from a metadata snapshot.\n\n\
                  Invoking `rimsort sort --metadata mods.json` orders every mod in\n\
                  the snapshot. Pass `--active list.txt` to order a subset. See\n\
                  `rimsort <command> --help` for more information about a command.",
    after_help = "INI FILES:\n\n\
                  By default, rimsort looks for `rimsort.toml` in the current\n\
                  directory. Additional INIs can be specified with --ini, those\n\
                  will be loaded after it and override its values. Use\n\
                  --no-default-inis to only use --ini."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values from the INIs.
    Options,

    /// Lists the INIs used by rimsort.
    Inis,

    /// Resolves the load order of the active mods.
    Sort(SortArgs),

    /// Shows which tier every active mod belongs to.
    Tiers(InputArgs),

    /// Lists dependency cycles among the active mods.
    Cycles(InputArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
