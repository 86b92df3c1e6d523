// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |           sort / tiers / cycles
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '-------------+-------------'
//!                            v
//!                        resolver
//!                            |
//!        +---------+---------+---------+---------+
//!        v         v         v         v         v
//!    metadata    graph     tiers     cycles    sort
//!    snapshot   fwd/rev   first/..  mitigate  topo/alpha
//!
//!   +-----------------------------------------+
//!   |  foundation        error, logging       |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod cycles;
pub mod error;
pub mod graph;
pub mod logging;
pub mod metadata;
pub mod resolver;
pub mod sort;
pub mod tiers;
