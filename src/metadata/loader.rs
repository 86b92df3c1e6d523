// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Metadata snapshot loading.
//!
//! ```text
//! path is file --> { "mods": [ ModMetadata, .. ] }  or  [ ModMetadata, .. ]
//! path is dir  --> every *.json below it holds one ModMetadata
//!                  (walked in file-name order, hidden files skipped)
//! ```

use std::path::Path;

use ignore::WalkBuilder;
use serde::Deserialize;

use super::{MetadataStore, ModMetadata};
use crate::error::MetadataError;

#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Wrapped { mods: Vec<ModMetadata> },
    Bare(Vec<ModMetadata>),
}

impl Snapshot {
    fn into_records(self) -> Vec<ModMetadata> {
        match self {
            Self::Wrapped { mods } | Self::Bare(mods) => mods,
        }
    }
}

/// Load a snapshot file or directory.
///
/// # Errors
///
/// Returns a [`MetadataError`] if the path does not exist, a file cannot be
/// read, or its JSON does not match the record layout.
pub fn load(path: &Path) -> Result<MetadataStore, MetadataError> {
    if !path.exists() {
        return Err(MetadataError::NotFound(path.display().to_string()));
    }
    if path.is_dir() {
        load_dir(path)
    } else {
        load_file(path)
    }
}

/// Load a single snapshot file.
///
/// # Errors
///
/// Returns a [`MetadataError`] if the file cannot be read or parsed.
pub fn load_file(path: &Path) -> Result<MetadataStore, MetadataError> {
    let content = read(path)?;
    let store = from_json_str(&content).map_err(|e| MetadataError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), mods = store.len(), "Loaded metadata snapshot");
    Ok(store)
}

/// Parse snapshot JSON held in memory.
///
/// # Errors
///
/// Returns the `serde_json` error if the content does not match either
/// snapshot layout.
pub fn from_json_str(content: &str) -> serde_json::Result<MetadataStore> {
    let snapshot: Snapshot = serde_json::from_str(content)?;
    Ok(snapshot.into_records().into_iter().collect())
}

/// Load one record per `*.json` file below `dir`.
///
/// # Errors
///
/// Returns a [`MetadataError`] for the first file that cannot be read or
/// parsed. Unreadable directory entries are logged and skipped.
pub fn load_dir(dir: &Path) -> Result<MetadataStore, MetadataError> {
    let walker = WalkBuilder::new(dir)
        .hidden(true)
        .git_ignore(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut store = MetadataStore::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable metadata entry");
                continue;
            }
        };
        let path = entry.path();
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        if !is_json || !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let content = read(path)?;
        let record: ModMetadata =
            serde_json::from_str(&content).map_err(|e| MetadataError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        store.insert(record);
    }

    tracing::debug!(dir = %dir.display(), mods = store.len(), "Loaded metadata directory");
    Ok(store)
}

fn read(path: &Path) -> Result<String, MetadataError> {
    std::fs::read_to_string(path).map_err(|source| MetadataError::Read {
        path: path.display().to_string(),
        source,
    })
}
