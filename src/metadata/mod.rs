// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod metadata as seen by the resolver.
//!
//! ```text
//! snapshot (JSON) --loader--> MetadataStore --impl--> MetadataSource
//!                                   |                      |
//!                          infer_mirrored_rules()     lookup(uuid)
//! ```
//!
//! The resolver only ever reads through [`MetadataSource`]; tests and hosts
//! may supply their own implementation.

pub mod loader;


use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SortError;

/// Normalized (trimmed, lower-cased) package identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PackageId(Box<str>);

impl PackageId {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase().into_boxed_str())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PackageId {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for PackageId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<PackageId> for String {
    fn from(value: PackageId) -> Self {
        value.0.into_string()
    }
}

impl Borrow<str> for PackageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of one installed mod instance.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModUuid(String);

impl ModUuid {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModUuid {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Borrow<str> for ModUuid {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A well-formed ordering rule against another package.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadOrderRule {
    pub target: PackageId,
    /// Declared by the mod itself rather than mirrored from another mod.
    pub explicit: bool,
}

/// A rule entry as it appears in metadata.
///
/// Entries that are not `[package_id, explicit]` pairs are kept verbatim so
/// the graph builder can report and skip them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleEntry {
    Pair(String, bool),
    Malformed(serde_json::Value),
}

impl RuleEntry {
    #[must_use]
    pub fn new(target: &str, explicit: bool) -> Self {
        Self::Pair(target.to_string(), explicit)
    }

    /// Validate the entry.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::MalformedRule`] for anything but a pair with a
    /// non-empty target.
    pub fn to_rule(&self, owner: &PackageId) -> Result<LoadOrderRule, SortError> {
        match self {
            Self::Pair(target, explicit) if !target.trim().is_empty() => Ok(LoadOrderRule {
                target: PackageId::new(target),
                explicit: *explicit,
            }),
            Self::Pair(..) => Err(SortError::MalformedRule {
                owner: owner.to_string(),
                entry: "empty package id".to_string(),
            }),
            Self::Malformed(value) => Err(SortError::MalformedRule {
                owner: owner.to_string(),
                entry: value.to_string(),
            }),
        }
    }

    fn targets(&self, package_id: &PackageId) -> bool {
        matches!(self, Self::Pair(target, _) if PackageId::new(target) == *package_id)
    }
}

/// Everything the resolver needs to know about one mod instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModMetadata {
    pub uuid: ModUuid,
    #[serde(rename = "packageid", alias = "package_id")]
    pub package_id: PackageId,
    #[serde(default)]
    pub name: String,
    /// Packages this mod must load after.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub load_after: Vec<RuleEntry>,
    /// Packages this mod must load before.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub load_before: Vec<RuleEntry>,
    /// Mod asks to be placed at the very end of the load order.
    #[serde(default)]
    pub load_bottom: bool,
}

impl ModMetadata {
    #[must_use]
    pub fn new(uuid: impl Into<String>, package_id: &str, name: impl Into<String>) -> Self {
        Self {
            uuid: ModUuid::new(uuid),
            package_id: PackageId::new(package_id),
            name: name.into(),
            load_after: Vec::new(),
            load_before: Vec::new(),
            load_bottom: false,
        }
    }

    #[must_use]
    pub fn with_load_after(mut self, target: &str) -> Self {
        self.load_after.push(RuleEntry::new(target, true));
        self
    }

    #[must_use]
    pub fn with_load_before(mut self, target: &str) -> Self {
        self.load_before.push(RuleEntry::new(target, true));
        self
    }

    #[must_use]
    pub const fn with_load_bottom(mut self, load_bottom: bool) -> Self {
        self.load_bottom = load_bottom;
        self
    }

    /// Name used for alphabetical ordering; falls back to the package id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.package_id.as_str()
        } else {
            &self.name
        }
    }
}

/// Read-only metadata lookup.
pub trait MetadataSource {
    /// Returns the record for an instance, or `None` if it is unknown.
    fn lookup(&self, uuid: &ModUuid) -> Option<&ModMetadata>;
}

/// In-memory metadata keyed by instance UUID, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MetadataStore {
    records: Vec<ModMetadata>,
    index: BTreeMap<ModUuid, usize>,
}

impl MetadataStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any record with the same UUID in place.
    pub fn insert(&mut self, record: ModMetadata) {
        if let Some(&slot) = self.index.get(&record.uuid) {
            tracing::warn!(uuid = %record.uuid, "Replacing duplicate metadata record");
            self.records[slot] = record;
        } else {
            self.index.insert(record.uuid.clone(), self.records.len());
            self.records.push(record);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModMetadata> {
        self.records.iter()
    }

    /// All instance UUIDs in insertion order.
    #[must_use]
    pub fn uuids(&self) -> Vec<ModUuid> {
        self.records.iter().map(|m| m.uuid.clone()).collect()
    }

    /// Add the opposite-direction rule for every well-formed rule.
    ///
    /// `A load_after B` gives every instance of `B` a non-explicit
    /// `load_before A`, and vice versa. Targets that are not in the store are
    /// left alone, and a mirrored rule is never added when the target already
    /// carries a rule (explicit or not) against the same package.
    ///
    /// Returns the number of rules added.
    pub fn infer_mirrored_rules(&mut self) -> usize {
        let mut by_package: BTreeMap<PackageId, Vec<usize>> = BTreeMap::new();
        for (slot, record) in self.records.iter().enumerate() {
            by_package
                .entry(record.package_id.clone())
                .or_default()
                .push(slot);
        }

        // (slot, rule owner, is load_before) to add
        let mut additions: Vec<(usize, PackageId, bool)> = Vec::new();
        for record in &self.records {
            let rules = record
                .load_after
                .iter()
                .map(|r| (r, true))
                .chain(record.load_before.iter().map(|r| (r, false)));
            for (entry, mirror_as_before) in rules {
                let Ok(rule) = entry.to_rule(&record.package_id) else {
                    continue;
                };
                if rule.target == record.package_id {
                    continue;
                }
                for &slot in by_package.get(&rule.target).into_iter().flatten() {
                    additions.push((slot, record.package_id.clone(), mirror_as_before));
                }
            }
        }

        let mut added = 0;
        for (slot, owner, as_before) in additions {
            let target = &mut self.records[slot];
            let list = if as_before {
                &mut target.load_before
            } else {
                &mut target.load_after
            };
            if list.iter().any(|entry| entry.targets(&owner)) {
                continue;
            }
            list.push(RuleEntry::Pair(owner.to_string(), false));
            added += 1;
        }

        tracing::debug!(added, "Inferred mirrored load order rules");
        added
    }
}

impl FromIterator<ModMetadata> for MetadataStore {
    fn from_iter<I: IntoIterator<Item = ModMetadata>>(iter: I) -> Self {
        let mut store = Self::new();
        for record in iter {
            store.insert(record);
        }
        store
    }
}

impl MetadataSource for MetadataStore {
    fn lookup(&self, uuid: &ModUuid) -> Option<&ModMetadata> {
        self.index.get(uuid).map(|&slot| &self.records[slot])
    }
}
