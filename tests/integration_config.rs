// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use rimsort_rs::config::Config;
use rimsort_rs::config::loader::ConfigLoader;
use rimsort_rs::logging::LogLevel;
use rimsort_rs::metadata::PackageId;
use rimsort_rs::sort::SortMethod;
use std::path::PathBuf;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_sorting_section() {
    let config = Config::parse("[sorting]\nmethod = \"alphabetical\"\n").unwrap();
    insta::assert_yaml_snapshot!(config.sorting, @"method: alphabetical");
}

#[test]
fn config_parse_tiers_section() {
    let toml = r#"
[tiers]
first = ["brrainz.harmony"]
last = ["krkr.rocketman", "dubwise.dubsperformanceanalyzer"]
"#;
    let config = Config::parse(toml).unwrap();
    insta::assert_yaml_snapshot!(config.tiers, @r"
    first:
      - brrainz.harmony
    last:
      - krkr.rocketman
      - dubwise.dubsperformanceanalyzer
    ");
    let seeds = config.tier_seeds().unwrap();
    assert_eq!(seeds.first(), ["brrainz.harmony"]);
}

#[test]
fn config_parse_cycles_section() {
    let toml = r#"
[[cycles.ignored_edges]]
from = "Some.Mod"
to = "Other.Mod"
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(
        config.mitigator().ignored(),
        [(PackageId::new("some.mod"), PackageId::new("other.mod"))]
    );
}

#[test]
fn config_empty_ignored_edges_disable_mitigation() {
    let config = Config::parse("[cycles]\nignored_edges = []\n").unwrap();
    assert!(config.mitigator().ignored().is_empty());
}

#[test]
fn config_parse_invalid_toml() {
    assert!(Config::parse("[sorting\nmethod = 1").is_err());
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn config_later_files_override_earlier() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let base = temp.path().join("rimsort.toml");
    let extra = temp.path().join("extra.toml");
    std::fs::write(
        &base,
        "[global]\noutput_log_level = 1\n[sorting]\nmethod = \"alphabetical\"\n",
    )
    .unwrap();
    std::fs::write(&extra, "[global]\noutput_log_level = 4\n").unwrap();

    let config = ConfigLoader::new()
        .add_toml_file_optional(&base)
        .add_toml_file(&extra)
        .build()
        .unwrap();

    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.sorting.method, SortMethod::Alphabetical);
}

#[test]
fn config_overrides_beat_files() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let path = temp.path().join("rimsort.toml");
    std::fs::write(&path, "[metadata]\npath = \"from-file.json\"\n").unwrap();

    let config = ConfigLoader::new()
        .add_toml_file(&path)
        .apply_overrides(&["metadata.path=from-cli.json", "global.file_log_level=0"])
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.metadata.path, Some(PathBuf::from("from-cli.json")));
    assert_eq!(config.global.file_log_level, LogLevel::SILENT);
}

#[test]
fn config_invalid_override_value() {
    let result = ConfigLoader::new()
        .apply_overrides(&["sorting.method=random"])
        .unwrap()
        .build();
    assert!(result.is_err());
}
