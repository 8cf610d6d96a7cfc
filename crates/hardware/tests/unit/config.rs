//! # Configuration Tests
//!
//! Defaults, JSON deserialization and memory-map validation.

use std::io::Write;

use coproc_core::common::Error;
use coproc_core::config::*;
use coproc_core::units::UnitKind;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.units.adder, Some(0x43C0_0000));
    assert_eq!(config.units.multiplier, Some(0x43C1_0000));
    assert_eq!(config.units.divider, Some(0x43C2_0000));
    assert_eq!(config.units.sqrt, Some(0x43C3_0000));
    assert_eq!(config.units.random, Some(0x43C4_0000));
    assert_eq!(config.estimators.leibniz_iterations, 1_000_000);
    assert_eq!(config.estimators.monte_carlo_samples, 1_000_000);
    assert_eq!(config.diagnostics.histogram_bins, 50);
    assert_eq!(config.simulation.random_sequence, None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_object_matches_defaults() {
    let parsed = Config::from_json_str("{}").expect("empty object is valid");
    let default = Config::default();
    assert_eq!(parsed.units.unit_map(), default.units.unit_map());
    assert_eq!(parsed.estimators.leibniz_iterations, default.estimators.leibniz_iterations);
    assert_eq!(parsed.simulation.random_seed, default.simulation.random_seed);
}

#[test]
fn test_partial_sections_keep_other_defaults() {
    let config = Config::from_json_str(
        r#"{ "units": { "sqrt": null, "adder": 1073741824 }, "estimators": { "leibniz_iterations": 10 } }"#,
    )
    .expect("valid");
    assert_eq!(config.units.adder, Some(0x4000_0000));
    assert_eq!(config.units.sqrt, None);
    assert_eq!(config.units.divider, Some(0x43C2_0000));
    assert_eq!(config.estimators.leibniz_iterations, 10);
    assert_eq!(config.estimators.monte_carlo_samples, 1_000_000);

    let map = config.units.unit_map();
    assert!(map.get(UnitKind::Sqrt).is_none());
    assert_eq!(map.iter().count(), 4);
}

#[test]
fn test_random_sequence_parses() {
    let config = Config::from_json_str(r#"{ "simulation": { "random_sequence": [0.5, 0.25] } }"#)
        .expect("valid");
    assert_eq!(config.simulation.random_sequence, Some(vec![0.5, 0.25]));
}

#[test]
fn test_unknown_field_rejected() {
    let err = Config::from_json_str(r#"{ "unit": {} }"#).expect_err("typo in section name");
    assert!(matches!(err, Error::ConfigParse(_)));

    let err = Config::from_json_str(r#"{ "units": { "adderr": 0 } }"#).expect_err("typo in unit");
    assert!(matches!(err, Error::ConfigParse(_)));
}

#[test]
fn test_malformed_json_rejected() {
    assert!(matches!(Config::from_json_str("{"), Err(Error::ConfigParse(_))));
}

#[test]
fn test_misaligned_base_rejected() {
    let err = Config::from_json_str(r#"{ "units": { "adder": 1073741826 } }"#).expect_err("misaligned");
    assert!(matches!(err, Error::InvalidConfig(ref msg) if msg.contains("word-aligned")));
}

#[test]
fn test_overlapping_blocks_rejected() {
    let mut config = Config::default();
    config.units.multiplier = Some(0x43C0_0008);
    let err = config.validate().expect_err("overlap");
    assert!(matches!(err, Error::InvalidConfig(ref msg) if msg.contains("overlaps")));

    config.units.multiplier = Some(0x43C0_0010);
    assert!(config.validate().is_ok());
}

#[rstest]
#[case(u64::MAX - 3)]
#[case(0xFFFF_FFF4)]
#[case(0x1_0000_0000)]
fn test_block_past_address_limit_rejected(#[case] base: u64) {
    let json = format!(
        r#"{{ "units": {{ "adder": {base}, "multiplier": null, "divider": null, "sqrt": null, "random": null }} }}"#
    );
    let err = Config::from_json_str(&json).expect_err("past the address limit");
    assert!(matches!(err, Error::InvalidConfig(ref msg) if msg.contains("address limit")));
}

#[test]
fn test_block_ending_at_address_limit_accepted() {
    let mut config = Config::default();
    config.units.random = Some(0xFFFF_FFF0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_zero_histogram_bins_rejected() {
    let err = Config::from_json_str(r#"{ "diagnostics": { "histogram_bins": 0 } }"#).expect_err("no bins");
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn test_empty_random_sequence_rejected() {
    let err = Config::from_json_str(r#"{ "simulation": { "random_sequence": [] } }"#)
        .expect_err("empty sequence");
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(br#"{ "estimators": { "monte_carlo_samples": 42 } }"#)
        .expect("write");
    let config = Config::from_file(file.path()).expect("valid file");
    assert_eq!(config.estimators.monte_carlo_samples, 42);
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = Config::from_file(dir.path().join("absent.json")).expect_err("missing");
    assert!(matches!(err, Error::Io(_)));
}
