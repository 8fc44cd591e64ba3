//! Configuration loading from files.

use std::fs;
use std::path::Path;

use rust_decimal_macros::dec;
use storelens::error::{ConfigError, Error};
use storelens::infrastructure::config::settings::Config;
use storelens::infrastructure::factory::dataset::build_analysis_service;
use storelens::testkit::config::offline_config_toml;
use storelens::testkit::fixture::write_sample;

fn write(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::load_or_default(dir.path().join("absent.toml")).expect("defaults");
    assert_eq!(config.analysis.max_peers, 5);
    assert_eq!(config.analysis.tolerance, dec!(0.2));
}

#[test]
fn load_requires_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = Config::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn file_overrides_analysis_and_aliases() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(
        dir.path(),
        r#"
[analysis]
reference_period = "202506"
tolerance = 0.1
max_peers = 3
containment_fallback = true

[aliases]
"롯데본점" = ["롯데 본점", "Lotte Main"]
"#,
    );

    let config = Config::load(&path).expect("config");
    assert_eq!(config.analysis.period().expect("period").to_string(), "202506");
    assert_eq!(config.analysis.tolerance, dec!(0.1));
    assert_eq!(config.aliases.aliases("롯데본점").len(), 2);
    assert!(config.matcher().containment_fallback());
}

#[test]
fn invalid_values_name_the_field() {
    let cases = [
        ("[analysis]\ntolerance = 0\n", "analysis.tolerance"),
        ("[analysis]\ntolerance = 1\n", "analysis.tolerance"),
        ("[analysis]\nmax_peers = 0\n", "analysis.max_peers"),
        ("[analysis]\nreference_period = \"202513\"\n", "analysis.reference_period"),
        ("[logging]\nformat = \"xml\"\n", "logging.format"),
    ];

    for (toml, field) in cases {
        let err = Config::parse_toml(toml).unwrap_err();
        assert!(err.to_string().contains(field), "{toml:?} gave {err}");
    }
}

#[test]
fn offline_config_drives_analysis() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_sample(dir.path());
    let path = write(dir.path(), &offline_config_toml(dir.path()));

    let config = Config::load(&path).expect("config");
    assert!(!config.llm.enabled);

    let service = build_analysis_service(&config, None).expect("service");
    let revenues: Vec<i64> = service.revenues().iter().map(|r| r.revenue).collect();
    assert_eq!(revenues, vec![1000, 1100, 5000]);
}
