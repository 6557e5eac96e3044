// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use devkit::config::Config;
use devkit::config::types::MarkerStream;
use devkit::logging::LogLevel;
use devkit::progress::sink::SinkStyle;
use std::time::Duration;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_empty_uses_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.probe.timeout(), Duration::from_secs(10));
    assert_eq!(config.progress.scale_max, 100);
    assert_eq!(config.prompt.items, 10);
    assert_eq!(config.prompt.choices.len(), 4);
    assert!(config.tools.is_empty());
}

#[test]
fn config_parse_full() {
    let toml = r#"
[global]
log_level = 3
file_log_level = 5
log_file = "logs/devkit.log"
json_log = true

[probe]
timeout_secs = 4

[clone]
directory = "/work/checkout"
shallow = true
replace_existing = false

[progress]
scale_max = 1000
style = "plain"

[prompt]
choices = ["Red", "Green"]
items = 3
item_delay_ms = 0

[tools.podman]
display_name = "Podman"
command = ["podman", "--version"]
marker = "podman version"

[tools.gcloud]
command = ["gcloud", "--version"]
auth_command = ["gcloud", "auth", "print-access-token"]
auth_target = "Google Cloud"
stream = "either"
"#;
    let config = Config::parse(toml).unwrap();

    assert_eq!(config.global.log_level, LogLevel::INFO);
    assert_eq!(config.global.file_log_level, LogLevel::TRACE);
    assert!(config.global.json_log);
    assert_eq!(config.probe.timeout_secs, 4);
    assert!(config.clone.shallow);
    assert!(!config.clone.replace_existing);
    assert_eq!(config.progress.style, SinkStyle::Plain);
    assert_eq!(config.scale_max().unwrap().get(), 1000);
    assert_eq!(config.prompt.choices, vec!["Red", "Green"]);
    assert_eq!(config.prompt.item_delay(), Duration::ZERO);
    assert_eq!(config.tools["gcloud"].stream, MarkerStream::Either);

    let catalog = config.tool_catalog().unwrap();
    assert_eq!(
        catalog.names(),
        ["docker", "aws", "git", "gcloud", "podman"]
    );
    assert_eq!(catalog.get("podman").unwrap().display(), "Podman");
    assert_eq!(
        catalog.get("gcloud").unwrap().auth_target(),
        Some("Google Cloud")
    );

    let log = config.log_config();
    assert_eq!(log.log_file(), Some("logs/devkit.log"));
    assert!(log.json_file());
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn config_rejects_unknown_section() {
    assert!(Config::parse("[paths]\nprefix = \"/build\"\n").is_err());
}

#[test]
fn config_rejects_zero_timeout() {
    let err = Config::parse("[probe]\ntimeout_secs = 0\n").unwrap_err();
    assert!(format!("{err:#}").contains("timeout_secs"));
}

#[test]
fn config_rejects_empty_choices() {
    assert!(Config::parse("[prompt]\nchoices = []\n").is_err());
}

#[test]
fn config_rejects_tool_without_command() {
    assert!(Config::parse("[tools.empty]\ncommand = []\n").is_err());
}

// =============================================================================
// Loading from files
// =============================================================================

#[test]
fn config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("devkit.toml");
    std::fs::write(&path, "[progress]\nstyle = \"none\"\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.progress.style, SinkStyle::None);
}

#[test]
fn config_later_file_wins() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.toml");
    let second = dir.path().join("second.toml");
    std::fs::write(&first, "[prompt]\nitems = 2\nitem_delay_ms = 5\n").unwrap();
    std::fs::write(&second, "[prompt]\nitems = 8\n").unwrap();

    let config = Config::builder()
        .add_toml_file(&first)
        .add_toml_file(&second)
        .build()
        .unwrap();

    assert_eq!(config.prompt.items, 8);
    assert_eq!(config.prompt.item_delay_ms, 5);
}
