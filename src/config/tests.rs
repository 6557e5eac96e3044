// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

use super::types::{MarkerStream, ToolConfig};
use super::{Config, ConfigLoader};
use crate::logging::LogLevel;
use crate::progress::sink::SinkStyle;

#[test]
fn test_default_config() {
    let config = Config::default();
    insta::assert_debug_snapshot!(
        (
            config.global.log_level.as_u8(),
            config.probe.timeout(),
            config.clone.shallow,
            config.clone.replace_existing,
            config.progress.scale_max,
            config.progress.style,
            &config.prompt.choices,
            config.prompt.items,
            config.prompt.item_delay(),
        ),
        @r#"
    (
        2,
        10s,
        false,
        true,
        100,
        Bar,
        [
            "Option A",
            "Option B",
            "Option C",
            "Option D",
        ],
        10,
        500ms,
    )
    "#
    );
    assert!(config.clone.directory.ends_with("repo"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_parse() {
    let config = Config::parse(
        r#"
[global]
log_level = 4
json_log = true

[probe]
timeout_secs = 3

[progress]
scale_max = 50
style = "plain"

[prompt]
choices = ["red", "green"]
"#,
    )
    .expect("config should parse");

    assert_eq!(config.global.log_level, LogLevel::DEBUG);
    assert!(config.global.json_log);
    assert_eq!(config.probe.timeout(), Duration::from_secs(3));
    assert_eq!(config.scale_max().map(std::num::NonZeroU64::get).ok(), Some(50));
    assert_eq!(config.progress.style, SinkStyle::Plain);
    assert_eq!(config.prompt.choices, ["red", "green"]);
    // Untouched sections keep their defaults
    assert_eq!(config.prompt.items, 10);
}

#[test]
fn test_config_parse_tools() {
    let config = Config::parse(
        r#"
[tools.node]
command = ["node", "--version"]
marker = "v"
stream = "either"
"#,
    )
    .expect("config should parse");

    assert_eq!(
        config.tools.get("node"),
        Some(&ToolConfig {
            command: vec!["node".into(), "--version".into()],
            marker: Some("v".into()),
            stream: MarkerStream::Either,
            ..ToolConfig::default()
        })
    );
    let catalog = config.tool_catalog().expect("catalog should build");
    assert!(catalog.get("node").is_some());
    assert!(catalog.get("docker").is_some());
}

#[test]
fn test_validation_errors() {
    let cases = [
        "[progress]\nscale_max = 0",
        "[probe]\ntimeout_secs = 0",
        "[prompt]\nchoices = []",
        "[tools.empty]\ncommand = []",
    ];
    let messages: Vec<String> = cases
        .iter()
        .map(|toml| {
            Config::parse(toml)
                .expect_err("validation should fail")
                .to_string()
        })
        .collect();

    insta::assert_debug_snapshot!(messages, @r#"
    [
        "invalid value for 'scale_max' in section '[progress]': must be greater than 0",
        "invalid value for 'timeout_secs' in section '[probe]': must be greater than 0",
        "invalid value for 'choices' in section '[prompt]': must not be empty",
        "invalid value for 'command' in section '[tools.empty]': must not be empty",
    ]
    "#);
}

#[test]
fn test_deny_unknown_fields() {
    assert!(Config::parse("[probe]\ntimeout = 3").is_err());
    assert!(Config::parse("[nonsense]\nvalue = 1").is_err());
}

#[test]
fn test_log_level_out_of_range_rejected() {
    assert!(Config::parse("[global]\nlog_level = 7").is_err());
}

#[test]
fn test_log_config_from_global() {
    let config = Config::parse("[global]\nlog_level = 3\nlog_file = \"devkit.log\"")
        .expect("config should parse");
    let log = config.log_config();

    assert_eq!(log.console_level(), LogLevel::INFO);
    assert_eq!(log.file_level(), LogLevel::DEBUG);
    assert_eq!(log.log_file(), Some("devkit.log"));
    assert!(!log.json_file());
}

#[test]
fn test_config_loader_tracks_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("[probe]\ntimeout_secs = 2")
        .add_toml_file_optional("/nonexistent/devkit.toml");

    insta::assert_debug_snapshot!(loader.format_loaded_files(), @r#"
    [
        "1. [string] <string>",
    ]
    "#);
}

#[test]
fn test_config_loader_missing_required_file() {
    let result = ConfigLoader::new()
        .add_toml_file("/nonexistent/devkit.toml")
        .build();
    assert!(result.is_err());
}

#[test]
fn test_config_loader_invalid_toml() {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(file, "this is not valid toml {{{{{{").expect("failed to write");

    assert!(ConfigLoader::new().add_toml_file(file.path()).build().is_err());
}

#[test]
fn test_config_loader_layered_sources() {
    let mut base = NamedTempFile::new().expect("failed to create temp file");
    writeln!(base, "[probe]\ntimeout_secs = 4\n[clone]\nshallow = true").expect("failed to write");
    let mut local = NamedTempFile::new().expect("failed to create temp file");
    writeln!(local, "[probe]\ntimeout_secs = 8").expect("failed to write");

    let config = ConfigLoader::new()
        .add_toml_file(base.path())
        .add_toml_file(local.path())
        .build()
        .expect("build should succeed");

    assert_eq!(config.probe.timeout_secs, 8, "later file wins");
    assert!(config.clone.shallow, "earlier file still applies");
}

#[test]
fn test_config_loader_set_override() {
    let config = ConfigLoader::new()
        .add_toml_str("[progress]\nstyle = \"bar\"")
        .set("progress.style", "none")
        .expect("set should succeed")
        .set_optional("probe.timeout_secs", None::<i64>)
        .expect("set_optional should succeed")
        .set_optional("prompt.items", Some(3_i64))
        .expect("set_optional should succeed")
        .build()
        .expect("build should succeed");

    assert_eq!(config.progress.style, SinkStyle::None);
    assert_eq!(config.probe.timeout_secs, 10);
    assert_eq!(config.prompt.items, 3);
}

#[test]
fn test_config_loader_with_env_prefix() {
    // SAFETY: the variable name is unique to this test
    unsafe {
        std::env::set_var("DEVKITTEST_PROBE__TIMEOUT_SECS", "7");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[probe]\ntimeout_secs = 2")
        .with_env_prefix("DEVKITTEST")
        .build()
        .expect("build should succeed");

    // SAFETY: same as above
    unsafe {
        std::env::remove_var("DEVKITTEST_PROBE__TIMEOUT_SECS");
    }

    assert_eq!(config.probe.timeout_secs, 7, "env var should override TOML value");
}

#[test]
fn test_format_options_deterministic() {
    let config = Config::parse(
        "[tools.node]\ncommand = [\"node\", \"--version\"]\n[clone]\ndirectory = \"/work/repo\"",
    )
    .expect("config should parse");

    insta::assert_snapshot!(config.format_options().join("\n"), @r"
    clone.directory        = /work/repo
    clone.replace_existing = true
    clone.shallow          = false
    global.file_log_level  = 4
    global.json_log        = false
    global.log_level       = 2
    probe.timeout_secs     = 10
    progress.scale_max     = 100
    progress.style         = bar
    prompt.choices         = Option A, Option B, Option C, Option D
    prompt.item_delay_ms   = 500
    prompt.items           = 10
    tools.node.command     = node --version
    ");
}

#[test]
fn test_config_serializes_to_json() {
    let config = Config::parse("[clone]\ndirectory = \"/work/repo\"").expect("config should parse");
    let json = serde_json::to_value(&config).expect("config should serialize");

    assert_eq!(json["probe"]["timeout_secs"], 10);
    assert_eq!(json["progress"]["style"], "bar");
    assert_eq!(json["clone"]["directory"], "/work/repo");
    assert!(json.get("tools").is_none());
}
