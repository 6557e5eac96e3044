// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{Cli, Command};
use crate::progress::sink::SinkStyle;
use clap::Parser;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["devkit", "version"]).unwrap();
    insta::assert_debug_snapshot!(cli, @r"
    Cli {
        global: GlobalOptions {
            configs: [],
            no_default_config: false,
            log_level: None,
            file_log_level: None,
            log_file: None,
            progress: None,
            options: [],
        },
        command: Some(
            Version,
        ),
    }
    ");
}

#[test]
fn test_parse_no_command() {
    let cli = Cli::try_parse_from(["devkit"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn test_parse_fetch() {
    let cli = Cli::try_parse_from([
        "devkit",
        "fetch",
        "https://example.com/repo.git",
        "README.md",
        "--dest",
        "/work/repo",
        "-b",
        "main",
        "--shallow",
    ])
    .unwrap();
    insta::assert_debug_snapshot!(cli.command, @r#"
    Some(
        Fetch(
            FetchArgs {
                url: "https://example.com/repo.git",
                file: "README.md",
                dest: Some(
                    "/work/repo",
                ),
                branch: Some(
                    "main",
                ),
                shallow: true,
                keep_existing: false,
                force: false,
            },
        ),
    )
    "#);
}

#[test]
fn test_parse_fetch_requires_file() {
    assert!(Cli::try_parse_from(["devkit", "fetch", "https://example.com/repo.git"]).is_err());
}

#[test]
fn test_parse_probe() {
    let cli = Cli::try_parse_from(["devkit", "probe", "docker", "aws", "--json"]).unwrap();
    let Some(Command::Probe(args)) = cli.command else {
        panic!("expected probe command");
    };
    assert_eq!(args.selection(), ["docker", "aws"]);
    assert!(args.json);
    assert!(!args.require);
}

#[test]
fn test_parse_probe_all() {
    let cli = Cli::try_parse_from(["devkit", "probe", "--all", "--require"]).unwrap();
    let Some(Command::Probe(args)) = cli.command else {
        panic!("expected probe command");
    };
    assert!(args.selection().is_empty());
    assert!(args.require);

    assert!(Cli::try_parse_from(["devkit", "probe", "--all", "git"]).is_err());
}

#[test]
fn test_parse_select_overrides() {
    let cli = Cli::try_parse_from(["devkit", "select", "--items", "3", "--delay-ms", "0"]).unwrap();
    let Some(Command::Select(args)) = cli.command else {
        panic!("expected select command");
    };
    assert_eq!(args.items, Some(3));
    assert_eq!(args.delay_ms, Some(0));
}

#[test]
fn test_parse_config_flags_conflict() {
    assert!(Cli::try_parse_from(["devkit", "config", "--json"]).is_ok());
    assert!(Cli::try_parse_from(["devkit", "config", "--json", "--files"]).is_err());
}

#[test]
fn test_global_options_after_command() {
    let cli = Cli::try_parse_from([
        "devkit",
        "branches",
        "https://example.com/repo.git",
        "-l",
        "4",
        "--progress",
        "plain",
        "-c",
        "a.toml",
        "-c",
        "b.toml",
    ])
    .unwrap();
    assert_eq!(cli.global.log_level, Some(4));
    assert_eq!(cli.global.progress, Some(SinkStyle::Plain));
    assert_eq!(cli.global.configs.len(), 2);
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["devkit", "-l", "7", "version"]).is_err());
}

#[test]
fn test_set_requires_section_key() {
    assert!(Cli::try_parse_from(["devkit", "-s", "timeout=3", "version"]).is_err());
    assert!(Cli::try_parse_from(["devkit", "-s", "probe.timeout_secs", "version"]).is_err());
}

#[test]
fn test_to_config_overrides() {
    let cli = Cli::try_parse_from([
        "devkit",
        "-s",
        "probe.timeout_secs = 3",
        "-s",
        "global.log_level=1",
        "-l",
        "3",
        "--log-file",
        "/tmp/devkit.log",
        "--progress",
        "none",
        "version",
    ])
    .unwrap();
    insta::assert_debug_snapshot!(cli.global.to_config_overrides(), @r#"
    [
        (
            "probe.timeout_secs",
            "3",
        ),
        (
            "global.log_level",
            "1",
        ),
        (
            "global.log_level",
            "3",
        ),
        (
            "global.file_log_level",
            "3",
        ),
        (
            "global.log_file",
            "/tmp/devkit.log",
        ),
        (
            "progress.style",
            "none",
        ),
    ]
    "#);
}

#[test]
fn test_file_log_level_kept_when_given() {
    let cli =
        Cli::try_parse_from(["devkit", "-l", "1", "--file-log-level", "5", "version"]).unwrap();
    let overrides = cli.global.to_config_overrides();
    assert!(overrides.contains(&("global.file_log_level".to_string(), "5".to_string())));
    assert!(overrides.contains(&("global.log_level".to_string(), "1".to_string())));
}
