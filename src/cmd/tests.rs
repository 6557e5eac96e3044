// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use futures_util::future::BoxFuture;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::PathBuf;
use std::time::Duration;

use super::branches::write_branches;
use super::fetch::write_file_report;
use super::form::write_summary;
use super::probe::write_report;
use super::select::choose;
use super::{config_loader, load_config, projector};
use crate::cli::global::GlobalOptions;
use crate::error::ProcessError;
use crate::logging::LogLevel;
use crate::probe::tools::{self, OutputMatcher, Stage, ToolSpec};
use crate::probe::{CommandOutput, CommandRunner, Prober};
use crate::progress::sink::SinkStyle;
use crate::prompt::FormAnswers;

/// Replies by full command line; unknown commands are missing executables.
#[derive(Default)]
struct ScriptedRunner(HashMap<&'static str, CommandOutput>);

impl ScriptedRunner {
    fn reply(mut self, command: &'static str, output: CommandOutput) -> Self {
        self.0.insert(command, output);
        self
    }
}

impl CommandRunner for ScriptedRunner {
    fn run<'a>(
        &'a self,
        argv: &'a [String],
        _timeout: Duration,
    ) -> BoxFuture<'a, Result<CommandOutput, ProcessError>> {
        let reply = self.0.get(argv.join(" ").as_str()).cloned();
        Box::pin(async move {
            reply.ok_or_else(|| ProcessError::ExecutableNotFound {
                name: argv.first().cloned().unwrap_or_default(),
            })
        })
    }
}

async fn render(specs: &[ToolSpec], runner: ScriptedRunner) -> String {
    let results = Prober::new(runner).probe_all(specs).await;
    let mut out = Vec::new();
    write_report(&mut out, specs, &results).unwrap();
    String::from_utf8(out).unwrap()
}

fn write_toml(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn isolated(configs: Vec<PathBuf>) -> GlobalOptions {
    GlobalOptions {
        configs,
        no_default_config: true,
        ..GlobalOptions::default()
    }
}

#[tokio::test]
async fn test_probe_report_builtin_tools() {
    let runner = ScriptedRunner::default()
        .reply(
            "docker --version",
            CommandOutput::new(0, "Docker version 27.0.3, build 7d4bcd8\n", ""),
        )
        .reply("aws --version", CommandOutput::new(0, "", "aws-cli/1.29.0 Python/3.11\n"))
        .reply(
            "aws sts get-caller-identity",
            CommandOutput::new(255, "", "Unable to locate credentials\n"),
        );

    insta::assert_snapshot!(render(&tools::builtin(), runner).await.trim_end(), @r"
    Docker is installed.
    AWS CLI is installed.
    AWS CLI is not connected to an AWS account.
    Git is not installed.
    ");
}

#[tokio::test]
async fn test_probe_report_authenticated() {
    let runner = ScriptedRunner::default()
        .reply("aws --version", CommandOutput::new(0, "aws-cli/2.15.0\n", ""))
        .reply("aws sts get-caller-identity", CommandOutput::new(0, "{}", ""));

    insta::assert_snapshot!(render(&[tools::aws()], runner).await.trim_end(), @r"
    AWS CLI is installed.
    AWS CLI is connected to an AWS account.
    ");
}

#[tokio::test]
async fn test_probe_report_auth_without_target() {
    let spec = ToolSpec::new("gh", Stage::new(["gh", "--version"], OutputMatcher::Always))
        .with_auth(
            Stage::new(["gh", "auth", "status"], OutputMatcher::Always),
            None,
        );
    let runner = ScriptedRunner::default()
        .reply("gh --version", CommandOutput::new(0, "gh version 2.40.0", ""))
        .reply("gh auth status", CommandOutput::new(0, "", ""));

    assert_eq!(render(&[spec], runner).await, "gh is installed.\ngh is connected.\n");
}

#[tokio::test]
async fn test_probe_report_skips_auth_when_missing() {
    let output = render(&[tools::aws()], ScriptedRunner::default()).await;
    assert_eq!(output, "AWS CLI is not installed.\n");
}

#[test]
fn test_file_report() {
    let mut found = Vec::new();
    write_file_report(&mut found, "README.md", Some("# Title\nbody")).unwrap();
    assert_eq!(
        String::from_utf8(found).unwrap(),
        "\nContents of README.md:\n# Title\nbody\n"
    );

    let mut missing = Vec::new();
    write_file_report(&mut missing, "docs/x.md", None).unwrap();
    assert_eq!(
        String::from_utf8(missing).unwrap(),
        "File docs/x.md not found in the repository.\n"
    );
}

#[test]
fn test_branches_output() {
    let mut out = Vec::new();
    write_branches(&mut out, &["main", "feature/login"]).unwrap();
    insta::assert_snapshot!(String::from_utf8(out).unwrap().trim_end(), @r"
    Branches:
    main
    feature/login
    ");

    let mut empty = Vec::new();
    write_branches::<_, &str>(&mut empty, &[]).unwrap();
    assert_eq!(String::from_utf8(empty).unwrap(), "Branches:\n");
}

#[test]
fn test_choose_announces_selection() {
    let choices: Vec<String> = ["Option A", "Option B", "Option C", "Option D"]
        .map(String::from)
        .to_vec();
    let mut output = Vec::new();

    let choice = choose(&choices, &mut Cursor::new("x\n3\n"), &mut output).unwrap();

    assert_eq!(choice, "Option C");
    let text = String::from_utf8(output).unwrap();
    assert!(text.starts_with("Choose an option to process:\n"));
    assert!(text.ends_with("You selected: Option C\nStarting processing...\n"));
}

#[test]
fn test_form_summary_omits_password() {
    let answers = FormAnswers {
        username: "alice".to_string(),
        password: "correct horse".to_string(),
        file_path: PathBuf::from("/etc/hosts"),
    };
    let mut out = Vec::new();
    write_summary(&mut out, &answers).unwrap();
    let text = String::from_utf8(out).unwrap();

    insta::assert_snapshot!(text.trim_end(), @r"
    Form completed:
      Username:  alice
      File path: /etc/hosts
    ");
    assert!(!text.contains("correct horse"));
}

#[test]
fn test_load_config_layers_files_and_flags() {
    let dir = tempfile::tempdir().unwrap();
    let base = write_toml(&dir, "base.toml", "[probe]\ntimeout_secs = 20\n\n[prompt]\nitems = 4\n");
    let local = write_toml(&dir, "local.toml", "[probe]\ntimeout_secs = 30\n");

    let mut global = isolated(vec![base, local]);
    global.options = vec![("prompt.items".to_string(), "7".to_string())];
    global.log_level = Some(4);
    global.progress = Some(SinkStyle::None);

    let config = load_config(&global).unwrap();

    assert_eq!(config.probe.timeout_secs, 30);
    assert_eq!(config.prompt.items, 7);
    assert_eq!(config.global.log_level, LogLevel::DEBUG);
    assert_eq!(config.global.file_log_level, LogLevel::DEBUG);
    assert_eq!(config.progress.style, SinkStyle::None);
}

#[test]
fn test_load_config_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let global = isolated(vec![dir.path().join("absent.toml")]);
    assert!(load_config(&global).is_err());
}

#[test]
fn test_load_config_rejects_invalid_override() {
    let mut global = isolated(Vec::new());
    global.options = vec![("progress.scale_max".to_string(), "0".to_string())];
    let err = load_config(&global).unwrap_err();
    assert!(format!("{err:#}").contains("scale_max"), "{err:#}");
}

#[test]
fn test_config_loader_lists_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_toml(&dir, "extra.toml", "");
    let loader = config_loader(&isolated(vec![path.clone()])).unwrap();
    assert_eq!(loader.loaded_files(), vec![("file".to_string(), path)]);
}

#[test]
fn test_projector_uses_configured_scale() {
    let mut global = isolated(Vec::new());
    global.options = vec![
        ("progress.scale_max".to_string(), "1000".to_string()),
        ("progress.style".to_string(), "none".to_string()),
    ];
    let config = load_config(&global).unwrap();

    let mut projector = projector(&config, "test").unwrap();
    projector.observe(1, Some(4)).unwrap();

    assert_eq!(projector.scale_max(), 1000);
    assert_eq!(projector.emitted(), 250);
}
