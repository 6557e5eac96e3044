// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tool definitions: built-in probes and probes declared in configuration.
//!
//! ```text
//! name    install                          auth
//! docker  docker --version  "Docker version"   -
//! aws     aws --version     "aws-cli" (either)  aws sts get-caller-identity
//! git     git --version     "git version"       -
//! ```

use std::collections::BTreeMap;

use super::CommandOutput;
use crate::config::types::{MarkerStream, ToolConfig};
use crate::error::ConfigError;

/// Which captured stream must contain a marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMatcher {
    /// Any output is accepted (exit status alone decides).
    Always,
    StdoutContains(String),
    StderrContains(String),
    EitherContains(String),
}

impl OutputMatcher {
    #[must_use]
    pub fn matches(&self, output: &CommandOutput) -> bool {
        match self {
            Self::Always => true,
            Self::StdoutContains(marker) => output.stdout.contains(marker.as_str()),
            Self::StderrContains(marker) => output.stderr.contains(marker.as_str()),
            Self::EitherContains(marker) => {
                output.stdout.contains(marker.as_str()) || output.stderr.contains(marker.as_str())
            }
        }
    }

    fn from_config(marker: Option<&str>, stream: MarkerStream) -> Self {
        let Some(marker) = marker.filter(|m| !m.is_empty()) else {
            return Self::Always;
        };
        let marker = marker.to_string();
        match stream {
            MarkerStream::Stdout => Self::StdoutContains(marker),
            MarkerStream::Stderr => Self::StderrContains(marker),
            MarkerStream::Either => Self::EitherContains(marker),
        }
    }
}

/// One command plus the check applied to its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    argv: Vec<String>,
    matcher: OutputMatcher,
}

impl Stage {
    pub fn new<I, S>(argv: I, matcher: OutputMatcher) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            matcher,
        }
    }

    #[must_use]
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    #[must_use]
    pub const fn matcher(&self) -> &OutputMatcher {
        &self.matcher
    }
}

/// A probeable tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    name: String,
    display_name: String,
    install: Stage,
    auth: Option<Stage>,
    auth_target: Option<String>,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, install: Stage) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            install,
            auth: None,
            auth_target: None,
        }
    }

    /// Name used in human-readable messages.
    #[must_use]
    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Adds an authentication stage. `target` completes "is connected to ...".
    #[must_use]
    pub fn with_auth(mut self, stage: Stage, target: Option<&str>) -> Self {
        self.auth = Some(stage);
        self.auth_target = target.map(str::to_string);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn display(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub const fn install(&self) -> &Stage {
        &self.install
    }

    #[must_use]
    pub const fn auth(&self) -> Option<&Stage> {
        self.auth.as_ref()
    }

    #[must_use]
    pub fn auth_target(&self) -> Option<&str> {
        self.auth_target.as_deref()
    }

    /// Builds a tool from a `[tools.<name>]` table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a command is empty.
    pub fn from_config(name: &str, config: &ToolConfig) -> Result<Self, ConfigError> {
        let section = format!("tools.{name}");
        if config.command.is_empty() {
            return Err(ConfigError::InvalidValue {
                section,
                key: "command".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let install = Stage::new(
            config.command.iter().cloned(),
            OutputMatcher::from_config(config.marker.as_deref(), config.stream),
        );
        let mut spec = Self::new(name, install);
        if let Some(display) = &config.display_name {
            spec = spec.display_name(display.clone());
        }

        if let Some(auth) = &config.auth_command {
            if auth.is_empty() {
                return Err(ConfigError::InvalidValue {
                    section,
                    key: "auth_command".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
            let stage = Stage::new(auth.iter().cloned(), OutputMatcher::Always);
            spec = spec.with_auth(stage, config.auth_target.as_deref());
        }
        Ok(spec)
    }
}

fn version_argv(program: &str) -> [String; 2] {
    [program.to_string(), "--version".to_string()]
}

/// Container runtime.
#[must_use]
pub fn docker() -> ToolSpec {
    ToolSpec::new(
        "docker",
        Stage::new(
            version_argv("docker"),
            OutputMatcher::StdoutContains("Docker version".to_string()),
        ),
    )
    .display_name("Docker")
}

/// AWS CLI. Version 1 prints its version on stderr, version 2 on stdout.
#[must_use]
pub fn aws() -> ToolSpec {
    ToolSpec::new(
        "aws",
        Stage::new(
            version_argv("aws"),
            OutputMatcher::EitherContains("aws-cli".to_string()),
        ),
    )
    .display_name("AWS CLI")
    .with_auth(
        Stage::new(["aws", "sts", "get-caller-identity"], OutputMatcher::Always),
        Some("an AWS account"),
    )
}

#[must_use]
pub fn git() -> ToolSpec {
    ToolSpec::new(
        "git",
        Stage::new(
            version_argv("git"),
            OutputMatcher::StdoutContains("git version".to_string()),
        ),
    )
    .display_name("Git")
}

/// Built-in tools, in display order.
#[must_use]
pub fn builtin() -> Vec<ToolSpec> {
    vec![docker(), aws(), git()]
}

/// Built-in tools plus configured ones, keyed by name.
///
/// A configured tool replaces a built-in of the same name.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    tools: BTreeMap<String, ToolSpec>,
    order: Vec<String>,
}

impl ToolCatalog {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a malformed `[tools.<name>]` table.
    pub fn new(configured: &BTreeMap<String, ToolConfig>) -> Result<Self, ConfigError> {
        let mut catalog = Self::default();
        for spec in builtin() {
            catalog.insert(spec);
        }
        for (name, config) in configured {
            catalog.insert(ToolSpec::from_config(name, config)?);
        }
        Ok(catalog)
    }

    fn insert(&mut self, spec: ToolSpec) {
        if !self.tools.contains_key(spec.name()) {
            self.order.push(spec.name().to_string());
        }
        self.tools.insert(spec.name().to_string(), spec);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.get(name)
    }

    /// Looks up several tools by name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownTool` for the first unknown name.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<ToolSpec>, ConfigError> {
        names
            .iter()
            .map(|name| {
                self.get(name.as_ref())
                    .cloned()
                    .ok_or_else(|| ConfigError::UnknownTool(name.as_ref().to_string()))
            })
            .collect()
    }

    /// Every tool, built-ins first.
    #[must_use]
    pub fn all(&self) -> Vec<ToolSpec> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.order
    }
}
