// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for devkit using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! devkit [global options] <command>
//! probe [TOOL...] [--all] [--json] [--require]
//! fetch URL FILE [--dest DIR] [--branch B] [--shallow] [--keep-existing | --force]
//! branches URL
//! select [--items N] [--delay-ms MS]
//! form
//! config [--json | --files]
//! version
//! ```

pub mod config;
pub mod global;
pub mod probe;
pub mod prompt;
pub mod repo;

#[cfg(test)]
mod tests;

use crate::cli::config::ConfigArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::probe::ProbeArgs;
use crate::cli::prompt::SelectArgs;
use crate::cli::repo::{BranchesArgs, FetchArgs};
use clap::{Parser, Subcommand};

/// Developer Helper Toolkit
#[derive(Debug, Parser)]
#[command(
    name = "devkit",
    author,
    version,
    about = "Developer Helper Toolkit",
    long_about = "devkit-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Small helpers for everyday development: check which tools\n\
                  are installed, clone a repository and print one of its files,\n\
                  list remote branches, and a couple of interactive prompts.\n\
                  See `devkit <command> --help` for more information about a command.",
    after_help = "CONFIGURATION:\n\n\
                  devkit reads `devkit.toml` from the current directory if it\n\
                  exists, then every file given with --config, then DEVKIT_*\n\
                  environment variables (DEVKIT_PROBE__TIMEOUT_SECS=3), then\n\
                  --set KEY=VALUE and the other command-line flags. Later sources\n\
                  override earlier ones. `devkit config` prints the result."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Checks whether tools are installed and authenticated.
    Probe(ProbeArgs),

    /// Clones a repository and prints one of its files.
    Fetch(FetchArgs),

    /// Lists the branches of a remote repository.
    Branches(BranchesArgs),

    /// Picks an option from a menu, then simulates processing it.
    Select(SelectArgs),

    /// Asks for a username, a password and a file path.
    Form,

    /// Shows the effective configuration.
    Config(ConfigArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
