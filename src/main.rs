// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Probe | Fetch | Branches | Select | Form | Config
//! ```

use std::process::ExitCode;

use devkit::cli::{self, Command};
use devkit::cmd::branches::run_branches_command;
use devkit::cmd::config::run_config_command;
use devkit::cmd::fetch::run_fetch_command;
use devkit::cmd::form::run_form_command;
use devkit::cmd::load_config;
use devkit::cmd::probe::run_probe_command;
use devkit::cmd::select::run_select_command;
use devkit::logging::init_logging;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let command = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            return ExitCode::SUCCESS;
        }
        Some(command) => command,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            return ExitCode::FAILURE;
        }
    };

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&config.log_config()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let result = match command {
        Command::Probe(args) => run_probe_command(args, &config).await,
        Command::Fetch(args) => run_fetch_command(args, &config).await,
        Command::Branches(args) => run_branches_command(args, &config).await,
        Command::Select(args) => run_select_command(args, &config).await,
        Command::Form => run_form_command(),
        Command::Config(args) => run_config_command(args, &config, &cli.global),
        Command::Version => Ok(()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}
