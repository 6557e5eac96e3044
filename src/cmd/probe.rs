// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Probe command implementation.

use anyhow::bail;
use std::io::Write;

use crate::cli::probe::ProbeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::probe::tools::ToolSpec;
use crate::probe::{Authentication, ProbeResult, Prober};

/// Main handler for the probe command.
///
/// # Errors
///
/// Returns an error if a requested tool is unknown, or if `--require` is
/// given and a tool is not installed.
pub async fn run_probe_command(args: &ProbeArgs, config: &Config) -> Result<()> {
    let catalog = config.tool_catalog()?;
    let specs = if args.selection().is_empty() {
        catalog.all()
    } else {
        catalog.select(args.selection())?
    };

    let prober = Prober::default().with_timeout(config.probe.timeout());
    let results = prober.probe_all(&specs).await;

    let mut stdout = std::io::stdout().lock();
    if args.json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(&results)?)?;
    } else {
        write_report(&mut stdout, &specs, &results)?;
    }

    if args.require {
        let missing: Vec<&str> = results
            .iter()
            .filter(|r| !r.installed())
            .map(ProbeResult::tool)
            .collect();
        if !missing.is_empty() {
            bail!("required tools are not installed: {}", missing.join(", "));
        }
    }
    Ok(())
}

/// Writes the human-readable lines for each probed tool.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_report<W: Write>(
    out: &mut W,
    specs: &[ToolSpec],
    results: &[ProbeResult],
) -> std::io::Result<()> {
    for (spec, result) in specs.iter().zip(results) {
        let name = spec.display();
        if !result.installed() {
            writeln!(out, "{name} is not installed.")?;
            continue;
        }
        writeln!(out, "{name} is installed.")?;

        if spec.auth().is_none() {
            continue;
        }
        let target = spec
            .auth_target()
            .map_or_else(String::new, |t| format!(" to {t}"));
        match result.authenticated() {
            Authentication::Authenticated => writeln!(out, "{name} is connected{target}.")?,
            Authentication::Unauthenticated => {
                writeln!(out, "{name} is not connected{target}.")?;
            }
            Authentication::Unknown => {}
        }
    }
    Ok(())
}
