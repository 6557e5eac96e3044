// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Select command: pick an option, then simulate processing it.

use anyhow::Context;
use std::io::{BufRead, Write};
use std::time::Duration;

use crate::cli::prompt::SelectArgs;
use crate::cmd::projector;
use crate::config::Config;
use crate::error::Result;
use crate::prompt::{select, simulate_processing};

pub const SELECT_MESSAGE: &str = "Choose an option to process:";
pub const PROCESSING_LABEL: &str = "Processing items";

/// Main handler for the select command.
///
/// # Errors
///
/// Returns an error if input ends before a choice is made, or if the
/// progress display fails.
pub async fn run_select_command(args: &SelectArgs, config: &Config) -> Result<()> {
    let items = args.items.unwrap_or(config.prompt.items);
    let delay = args
        .delay_ms
        .map_or_else(|| config.prompt.item_delay(), Duration::from_millis);

    choose(
        &config.prompt.choices,
        &mut std::io::stdin().lock(),
        &mut std::io::stdout().lock(),
    )?;

    let mut projector = projector(config, PROCESSING_LABEL)?;
    simulate_processing(items, delay, &mut projector).await?;
    Ok(())
}

/// Shows the menu and announces the choice.
///
/// # Errors
///
/// Returns an error if no valid choice is read.
pub fn choose<R: BufRead, W: Write>(
    choices: &[String],
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    let index = select(SELECT_MESSAGE, choices, input, output)?;
    let choice = choices
        .get(index)
        .cloned()
        .context("selection out of range")?;
    writeln!(output, "You selected: {choice}")?;
    writeln!(output, "Starting processing...")?;
    output.flush()?;
    Ok(choice)
}
