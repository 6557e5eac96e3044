// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Line-based interactive prompts.
//!
//! ```text
//! select(message, choices)   numbered menu, 1-based answer, re-asks on bad input
//! fill_form()                username, password (SecretReader), existing file path
//! simulate_processing()      N items, sleep each, observe (i + 1, N), finish
//! ```
//!
//! Prompts read from any `BufRead` and write to any `Write`, so commands pass
//! the locked terminal and tests pass byte buffers.


use std::fmt;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::error::{KitResult, PromptError};
use crate::progress::{DisplaySink, Projector};

/// Empty secrets accepted before giving up; a closed terminal reads as empty.
const SECRET_ATTEMPTS: usize = 3;

/// Result type for prompts.
pub type PromptResult<T> = std::result::Result<T, PromptError>;

/// Source of secrets that must not be echoed.
pub trait SecretReader {
    /// Shows `prompt` and reads one secret line.
    ///
    /// # Errors
    ///
    /// Returns `PromptError::Io` if the terminal cannot be read.
    fn read_secret(&mut self, prompt: &str) -> PromptResult<String>;
}

/// Reads secrets from the controlling terminal with echo disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSecret;

impl SecretReader for TerminalSecret {
    fn read_secret(&mut self, prompt: &str) -> PromptResult<String> {
        Ok(rpassword::prompt_password(prompt)?)
    }
}

/// Answers collected by [`fill_form`].
#[derive(Clone, PartialEq, Eq)]
pub struct FormAnswers {
    pub username: String,
    pub password: String,
    pub file_path: PathBuf,
}

impl fmt::Debug for FormAnswers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormAnswers")
            .field("username", &self.username)
            .field("password", &"[hidden]")
            .field("file_path", &self.file_path)
            .finish()
    }
}

/// Reads one line without its terminator; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> PromptResult<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Prints `question` and reads answers until `accept` returns a value.
fn ask<R, W, T, F>(
    input: &mut R,
    output: &mut W,
    field: &str,
    question: &str,
    mut accept: F,
) -> PromptResult<T>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> Result<T, String>,
{
    loop {
        write!(output, "{question} ")?;
        output.flush()?;
        let Some(answer) = read_line(input)? else {
            return Err(PromptError::EndOfInput {
                field: field.to_string(),
            });
        };
        match accept(answer.trim()) {
            Ok(value) => return Ok(value),
            Err(hint) => {
                debug!(field, "rejected answer");
                writeln!(output, "{hint}")?;
            }
        }
    }
}

/// Shows a numbered menu and returns the index of the chosen entry.
///
/// # Errors
///
/// - `PromptError::NoChoices` for an empty menu.
/// - `PromptError::EndOfInput` if input ends before a valid answer.
/// - `PromptError::Io` on terminal failures.
pub fn select<R, W, S>(
    message: &str,
    choices: &[S],
    input: &mut R,
    output: &mut W,
) -> PromptResult<usize>
where
    R: BufRead,
    W: Write,
    S: AsRef<str>,
{
    if choices.is_empty() {
        return Err(PromptError::NoChoices);
    }

    writeln!(output, "{message}")?;
    for (i, choice) in choices.iter().enumerate() {
        writeln!(output, "  {}) {}", i + 1, choice.as_ref())?;
    }

    let count = choices.len();
    let question = format!("Enter a number [1-{count}]:");
    ask(input, output, "selection", &question, |answer| {
        match answer.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => Ok(n - 1),
            _ => Err(format!("Please enter a number between 1 and {count}.")),
        }
    })
}

/// Asks for a username, a password and the path of an existing file.
///
/// # Errors
///
/// - `PromptError::EndOfInput` if input ends before every answer is given.
/// - `PromptError::TooManyAttempts` if only empty passwords are entered.
/// - `PromptError::Io` on terminal failures.
pub fn fill_form<R, W, P>(
    input: &mut R,
    output: &mut W,
    secrets: &mut P,
) -> PromptResult<FormAnswers>
where
    R: BufRead,
    W: Write,
    P: SecretReader + ?Sized,
{
    let username = ask(input, output, "username", "Username:", |answer| {
        if answer.is_empty() {
            Err("Username must not be empty.".to_string())
        } else {
            Ok(answer.to_string())
        }
    })?;

    let mut password = None;
    for _ in 0..SECRET_ATTEMPTS {
        output.flush()?;
        let secret = secrets.read_secret("Password: ")?;
        if !secret.is_empty() {
            password = Some(secret);
            break;
        }
        writeln!(output, "Password must not be empty.")?;
    }
    let password = password.ok_or_else(|| PromptError::TooManyAttempts {
        field: "password".to_string(),
    })?;

    let file_path = ask(input, output, "file_path", "File path:", |answer| {
        let path = PathBuf::from(answer);
        if !answer.is_empty() && path.exists() {
            Ok(path)
        } else {
            Err(format!("File '{answer}' does not exist."))
        }
    })?;

    Ok(FormAnswers {
        username,
        password,
        file_path,
    })
}

/// Processes `total_items` simulated items, `delay` each, reporting progress.
///
/// # Errors
///
/// Propagates display sink failures.
pub async fn simulate_processing<S: DisplaySink>(
    total_items: u64,
    delay: Duration,
    projector: &mut Projector<S>,
) -> KitResult<()> {
    for done in 1..=total_items {
        tokio::time::sleep(delay).await;
        projector.observe(done, Some(total_items))?;
    }
    projector.finish()?;
    Ok(())
}
