// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Display sinks for projected progress.
//!
//! ```text
//! DisplaySink: set(v) advance(n) complete() busy()
//!   BarSink     indicatif bar on stderr   [####>---] 40/100, spinner while busy
//!   LogSink     tracing info events
//!   WriterSink  "label: 40/100" lines to any io::Write
//!   NoopSink
//! ```

use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::info;

use super::ProgressResult;
use crate::error::ProgressError;

/// Consumer of advancement events.
pub trait DisplaySink {
    /// Moves the display to an absolute position.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::SinkUnavailable` if the update cannot be shown.
    fn set(&mut self, value: u64) -> ProgressResult<()>;

    /// Moves the display forward by `amount`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::SinkUnavailable` if the update cannot be shown.
    fn advance(&mut self, amount: u64) -> ProgressResult<()>;

    /// Marks the operation as done.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::SinkUnavailable` if the update cannot be shown.
    fn complete(&mut self) -> ProgressResult<()>;

    /// Shows that the operation is running but has not reported a size yet.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::SinkUnavailable` if the update cannot be shown.
    fn busy(&mut self) -> ProgressResult<()> {
        Ok(())
    }
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn set(&mut self, value: u64) -> ProgressResult<()> {
        (**self).set(value)
    }

    fn advance(&mut self, amount: u64) -> ProgressResult<()> {
        (**self).advance(amount)
    }

    fn complete(&mut self) -> ProgressResult<()> {
        (**self).complete()
    }

    fn busy(&mut self) -> ProgressResult<()> {
        (**self).busy()
    }
}

impl<T: DisplaySink + ?Sized> DisplaySink for Box<T> {
    fn set(&mut self, value: u64) -> ProgressResult<()> {
        (**self).set(value)
    }

    fn advance(&mut self, amount: u64) -> ProgressResult<()> {
        (**self).advance(amount)
    }

    fn complete(&mut self) -> ProgressResult<()> {
        (**self).complete()
    }

    fn busy(&mut self) -> ProgressResult<()> {
        (**self).busy()
    }
}

/// Which sink the commands build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SinkStyle {
    /// Terminal progress bar
    #[default]
    Bar,
    /// Structured log events
    Log,
    /// Plain text lines on stderr
    Plain,
    /// No progress output
    None,
}

impl SinkStyle {
    /// Builds the sink for one operation.
    #[must_use]
    pub fn build(self, label: &str, scale_max: u64) -> Box<dyn DisplaySink + Send> {
        match self {
            Self::Bar => Box::new(BarSink::new(label, scale_max)),
            Self::Log => Box::new(LogSink::new(label)),
            Self::Plain => Box::new(WriterSink::new(std::io::stderr(), label, scale_max)),
            Self::None => Box::new(NoopSink),
        }
    }
}

/// Pre-validated progress bar style.
fn bar_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "{spinner:.green} {msg:20} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos:>3}/{len:3}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        })
        .clone()
}

/// Spinner redraw interval while no size is known.
const BUSY_TICK: Duration = Duration::from_millis(120);

/// Terminal progress bar backed by `indicatif`.
///
/// The bar draws to stderr and hides itself when stderr is not a terminal.
pub struct BarSink {
    bar: ProgressBar,
}

impl BarSink {
    #[must_use]
    pub fn new(label: &str, scale_max: u64) -> Self {
        let bar = ProgressBar::new(scale_max);
        bar.set_style(bar_style());
        bar.set_message(label.to_string());
        Self { bar }
    }

}

impl DisplaySink for BarSink {
    fn set(&mut self, value: u64) -> ProgressResult<()> {
        self.bar.set_position(value);
        Ok(())
    }

    fn advance(&mut self, amount: u64) -> ProgressResult<()> {
        self.bar.inc(amount);
        Ok(())
    }

    fn complete(&mut self) -> ProgressResult<()> {
        self.bar.finish();
        Ok(())
    }

    fn busy(&mut self) -> ProgressResult<()> {
        self.bar.enable_steady_tick(BUSY_TICK);
        Ok(())
    }
}

/// Emits progress as `tracing` events.
#[derive(Debug, Clone)]
pub struct LogSink {
    label: String,
    position: u64,
}

impl LogSink {
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            position: 0,
        }
    }
}

impl DisplaySink for LogSink {
    fn set(&mut self, value: u64) -> ProgressResult<()> {
        self.position = value;
        info!(operation = %self.label, position = value, "progress");
        Ok(())
    }

    fn advance(&mut self, amount: u64) -> ProgressResult<()> {
        self.set(self.position.saturating_add(amount))
    }

    fn complete(&mut self) -> ProgressResult<()> {
        info!(operation = %self.label, position = self.position, "complete");
        Ok(())
    }

    fn busy(&mut self) -> ProgressResult<()> {
        info!(operation = %self.label, "started");
        Ok(())
    }
}

/// Writes one `label: position/max` line per update.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
    label: String,
    scale_max: u64,
    position: u64,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, label: &str, scale_max: u64) -> Self {
        Self {
            writer,
            label: label.to_string(),
            scale_max,
            position: 0,
        }
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DisplaySink for WriterSink<W> {
    fn set(&mut self, value: u64) -> ProgressResult<()> {
        self.position = value;
        writeln!(self.writer, "{}: {}/{}", self.label, value, self.scale_max)
            .map_err(|source| ProgressError::SinkUnavailable { source })
    }

    fn advance(&mut self, amount: u64) -> ProgressResult<()> {
        self.set(self.position.saturating_add(amount))
    }

    fn complete(&mut self) -> ProgressResult<()> {
        writeln!(self.writer, "{}: done", self.label)
            .and_then(|()| self.writer.flush())
            .map_err(|source| ProgressError::SinkUnavailable { source })
    }

    fn busy(&mut self) -> ProgressResult<()> {
        writeln!(self.writer, "{}: working", self.label)
            .and_then(|()| self.writer.flush())
            .map_err(|source| ProgressError::SinkUnavailable { source })
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DisplaySink for NoopSink {
    fn set(&mut self, _value: u64) -> ProgressResult<()> {
        Ok(())
    }

    fn advance(&mut self, _amount: u64) -> ProgressResult<()> {
        Ok(())
    }

    fn complete(&mut self) -> ProgressResult<()> {
        Ok(())
    }
}

/// Records every event, for tests.
#[cfg(test)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RecordingSink {
    pub(crate) events: Vec<SinkEvent>,
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SinkEvent {
    Set(u64),
    Advance(u64),
    Complete,
    Busy,
}

#[cfg(test)]
impl RecordingSink {
    /// Values passed to `set`, in order.
    pub(crate) fn set_values(&self) -> Vec<u64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Set(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn completions(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SinkEvent::Complete))
            .count()
    }
}

#[cfg(test)]
impl DisplaySink for RecordingSink {
    fn set(&mut self, value: u64) -> ProgressResult<()> {
        self.events.push(SinkEvent::Set(value));
        Ok(())
    }

    fn advance(&mut self, amount: u64) -> ProgressResult<()> {
        self.events.push(SinkEvent::Advance(amount));
        Ok(())
    }

    fn complete(&mut self) -> ProgressResult<()> {
        self.events.push(SinkEvent::Complete);
        Ok(())
    }

    fn busy(&mut self) -> ProgressResult<()> {
        self.events.push(SinkEvent::Busy);
        Ok(())
    }
}
