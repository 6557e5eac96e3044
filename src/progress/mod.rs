// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bounded progress projection.
//!
//! ```text
//! external op  --(current, total?)-->  Projector  --set(v)/complete()-->  DisplaySink
//!                                       |
//!                         v = min(max, current * max / total)
//!                         emit only if v > last emitted
//!                         total None or 0 --> no-op
//!                         busy() --> sink.busy() until a value is emitted
//!                         finish() --> v = max, complete() once
//! ```
//!
//! One projector per external operation. Its emitted values never go
//! backwards, so operations that restart a counter per phase (git clone
//! reports objects, then deltas) cannot make the display regress.

pub mod sink;

#[cfg(test)]
mod tests;

use serde::Serialize;
use std::num::NonZeroU64;

use crate::error::ProgressError;

pub use sink::{BarSink, DisplaySink, LogSink, NoopSink, WriterSink};

/// Result type for display sink operations.
pub type ProgressResult<T> = std::result::Result<T, ProgressError>;

/// Default output scale (percent).
pub const PERCENT: NonZeroU64 = NonZeroU64::new(100).expect("100 is non-zero");

/// One progress report from an external operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressSample {
    pub current: u64,
    pub total: Option<u64>,
}

impl ProgressSample {
    #[must_use]
    pub const fn new(current: u64, total: Option<u64>) -> Self {
        Self { current, total }
    }

    /// Projects the sample onto `0..=scale_max`, or `None` when the size is unknown.
    #[must_use]
    pub fn project(&self, scale_max: NonZeroU64) -> Option<u64> {
        let total = self.total.filter(|&t| t > 0)?;
        let scaled = u128::from(self.current) * u128::from(scale_max.get()) / u128::from(total);
        Some(u64::try_from(scaled).unwrap_or(u64::MAX).min(scale_max.get()))
    }
}

/// A value handed to the display sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectedAdvancement {
    pub scale_max: u64,
    pub value: u64,
}

/// Maps raw progress samples onto a bounded scale and drives a sink.
#[derive(Debug)]
pub struct Projector<S> {
    scale_max: NonZeroU64,
    emitted: u64,
    finished: bool,
    sink: S,
}

impl<S: DisplaySink> Projector<S> {
    /// Creates a projector with the given scale.
    pub const fn new(scale_max: NonZeroU64, sink: S) -> Self {
        Self {
            scale_max,
            emitted: 0,
            finished: false,
            sink,
        }
    }

    /// Creates a projector on the 0..=100 scale.
    pub const fn percent(sink: S) -> Self {
        Self::new(PERCENT, sink)
    }

    /// Feeds one sample.
    ///
    /// Returns the newly emitted advancement, or `None` when nothing changed:
    /// unknown or zero total, a value not above the running maximum, or a
    /// finished projector.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error when it cannot display the new value.
    pub fn observe(
        &mut self,
        current: u64,
        total: Option<u64>,
    ) -> ProgressResult<Option<ProjectedAdvancement>> {
        self.observe_sample(ProgressSample::new(current, total))
    }

    /// Same as [`Projector::observe`] for an already built sample.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error.
    pub fn observe_sample(
        &mut self,
        sample: ProgressSample,
    ) -> ProgressResult<Option<ProjectedAdvancement>> {
        if self.finished {
            return Ok(None);
        }
        let Some(value) = sample.project(self.scale_max) else {
            return Ok(None);
        };
        if value <= self.emitted {
            return Ok(None);
        }
        self.sink.set(value)?;
        self.emitted = value;
        Ok(Some(self.advancement()))
    }

    /// Marks the operation as running before any size is known.
    ///
    /// Ignored once a value has been emitted or the projector is finished.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error.
    pub fn busy(&mut self) -> ProgressResult<()> {
        if self.finished || self.emitted > 0 {
            return Ok(());
        }
        self.sink.busy()
    }

    /// Pins the value to `scale_max` and completes the sink.
    ///
    /// Only the first call has an effect.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error.
    pub fn finish(&mut self) -> ProgressResult<ProjectedAdvancement> {
        if !self.finished {
            if self.emitted < self.scale_max.get() {
                self.sink.set(self.scale_max.get())?;
                self.emitted = self.scale_max.get();
            }
            self.sink.complete()?;
            self.finished = true;
        }
        Ok(self.advancement())
    }

    /// Last emitted value.
    #[must_use]
    pub const fn emitted(&self) -> u64 {
        self.emitted
    }

    #[must_use]
    pub const fn scale_max(&self) -> u64 {
        self.scale_max.get()
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub const fn advancement(&self) -> ProjectedAdvancement {
        ProjectedAdvancement {
            scale_max: self.scale_max.get(),
            value: self.emitted,
        }
    }

    /// Borrows the sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the projector and returns the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
