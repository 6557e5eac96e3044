// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parser for `git --progress` stderr lines.
//!
//! ```text
//! "remote: Enumerating objects: 1234, done."           Enumerating  remote  1234/?
//! "remote: Counting objects: 100% (5/5), done."        Counting     remote  5/5
//! "Receiving objects:  45% (450/1000), 1.2 MiB | ..."  Receiving    local   450/1000
//! "Resolving deltas: 100% (2/2), done."                Resolving    local   2/2
//! "Cloning into 'repo'..."                             not a progress line
//! ```

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use crate::progress::ProgressSample;

/// Phase of a clone or fetch as reported by git.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GitPhase {
    Enumerating,
    Counting,
    Compressing,
    Receiving,
    Resolving,
    Updating,
    Other,
}

impl GitPhase {
    fn from_label(label: &str) -> Self {
        match label.split_whitespace().next().unwrap_or_default() {
            "Enumerating" => Self::Enumerating,
            "Counting" => Self::Counting,
            "Compressing" => Self::Compressing,
            "Receiving" => Self::Receiving,
            "Resolving" => Self::Resolving,
            "Updating" => Self::Updating,
            _ => Self::Other,
        }
    }
}

/// One parsed progress line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GitProgress {
    pub phase: GitPhase,
    /// Reported by the server (`remote:` prefix).
    pub remote: bool,
    pub current: u64,
    /// Absent for phases that only count (`Enumerating objects: 1234`).
    pub total: Option<u64>,
}

fn progress_regex() -> Option<&'static Regex> {
    static REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    REGEX
        .get_or_init(|| {
            Regex::new(
                r"^(?P<remote>remote:\s*)?(?P<phase>[A-Za-z][A-Za-z ]*?):\s+(?:\d+%\s+\((?P<cur>\d+)/(?P<total>\d+)\)|(?P<count>\d+))",
            )
            .ok()
        })
        .as_ref()
}

impl GitProgress {
    /// Parses one stderr segment; `None` for anything that is not a counter.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let caps = progress_regex()?.captures(line.trim())?;
        let phase = GitPhase::from_label(caps.name("phase")?.as_str());
        let remote = caps.name("remote").is_some();

        if let Some(count) = caps.name("count") {
            return Some(Self {
                phase,
                remote,
                current: count.as_str().parse().ok()?,
                total: None,
            });
        }

        Some(Self {
            phase,
            remote,
            current: caps.name("cur")?.as_str().parse().ok()?,
            total: Some(caps.name("total")?.as_str().parse().ok()?),
        })
    }

    /// Whether this line reports the object download.
    #[must_use]
    pub const fn is_download(&self) -> bool {
        matches!(self.phase, GitPhase::Receiving) && !self.remote
    }

    #[must_use]
    pub const fn sample(&self) -> ProgressSample {
        ProgressSample::new(self.current, self.total)
    }
}
