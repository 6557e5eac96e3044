// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |       probe / fetch / branches / select / form
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, env, overrides    |
//!              '--+--------+--------+------'
//!                 |        |        |
//!                 v        v        v
//!              probe      git     prompt
//!            install/   clone,   select,
//!              auth    ls-remote  form
//!                 \        |        /
//!                  v       v       v
//!              progress  Projector --> DisplaySink
//!
//!   +-----------------------------------------+
//!   |  core   process (spawn, stream, kill)   |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
pub mod probe;
pub mod progress;
pub mod prompt;
