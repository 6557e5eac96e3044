// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   probe, fetch, branches, select, form, config
//!
//! GlobalOptions --> config_loader() --> Config
//!   devkit.toml? --> --config... --> DEVKIT_* --> --set / flags
//! ```

pub mod branches;
pub mod config;
pub mod fetch;
pub mod form;
pub mod probe;
pub mod select;

#[cfg(test)]
mod tests;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::cli::global::GlobalOptions;
use crate::config::loader::ConfigLoader;
use crate::config::{Config, ENV_PREFIX, LOCAL_CONFIG_FILE};
use crate::error::Result;
use crate::progress::{DisplaySink, Projector};

/// Projector over the sink selected by `progress.style`.
pub type DisplayProjector = Projector<Box<dyn DisplaySink + Send>>;

/// Builds the loader for every configuration source named by `global`.
///
/// # Errors
///
/// Returns an error if an override key is rejected by the loader.
pub fn config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_config {
        loader = loader.add_toml_file_optional(LOCAL_CONFIG_FILE);
    }
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for (key, value) in global.to_config_overrides() {
        loader = loader.set(&key, value)?;
    }
    Ok(loader)
}

/// Loads and validates the effective configuration.
///
/// # Errors
///
/// Returns an error if a source is missing or invalid.
pub fn load_config(global: &GlobalOptions) -> Result<Config> {
    config_loader(global)?.build()
}

/// Projector for one operation, using the configured style and scale.
///
/// # Errors
///
/// Returns an error if `progress.scale_max` is 0.
pub fn projector(config: &Config, label: &str) -> Result<DisplayProjector> {
    let scale_max = config.scale_max()?;
    Ok(Projector::new(
        scale_max,
        config.progress.style.build(label, scale_max.get()),
    ))
}

/// Token cancelled on the first Ctrl+C.
#[must_use]
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let cancel_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl+C, interrupting git...");
            cancel_token.cancel();
        }
    });
    token
}
