// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the `brainbridge` binary.
//!
//! [`load_and_validate`] merges compiled defaults, the system, user and
//! working-directory `brainbridge.toml` files and `BRAINBRIDGE_*` variables,
//! then checks the result. Every failure comes back as a [`ConfigError`]
//! diagnostic, ready for [`render_errors`].
//!
//! ```no_run
//! match brainbridge_config::load_and_validate() {
//!     Ok(config) => println!("reply delay: {:?}", config.conversation.reply_delay()),
//!     Err(errors) => brainbridge_config::render_errors(&errors),
//! }
//! ```

#![allow(clippy::result_large_err)]

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::{Path, PathBuf};

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{AppConfig, BrainbridgeConfig, CatalogConfig, ConversationConfig};

/// Loads from the standard locations and validates.
pub fn load_and_validate() -> Result<BrainbridgeConfig, Vec<ConfigError>> {
    checked(loader::load_config(), || {
        standard_paths()
            .into_iter()
            .filter_map(|path| read_source(&path))
            .collect()
    })
}

/// Validates a TOML document on its own, without files or env vars.
pub fn load_and_validate_str(toml_content: &str) -> Result<BrainbridgeConfig, Vec<ConfigError>> {
    checked(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Loads one explicit file plus env vars, and validates.
pub fn load_and_validate_path(path: &Path) -> Result<BrainbridgeConfig, Vec<ConfigError>> {
    // figment skips missing files; an explicitly named one must exist.
    if !path.is_file() {
        return Err(vec![ConfigError::Other(format!(
            "config file `{}` not found",
            path.display()
        ))]);
    }
    checked(loader::load_config_from_path(path), || {
        read_source(path).into_iter().collect()
    })
}

/// Runs validation on a loaded config, or turns the figment error into
/// diagnostics. `sources` is only read on the error path.
fn checked(
    loaded: Result<BrainbridgeConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<BrainbridgeConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            tracing::debug!(
                app = %config.app.name,
                log_level = %config.app.log_level,
                default_sort = %config.catalog.default_sort,
                "configuration loaded"
            );
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Files merged by [`load_and_validate`], lowest precedence first.
fn standard_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(loader::SYSTEM_CONFIG)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(loader::USER_CONFIG));
    }
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(loader::LOCAL_CONFIG));
    }
    paths
}

fn read_source(path: &Path) -> Option<(String, String)> {
    let content = std::fs::read_to_string(path).ok()?;
    Some((path.display().to_string(), content))
}
