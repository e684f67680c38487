// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered config loading with figment.
//!
//! Later layers win: compiled defaults, [`SYSTEM_CONFIG`], the user config
//! directory, [`LOCAL_CONFIG`] in the working directory, then `BRAINBRIDGE_*`
//! environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::BrainbridgeConfig;

pub const SYSTEM_CONFIG: &str = "/etc/brainbridge/brainbridge.toml";
/// Relative to the platform config directory (`$XDG_CONFIG_HOME` on Linux).
pub const USER_CONFIG: &str = "brainbridge/brainbridge.toml";
pub const LOCAL_CONFIG: &str = "brainbridge.toml";

/// Env var prefix. `BRAINBRIDGE_CONVERSATION_REPLY_DELAY_MS` sets
/// `conversation.reply_delay_ms`.
pub const ENV_PREFIX: &str = "BRAINBRIDGE_";

/// Top-level config sections, as they appear in env var names.
const SECTIONS: &[&str] = &["app", "catalog", "conversation"];

pub fn load_config() -> Result<BrainbridgeConfig, figment::Error> {
    build_figment().extract()
}

/// A single TOML document over the defaults. No files, no env vars.
pub fn load_config_from_str(toml_content: &str) -> Result<BrainbridgeConfig, figment::Error> {
    Figment::from(Serialized::defaults(BrainbridgeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// One explicit file over the defaults, with env vars on top.
pub fn load_config_from_path(path: &Path) -> Result<BrainbridgeConfig, figment::Error> {
    Figment::from(Serialized::defaults(BrainbridgeConfig::default()))
        .merge(Toml::file_exact(path))
        .merge(env_provider())
        .extract()
}

/// The full layered figment, before extraction. Missing files are skipped.
pub fn build_figment() -> Figment {
    let mut figment = Figment::from(Serialized::defaults(BrainbridgeConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG));
    if let Some(dir) = dirs::config_dir() {
        figment = figment.merge(Toml::file(dir.join(USER_CONFIG)));
    }
    figment
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Maps `BRAINBRIDGE_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// `Env::split("_")` would break keys that contain underscores, so the
/// section is matched by name and only the first separator becomes a dot.
pub(crate) fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).map(|key| {
        // Keys arrive with their original case.
        let key = key.as_str().to_ascii_lowercase();
        SECTIONS
            .iter()
            .find_map(|section| {
                key.strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or(key)
            .into()
    })
}
