// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for BrainBridge.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level BrainBridge configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BrainbridgeConfig {
    /// Application identity and logging.
    #[serde(default)]
    pub app: AppConfig,

    /// Project browsing defaults.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Chat timing and display names.
    #[serde(default)]
    pub conversation: ConversationConfig,
}

/// Application identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name of the application.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "brainbridge".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Project catalog configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Sort applied when the user has not picked one (recent, popular, trending, none).
    #[serde(default = "default_sort")]
    pub default_sort: String,

    /// JSON file with project records. `None` uses the built-in seed catalog.
    #[serde(default)]
    pub seed_file: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
            seed_file: None,
        }
    }
}

fn default_sort() -> String {
    "recent".to_string()
}

/// Conversation engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConversationConfig {
    /// Simulated latency before a counterpart reply is produced, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,

    /// Maximum time a reply source may take, in milliseconds.
    #[serde(default = "default_reply_timeout_ms")]
    pub reply_timeout_ms: u64,

    /// Name shown on replies in the assistant chat.
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,

    /// Name shown on the user's own messages in the community chat.
    #[serde(default = "default_user_display_name")]
    pub user_display_name: String,
}

impl ConversationConfig {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn reply_timeout(&self) -> Duration {
        Duration::from_millis(self.reply_timeout_ms)
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
            reply_timeout_ms: default_reply_timeout_ms(),
            assistant_name: default_assistant_name(),
            user_display_name: default_user_display_name(),
        }
    }
}

fn default_reply_delay_ms() -> u64 {
    1500
}

fn default_reply_timeout_ms() -> u64 {
    30_000
}

fn default_assistant_name() -> String {
    "AI Coding Assistant".to_string()
}

fn default_user_display_name() -> String {
    "You".to_string()
}
