// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that run after deserialization succeeds.

use std::str::FromStr;

use brainbridge_catalog::SortKey;

use crate::diagnostic::{suggest_key, ConfigError};
use crate::model::BrainbridgeConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Reports every problem at once rather than stopping at the first.
pub fn validate_config(config: &BrainbridgeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.app.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "app.name must not be empty".to_string(),
        });
    }

    let level = config.app.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::InvalidValue {
            key: "app.log_level".to_string(),
            value: config.app.log_level.clone(),
            suggestion: suggest_key(&level, LOG_LEVELS),
            allowed: LOG_LEVELS.join(", "),
        });
    }

    // Queries degrade unknown sort keys silently; the config file should not.
    if SortKey::from_str(config.catalog.default_sort.trim()).is_err() {
        let names: Vec<String> = SortKey::ALL.iter().map(|k| k.to_string()).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        errors.push(ConfigError::InvalidValue {
            key: "catalog.default_sort".to_string(),
            value: config.catalog.default_sort.clone(),
            suggestion: suggest_key(&config.catalog.default_sort.to_ascii_lowercase(), &names),
            allowed: names.join(", "),
        });
    }

    if let Some(path) = &config.catalog.seed_file {
        if path.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "catalog.seed_file must not be empty when set".to_string(),
            });
        }
    }

    let conversation = &config.conversation;
    if conversation.reply_timeout_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "conversation.reply_timeout_ms must be greater than 0".to_string(),
        });
    }

    if conversation.reply_delay_ms >= conversation.reply_timeout_ms {
        errors.push(ConfigError::Validation {
            message: format!(
                "conversation.reply_delay_ms ({}) must be less than conversation.reply_timeout_ms ({})",
                conversation.reply_delay_ms, conversation.reply_timeout_ms
            ),
        });
    }

    if conversation.assistant_name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "conversation.assistant_name must not be empty".to_string(),
        });
    }

    if conversation.user_display_name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "conversation.user_display_name must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
