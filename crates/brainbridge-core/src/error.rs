// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared across the BrainBridge workspace.

use thiserror::Error;

/// The primary error type used by the reply source trait and data loading.
#[derive(Debug, Error)]
pub enum BrainbridgeError {
    /// Configuration errors (invalid TOML, unknown keys, out-of-range values).
    #[error("configuration error: {0}")]
    Config(String),

    /// A record from an external data source violates the data model.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// A reply source (canned text, template, or a real backend) failed.
    #[error("reply source error: {message}")]
    ReplySource {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BrainbridgeError {
    /// Shorthand for a reply source failure without an underlying cause.
    pub fn reply_source(message: impl Into<String>) -> Self {
        BrainbridgeError::ReplySource {
            message: message.into(),
            source: None,
        }
    }
}
