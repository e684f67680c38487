// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stand-in reply sources used until real backends are wired up.

use async_trait::async_trait;
use brainbridge_core::{BrainbridgeError, Message, ReplySource};

/// Placeholder replaced by the latest local message in a [`TemplateReply`].
pub const MESSAGE_PLACEHOLDER: &str = "{message}";

const ASSISTANT_TEMPLATE: &str = "I understand you're asking about: \"{message}\". \
This is a dummy response. In the future, this will be powered by an AI API \
that provides real coding assistance.";

/// Echoes the most recent local message through a text template.
#[derive(Debug, Clone)]
pub struct TemplateReply {
    template: String,
}

impl TemplateReply {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The coding assistant's placeholder answer.
    pub fn assistant() -> Self {
        Self::new(ASSISTANT_TEMPLATE)
    }
}

#[async_trait]
impl ReplySource for TemplateReply {
    fn name(&self) -> &str {
        "template"
    }

    async fn reply(&self, history: &[Message]) -> Result<String, BrainbridgeError> {
        let last = history
            .iter()
            .rev()
            .find(|m| m.is_local())
            .ok_or_else(|| BrainbridgeError::reply_source("no local message to reply to"))?;
        Ok(self.template.replace(MESSAGE_PLACEHOLDER, &last.content))
    }
}

/// Always answers with the same text.
#[derive(Debug, Clone)]
pub struct CannedReply {
    text: String,
}

impl CannedReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Acknowledgement used by the community chat until the broker exists.
    pub fn peer_ack() -> Self {
        Self::new("Message received! Live chat delivery is coming soon.")
    }
}

#[async_trait]
impl ReplySource for CannedReply {
    fn name(&self) -> &str {
        "canned"
    }

    async fn reply(&self, _history: &[Message]) -> Result<String, BrainbridgeError> {
        Ok(self.text.clone())
    }
}
