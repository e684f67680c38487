// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply source trait: whatever produces the counterpart's side of a conversation.

use async_trait::async_trait;

use crate::error::BrainbridgeError;
use crate::types::Message;

/// Produces reply content for a conversation.
///
/// Implementations range from fixed canned text to a language-generation
/// backend or a message-broker subscription. The conversation engine treats
/// them identically: it hands over the log as it stands when the reply is
/// due and appends whatever text comes back.
#[async_trait]
pub trait ReplySource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Produces the counterpart's reply given the conversation so far.
    async fn reply(&self, history: &[Message]) -> Result<String, BrainbridgeError>;
}
