// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation engine for BrainBridge.
//!
//! A [`ConversationSession`] keeps one chat's ordered message log and runs
//! the request/response cycle for counterpart replies. The same engine backs
//! the community chat and the coding-assistant chat; only the
//! [`ReplySource`](brainbridge_core::ReplySource) differs.

pub mod error;
pub mod reply;
pub mod seed;
pub mod session;

pub use error::ConversationError;
pub use reply::{CannedReply, TemplateReply};
pub use seed::{assistant_greeting, community_history};
pub use session::{
    ConversationSession, PendingReply, SeedMessage, SessionSettings, SessionState,
    DEFAULT_REPLY_DELAY, DEFAULT_REPLY_TIMEOUT,
};
