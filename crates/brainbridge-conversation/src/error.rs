// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recoverable conversation errors. None of them leave the session unusable
//! except [`ConversationError::Terminated`], which reports that it already is.

use brainbridge_core::BrainbridgeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversationError {
    /// A reply was requested while another one is still in flight.
    #[error("a reply is already pending in session {session_id}")]
    Conflict { session_id: String },

    /// The reply source failed or timed out. No message was recorded.
    #[error("reply failed: {0}")]
    ReplyFailure(#[source] BrainbridgeError),

    /// The session was closed; it accepts no further messages or requests.
    #[error("session {session_id} is closed")]
    Terminated { session_id: String },

    /// The session closed while the reply was pending, so it was discarded.
    #[error("reply cancelled: session closed before it arrived")]
    Cancelled,

    /// The reply task ended abnormally.
    #[error("reply task failed: {0}")]
    Internal(String),
}
