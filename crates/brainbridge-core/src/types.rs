// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used by the catalog and conversation engines.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique, immutable identifier of a project record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub u64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-conversation message sequence number.
///
/// Assigned at append time, strictly increasing, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceId(pub u64);

impl SequenceId {
    /// The id that follows this one.
    pub fn next(self) -> Self {
        SequenceId(self.0 + 1)
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Who authored a message, from the session owner's point of view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Role {
    /// Typed locally by the session owner.
    #[strum(serialize = "self")]
    #[serde(rename = "self")]
    Local,
    /// Produced by the other side (a peer or the assistant).
    #[strum(serialize = "counterpart")]
    #[serde(rename = "counterpart")]
    Counterpart,
}

/// A single entry in a conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: SequenceId,
    pub role: Role,
    pub content: String,
    /// Display name of the author, when the conversation has more than two parties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Returns true if the session owner wrote this message.
    pub fn is_local(&self) -> bool {
        self.role == Role::Local
    }
}
