// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for BrainBridge.
//!
//! Provides the error type, identifier newtypes, the conversation message
//! model, and the [`ReplySource`] capability shared by the catalog and
//! conversation crates.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::BrainbridgeError;
pub use traits::ReplySource;
pub use types::{Message, ProjectId, Role, SequenceId};
