// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for BrainBridge integration tests.
//!
//! # Components
//!
//! - [`MockReplySource`] - Scriptable reply source with call recording
//! - [`project`] - Compact project record builder for catalog tests

pub mod fixtures;
pub mod mock_reply;

pub use fixtures::project;
pub use mock_reply::{MockReply, MockReplySource};
