// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits consumed by the engines.

pub mod reply;

pub use reply::ReplySource;
