// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock reply source for deterministic conversation tests.
//!
//! `MockReplySource` implements `ReplySource` with a scripted queue of
//! replies and failures, and records every history it was asked to answer.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use brainbridge_core::{BrainbridgeError, Message, ReplySource};

/// One scripted outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    Text(String),
    Fail(String),
}

/// A reply source that returns pre-configured outcomes.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty,
/// a default "mock reply" text is returned.
pub struct MockReplySource {
    script: Arc<Mutex<VecDeque<MockReply>>>,
    histories: Arc<Mutex<Vec<Vec<Message>>>>,
    calls: AtomicUsize,
    latency: Duration,
}

impl MockReplySource {
    /// Create a new mock source with an empty script.
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            histories: Arc::new(Mutex::new(Vec::new())),
            calls: AtomicUsize::new(0),
            latency: Duration::ZERO,
        }
    }

    /// Create a mock source pre-loaded with the given reply texts.
    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            script: Arc::new(Mutex::new(
                replies.into_iter().map(MockReply::Text).collect(),
            )),
            ..Self::new()
        }
    }

    /// Make every call take `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub async fn push_reply(&self, text: impl Into<String>) {
        self.script.lock().await.push_back(MockReply::Text(text.into()));
    }

    pub async fn push_failure(&self, message: impl Into<String>) {
        self.script
            .lock()
            .await
            .push_back(MockReply::Fail(message.into()));
    }

    /// Number of times `reply` has been invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The history passed to each invocation, in call order.
    pub async fn histories(&self) -> Vec<Vec<Message>> {
        self.histories.lock().await.clone()
    }

    async fn next_reply(&self) -> MockReply {
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockReply::Text("mock reply".to_string()))
    }
}

impl Default for MockReplySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReplySource for MockReplySource {
    fn name(&self) -> &str {
        "mock-reply"
    }

    async fn reply(&self, history: &[Message]) -> Result<String, BrainbridgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.histories.lock().await.push(history.to_vec());

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match self.next_reply().await {
            MockReply::Text(text) => Ok(text),
            MockReply::Fail(message) => Err(BrainbridgeError::reply_source(message)),
        }
    }
}
