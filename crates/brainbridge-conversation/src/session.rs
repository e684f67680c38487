// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-session FSM that owns one conversation's message log.
//!
//! Each session goes through states: Idle -> AwaitingReply -> Idle, and ends
//! in Terminated once closed or dropped.
//!
//! Local messages are appended synchronously. Counterpart replies are produced
//! by a spawned task that waits out a configurable delay, asks a
//! [`ReplySource`] for text, and appends it. At most one reply is in flight;
//! a second request is rejected with [`ConversationError::Conflict`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use brainbridge_core::{BrainbridgeError, Message, ReplySource, Role, SequenceId};
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::ConversationError;

/// Default simulated latency before a reply is produced.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1500);

/// Default upper bound on how long a reply source may take.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(30);

/// States in the session FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No reply in flight.
    Idle,
    /// A reply has been requested and not yet resolved.
    AwaitingReply,
    /// Closed. No further transitions.
    Terminated,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::AwaitingReply => write!(f, "awaiting_reply"),
            SessionState::Terminated => write!(f, "terminated"),
        }
    }
}

/// Timing and display settings for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub reply_delay: Duration,
    pub reply_timeout: Duration,
    /// Sender name stamped on local messages.
    pub local_name: Option<String>,
    /// Sender name stamped on counterpart replies.
    pub counterpart_name: Option<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY,
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
            local_name: None,
            counterpart_name: None,
        }
    }
}

impl SessionSettings {
    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = timeout;
        self
    }

    pub fn with_local_name(mut self, name: impl Into<String>) -> Self {
        self.local_name = Some(name.into());
        self
    }

    pub fn with_counterpart_name(mut self, name: impl Into<String>) -> Self {
        self.counterpart_name = Some(name.into());
        self
    }
}

/// A message to pre-load into a new session's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedMessage {
    pub role: Role,
    pub content: String,
    pub sender: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Log and state shared between the session and its reply task.
#[derive(Debug)]
struct SessionLog {
    messages: Vec<Message>,
    next_id: SequenceId,
    state: SessionState,
}

impl SessionLog {
    fn push(&mut self, role: Role, content: String, sender: Option<String>, timestamp: DateTime<Utc>) -> Message {
        let msg = Message {
            id: self.next_id,
            role,
            content,
            sender,
            timestamp,
        };
        self.next_id = self.next_id.next();
        self.messages.push(msg.clone());
        msg
    }
}

fn lock(log: &Mutex<SessionLog>) -> MutexGuard<'_, SessionLog> {
    // The lock is never held across an await or a panic-prone call.
    log.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to an in-flight reply.
///
/// Dropping the handle does not cancel the reply: it still lands in the log.
/// Only closing or dropping the session does.
#[derive(Debug)]
pub struct PendingReply {
    handle: JoinHandle<Result<Message, ConversationError>>,
}

impl PendingReply {
    /// Waits for the reply to be appended, fail, or be cancelled.
    pub async fn wait(self) -> Result<Message, ConversationError> {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => Err(ConversationError::Cancelled),
            Err(e) => Err(ConversationError::Internal(e.to_string())),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Owns the ordered message log of a single conversation.
///
/// Owned exclusively by the view controller that opened the chat. Closing
/// the session (explicitly or by dropping it) cancels any pending reply, and
/// the reply is then guaranteed never to be appended.
pub struct ConversationSession {
    session_id: String,
    log: Arc<Mutex<SessionLog>>,
    cancel: CancellationToken,
    settings: SessionSettings,
}

impl ConversationSession {
    /// Opens an empty session.
    pub fn new(settings: SessionSettings) -> Self {
        Self::with_history(settings, Vec::new())
    }

    /// Opens a session pre-loaded with `history`. Ids are assigned from 1 in order.
    pub fn with_history(settings: SessionSettings, history: Vec<SeedMessage>) -> Self {
        let mut log = SessionLog {
            messages: Vec::with_capacity(history.len()),
            next_id: SequenceId(1),
            state: SessionState::Idle,
        };
        for seed in history {
            log.push(seed.role, seed.content, seed.sender, seed.timestamp);
        }

        let session_id = uuid::Uuid::new_v4().to_string();
        info!(
            session_id = session_id.as_str(),
            seeded = log.messages.len(),
            "conversation session opened"
        );

        Self {
            session_id,
            log: Arc::new(Mutex::new(log)),
            cancel: CancellationToken::new(),
            settings,
        }
    }

    /// Returns the session ID.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Returns the current session state.
    pub fn state(&self) -> SessionState {
        lock(&self.log).state
    }

    pub fn is_pending(&self) -> bool {
        self.state() == SessionState::AwaitingReply
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Snapshot of the log in sequence order.
    pub fn messages(&self) -> Vec<Message> {
        lock(&self.log).messages.clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.log).messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a message typed by the session owner and returns it for immediate display.
    ///
    /// Allowed while a reply is pending. Content is stored as given; rejecting
    /// blank input is the caller's job.
    pub fn append_local(&self, content: impl Into<String>) -> Result<Message, ConversationError> {
        let mut log = lock(&self.log);
        if log.state == SessionState::Terminated {
            return Err(self.terminated());
        }
        let msg = log.push(
            Role::Local,
            content.into(),
            self.settings.local_name.clone(),
            Utc::now(),
        );
        debug!(
            session_id = self.session_id.as_str(),
            id = %msg.id,
            "local message appended"
        );
        Ok(msg)
    }

    /// Starts producing a counterpart reply.
    ///
    /// Transitions Idle -> AwaitingReply and spawns the reply task on the
    /// current Tokio runtime. After the configured delay the task hands the
    /// log, as it stands then, to `source` and appends the result. The state
    /// returns to Idle whether the source succeeds or fails.
    ///
    /// Outside a Tokio runtime this fails with [`ConversationError::Internal`]
    /// and the session stays Idle.
    pub fn request_reply(&self, source: Arc<dyn ReplySource>) -> Result<PendingReply, ConversationError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| ConversationError::Internal(format!("no Tokio runtime to run the reply: {e}")))?;

        {
            let mut log = lock(&self.log);
            match log.state {
                SessionState::Terminated => return Err(self.terminated()),
                SessionState::AwaitingReply => {
                    debug!(
                        session_id = self.session_id.as_str(),
                        "reply already pending, rejecting request"
                    );
                    return Err(ConversationError::Conflict {
                        session_id: self.session_id.clone(),
                    });
                }
                SessionState::Idle => log.state = SessionState::AwaitingReply,
            }
        }

        debug!(
            session_id = self.session_id.as_str(),
            source = source.name(),
            delay_ms = self.settings.reply_delay.as_millis() as u64,
            "reply requested"
        );

        let task = ReplyTask {
            session_id: self.session_id.clone(),
            log: Arc::clone(&self.log),
            cancel: self.cancel.clone(),
            delay: self.settings.reply_delay,
            timeout: self.settings.reply_timeout,
            sender: self.settings.counterpart_name.clone(),
            source,
        };

        Ok(PendingReply {
            handle: runtime.spawn(task.run()),
        })
    }

    /// Appends a local message and requests a reply to it in one step.
    ///
    /// The local message is kept even when the reply request is rejected.
    pub fn send(
        &self,
        content: impl Into<String>,
        source: Arc<dyn ReplySource>,
    ) -> Result<(Message, PendingReply), ConversationError> {
        let msg = self.append_local(content)?;
        let pending = self.request_reply(source)?;
        Ok((msg, pending))
    }

    /// Closes the session. Any pending reply is discarded and its task stops.
    ///
    /// Idempotent. The log stays readable.
    pub fn close(&self) {
        let was_pending = {
            let mut log = lock(&self.log);
            if log.state == SessionState::Terminated {
                return;
            }
            let was_pending = log.state == SessionState::AwaitingReply;
            log.state = SessionState::Terminated;
            was_pending
        };
        self.cancel.cancel();
        info!(
            session_id = self.session_id.as_str(),
            cancelled_reply = was_pending,
            "conversation session closed"
        );
    }

    fn terminated(&self) -> ConversationError {
        ConversationError::Terminated {
            session_id: self.session_id.clone(),
        }
    }
}

impl Drop for ConversationSession {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for ConversationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationSession")
            .field("session_id", &self.session_id)
            .field("state", &self.state())
            .field("messages", &self.len())
            .finish()
    }
}

/// Everything the spawned reply task needs, moved out of the session.
struct ReplyTask {
    session_id: String,
    log: Arc<Mutex<SessionLog>>,
    cancel: CancellationToken,
    delay: Duration,
    timeout: Duration,
    sender: Option<String>,
    source: Arc<dyn ReplySource>,
}

impl ReplyTask {
    async fn run(self) -> Result<Message, ConversationError> {
        tokio::select! {
            _ = self.cancel.cancelled() => return Err(self.discarded()),
            _ = tokio::time::sleep(self.delay) => {}
        }

        let history = lock(&self.log).messages.clone();

        let outcome = tokio::select! {
            _ = self.cancel.cancelled() => return Err(self.discarded()),
            res = tokio::time::timeout(self.timeout, self.source.reply(&history)) => res,
        };

        // State is re-checked under the lock: a close that wins the lock first
        // has already moved the session to Terminated.
        let mut log = lock(&self.log);
        if log.state != SessionState::AwaitingReply {
            drop(log);
            warn!(
                session_id = self.session_id.as_str(),
                source = self.source.name(),
                "reply completed after close, dropping it"
            );
            return Err(ConversationError::Cancelled);
        }
        log.state = SessionState::Idle;

        match outcome {
            Ok(Ok(content)) => {
                let msg = log.push(Role::Counterpart, content, self.sender.clone(), Utc::now());
                drop(log);
                info!(
                    session_id = self.session_id.as_str(),
                    id = %msg.id,
                    source = self.source.name(),
                    "reply delivered"
                );
                Ok(msg)
            }
            Ok(Err(e)) => {
                drop(log);
                warn!(
                    session_id = self.session_id.as_str(),
                    source = self.source.name(),
                    error = %e,
                    "reply source failed"
                );
                Err(ConversationError::ReplyFailure(e))
            }
            Err(_) => {
                drop(log);
                warn!(
                    session_id = self.session_id.as_str(),
                    source = self.source.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "reply source timed out"
                );
                Err(ConversationError::ReplyFailure(BrainbridgeError::Timeout {
                    duration: self.timeout,
                }))
            }
        }
    }

    fn discarded(&self) -> ConversationError {
        debug!(
            session_id = self.session_id.as_str(),
            "session closed, pending reply discarded"
        );
        ConversationError::Cancelled
    }
}
