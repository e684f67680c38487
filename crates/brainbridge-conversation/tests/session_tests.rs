// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the conversation session: ordering, the
//! one-pending-reply rule, cancellation, and failure recovery.
//!
//! All tests run on paused Tokio time, so delays cost nothing and are exact.

use std::sync::Arc;
use std::time::Duration;

use brainbridge_conversation::{
    assistant_greeting, community_history, CannedReply, ConversationError, ConversationSession,
    SessionSettings, SessionState, TemplateReply,
};
use brainbridge_core::{BrainbridgeError, Role, SequenceId};
use brainbridge_test_utils::MockReplySource;

fn contents(session: &ConversationSession) -> Vec<String> {
    session.messages().into_iter().map(|m| m.content).collect()
}

#[tokio::test(start_paused = true)]
async fn reply_is_not_delivered_before_the_delay() {
    let source = Arc::new(MockReplySource::with_replies(vec!["reply".into()]));
    let session = ConversationSession::new(SessionSettings::default());
    session.append_local("A").expect("open session");
    let pending = session.request_reply(source.clone()).expect("idle session");

    tokio::time::sleep(Duration::from_millis(1499)).await;
    assert!(session.is_pending());
    assert_eq!(source.call_count(), 0);
    assert_eq!(session.len(), 1);

    let reply = pending.wait().await.expect("scripted reply");
    assert_eq!(reply.content, "reply");
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test(start_paused = true)]
async fn local_appends_during_wait_precede_the_reply() {
    let source = Arc::new(MockReplySource::with_replies(vec!["reply".into()]));
    let session = ConversationSession::new(SessionSettings::default());

    session.append_local("A").expect("open session");
    let pending = session.request_reply(source.clone()).expect("idle session");
    tokio::time::sleep(Duration::from_millis(500)).await;
    session.append_local("B").expect("appends allowed while awaiting");

    let reply = pending.wait().await.expect("scripted reply");
    assert_eq!(contents(&session), vec!["A", "B", "reply"]);
    assert_eq!(reply.id, SequenceId(3));

    // The source saw the log as it stood when the delay elapsed.
    let histories = source.histories().await;
    assert_eq!(histories.len(), 1);
    assert_eq!(histories[0].len(), 2);
}

#[tokio::test(start_paused = true)]
async fn local_append_after_reply_follows_it() {
    let source = Arc::new(MockReplySource::with_replies(vec!["reply".into()]));
    let session = ConversationSession::new(SessionSettings::default());
    session.append_local("A").expect("open session");
    session
        .request_reply(source)
        .expect("idle session")
        .wait()
        .await
        .expect("scripted reply");
    session.append_local("C").expect("open session");
    assert_eq!(contents(&session), vec!["A", "reply", "C"]);
}

#[tokio::test(start_paused = true)]
async fn second_request_while_pending_conflicts() {
    let source = Arc::new(MockReplySource::new());
    let session = ConversationSession::new(SessionSettings::default());
    session.append_local("A").expect("open session");

    let first = session.request_reply(source.clone()).expect("idle session");
    let second = session.request_reply(source.clone());
    assert!(matches!(second, Err(ConversationError::Conflict { .. })));

    first.wait().await.expect("default reply");
    tokio::time::sleep(Duration::from_secs(10)).await;

    let replies = session
        .messages()
        .into_iter()
        .filter(|m| m.role == Role::Counterpart)
        .count();
    assert_eq!(replies, 1);
    assert_eq!(source.call_count(), 1);

    // Back to Idle, so a new request is accepted.
    session
        .request_reply(source.clone())
        .expect("idle again")
        .wait()
        .await
        .expect("default reply");
    assert_eq!(source.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn send_keeps_local_message_when_reply_conflicts() {
    let source = Arc::new(MockReplySource::new());
    let session = ConversationSession::new(SessionSettings::default());
    let (_, pending) = session.send("A", source.clone()).expect("idle session");
    let err = session.send("B", source.clone()).unwrap_err();
    assert!(matches!(err, ConversationError::Conflict { .. }));

    pending.wait().await.expect("default reply");
    assert_eq!(contents(&session), vec!["A", "B", "mock reply"]);
}

#[tokio::test(start_paused = true)]
async fn closing_discards_pending_reply() {
    let source = Arc::new(MockReplySource::new());
    let session = ConversationSession::new(SessionSettings::default());
    session.append_local("A").expect("open session");
    let pending = session.request_reply(source.clone()).expect("idle session");

    tokio::time::sleep(Duration::from_millis(100)).await;
    session.close();

    assert!(matches!(pending.wait().await, Err(ConversationError::Cancelled)));
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(contents(&session), vec!["A"]);
    assert_eq!(source.call_count(), 0);
    assert_eq!(session.state(), SessionState::Terminated);
}

#[tokio::test(start_paused = true)]
async fn closing_while_source_is_working_discards_its_answer() {
    let source = Arc::new(MockReplySource::new().with_latency(Duration::from_secs(5)));
    let session = ConversationSession::new(
        SessionSettings::default().with_reply_delay(Duration::from_millis(10)),
    );
    session.append_local("A").expect("open session");
    let pending = session.request_reply(source.clone()).expect("idle session");

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(source.call_count(), 1);
    session.close();

    assert!(matches!(pending.wait().await, Err(ConversationError::Cancelled)));
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(session.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_session_cancels_the_reply_task() {
    let source = Arc::new(MockReplySource::new());
    let session = ConversationSession::new(SessionSettings::default());
    session.append_local("A").expect("open session");
    let pending = session.request_reply(source.clone()).expect("idle session");

    drop(session);

    assert!(matches!(pending.wait().await, Err(ConversationError::Cancelled)));
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(source.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_still_delivers() {
    let source = Arc::new(MockReplySource::with_replies(vec!["late".into()]));
    let session = ConversationSession::new(SessionSettings::default());
    session.append_local("A").expect("open session");
    drop(session.request_reply(source).expect("idle session"));

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(contents(&session), vec!["A", "late"]);
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test(start_paused = true)]
async fn source_failure_records_nothing_and_recovers() {
    let source = Arc::new(MockReplySource::new());
    source.push_failure("model unavailable").await;
    let session = ConversationSession::new(SessionSettings::default());
    session.append_local("A").expect("open session");

    let err = session
        .request_reply(source.clone())
        .expect("idle session")
        .wait()
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ConversationError::ReplyFailure(BrainbridgeError::ReplySource { .. })
    ));
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(contents(&session), vec!["A"]);

    // Retry succeeds with the next scripted outcome.
    let reply = session
        .request_reply(source)
        .expect("idle after failure")
        .wait()
        .await
        .expect("default reply");
    assert_eq!(reply.id, SequenceId(2));
}

#[tokio::test(start_paused = true)]
async fn slow_source_times_out() {
    let source = Arc::new(MockReplySource::new().with_latency(Duration::from_secs(60)));
    let session = ConversationSession::new(
        SessionSettings::default().with_reply_timeout(Duration::from_secs(2)),
    );
    session.append_local("A").expect("open session");

    let err = session
        .request_reply(source)
        .expect("idle session")
        .wait()
        .await
        .unwrap_err();
    match err {
        ConversationError::ReplyFailure(BrainbridgeError::Timeout { duration }) => {
            assert_eq!(duration, Duration::from_secs(2));
        }
        other => panic!("expected timeout, got {other:?}"),
    }
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn assistant_chat_flow() {
    let session = ConversationSession::with_history(
        SessionSettings::default().with_counterpart_name("AI Coding Assistant"),
        assistant_greeting(),
    );
    let (local, pending) = session
        .send("How do I memoize a callback?", Arc::new(TemplateReply::assistant()))
        .expect("idle session");
    assert_eq!(local.id, SequenceId(4));

    let reply = pending.wait().await.expect("template reply");
    assert_eq!(reply.id, SequenceId(5));
    assert!(reply.content.contains("\"How do I memoize a callback?\""));
    assert_eq!(reply.sender.as_deref(), Some("AI Coding Assistant"));
}

#[tokio::test(start_paused = true)]
async fn peer_chat_flow() {
    let session = ConversationSession::with_history(
        SessionSettings::default().with_local_name("You"),
        community_history(),
    );
    let (local, pending) = session
        .send("Sounds great!", Arc::new(CannedReply::new("Welcome aboard!")))
        .expect("idle session");
    assert_eq!(local.sender.as_deref(), Some("You"));

    pending.wait().await.expect("canned reply");
    let last = session.messages().pop().expect("non-empty log");
    assert_eq!(last.content, "Welcome aboard!");
    assert_eq!(session.len(), 6);
}
