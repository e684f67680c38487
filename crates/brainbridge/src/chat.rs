// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `brainbridge chat` command implementation.
//!
//! Launches an interactive REPL over a [`ConversationSession`]. Each line
//! typed is appended immediately, then the prompt waits for the counterpart
//! reply before reading the next line.

use std::sync::Arc;

use brainbridge_config::ConversationConfig;
use brainbridge_conversation::{
    assistant_greeting, community_history, CannedReply, ConversationError, ConversationSession,
    SessionSettings, TemplateReply,
};
use brainbridge_core::{BrainbridgeError, Message, ReplySource};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, info};

/// Which chat view to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMode {
    /// One-to-one chat with the coding assistant.
    Assistant,
    /// The community channel.
    Peer,
}

/// Opens a pre-seeded session and the reply source that answers in it.
pub fn open_session(
    config: &ConversationConfig,
    mode: ChatMode,
) -> (ConversationSession, Arc<dyn ReplySource>) {
    let settings = SessionSettings::default()
        .with_reply_delay(config.reply_delay())
        .with_reply_timeout(config.reply_timeout());

    match mode {
        ChatMode::Assistant => (
            ConversationSession::with_history(
                settings.with_counterpart_name(config.assistant_name.clone()),
                assistant_greeting(),
            ),
            Arc::new(TemplateReply::assistant()),
        ),
        ChatMode::Peer => (
            ConversationSession::with_history(
                settings.with_local_name(config.user_display_name.clone()),
                community_history(),
            ),
            Arc::new(CannedReply::peer_ack()),
        ),
    }
}

/// Formats one log entry as a single line.
pub fn render_message(msg: &Message, mode: ChatMode, config: &ConversationConfig) -> String {
    let time = msg.timestamp.format("%H:%M").to_string();
    let who = match (&msg.sender, msg.is_local(), mode) {
        (Some(name), _, _) => name.clone(),
        (None, true, _) => config.user_display_name.clone(),
        (None, false, ChatMode::Assistant) => config.assistant_name.clone(),
        (None, false, ChatMode::Peer) => "peer".to_string(),
    };
    let who = if msg.is_local() {
        who.green().bold()
    } else {
        who.blue().bold()
    };
    format!("{} {who}: {}", time.dimmed(), msg.content)
}

/// Runs the `brainbridge chat` interactive REPL.
pub async fn run_chat(config: &ConversationConfig, mode: ChatMode) -> Result<(), BrainbridgeError> {
    let (session, source) = open_session(config, mode);
    info!(
        session_id = session.session_id(),
        mode = ?mode,
        source = source.name(),
        "chat session opened"
    );

    let mut rl = DefaultEditor::new()
        .map_err(|e| BrainbridgeError::Internal(format!("failed to initialize readline: {e}")))?;

    let title = match mode {
        ChatMode::Assistant => config.assistant_name.as_str(),
        ChatMode::Peer => "Community Chat",
    };
    println!("{}", title.bold().green());
    println!("Type {} to exit.\n", "/quit".yellow());
    for msg in session.messages() {
        println!("{}", render_message(&msg, mode, config));
    }

    let prompt = format!("{}> ", config.user_display_name.green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match session.send(trimmed, Arc::clone(&source)) {
                    Ok((_, pending)) => {
                        println!("{}", "typing...".dimmed());
                        match pending.wait().await {
                            Ok(reply) => println!("{}", render_message(&reply, mode, config)),
                            Err(e) => eprintln!("{}: {e}", "error".red()),
                        }
                    }
                    Err(ConversationError::Terminated { .. }) => break,
                    Err(e) => eprintln!("{}: {e}", "error".red()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    session.close();
    debug!(
        session_id = session.session_id(),
        messages = session.len(),
        "chat session closed"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use brainbridge_conversation::SessionState;
    use brainbridge_core::{Role, SequenceId};

    use super::*;

    fn config() -> ConversationConfig {
        ConversationConfig {
            reply_delay_ms: 200,
            ..ConversationConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn assistant_session_answers_with_template() {
        let config = config();
        let (session, source) = open_session(&config, ChatMode::Assistant);
        assert_eq!(session.len(), 3);
        assert_eq!(session.settings().reply_delay.as_millis(), 200);

        let (_, pending) = session.send("lifetimes", source).expect("idle session");
        let reply = pending.wait().await.expect("template reply");
        assert_eq!(reply.id, SequenceId(5));
        assert_eq!(reply.role, Role::Counterpart);
        assert!(reply.content.contains("\"lifetimes\""));
        assert_eq!(reply.sender.as_deref(), Some("AI Coding Assistant"));
    }

    #[tokio::test(start_paused = true)]
    async fn peer_session_stamps_display_name() {
        let config = config();
        let (session, source) = open_session(&config, ChatMode::Peer);
        let (local, pending) = session.send("hi all", source).expect("idle session");
        assert_eq!(local.sender.as_deref(), Some("You"));
        pending.wait().await.expect("canned reply");
        assert_eq!(session.len(), 6);

        session.close();
        assert_eq!(session.state(), SessionState::Terminated);
    }

    #[test]
    fn rendered_line_names_the_speaker() {
        colored::control::set_override(false);
        let config = config();
        let (session, _) = open_session(&config, ChatMode::Assistant);
        let first = session.messages().remove(0);
        let line = render_message(&first, ChatMode::Assistant, &config);
        assert!(line.starts_with("10:00 AI Coding Assistant: Hello!"));

        let (session, _) = open_session(&config, ChatMode::Peer);
        let line = render_message(&session.messages()[2], ChatMode::Peer, &config);
        assert_eq!(line, "10:33 Jane Smith: Count me in too!");
    }
}
