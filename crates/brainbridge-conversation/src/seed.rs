// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pre-seeded histories for the two chat views.

use brainbridge_core::Role;
use chrono::{DateTime, TimeZone, Utc};

use crate::session::SeedMessage;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 13, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn seed(role: Role, sender: Option<&str>, content: &str, timestamp: DateTime<Utc>) -> SeedMessage {
    SeedMessage {
        role,
        content: content.to_string(),
        sender: sender.map(str::to_string),
        timestamp,
    }
}

/// Opening exchange of the coding-assistant chat.
pub fn assistant_greeting() -> Vec<SeedMessage> {
    vec![
        seed(
            Role::Counterpart,
            None,
            "Hello! I'm your AI coding assistant. How can I help you with your project today?",
            at(10, 0),
        ),
        seed(
            Role::Local,
            None,
            "Can you help me optimize my React component?",
            at(10, 1),
        ),
        seed(
            Role::Counterpart,
            None,
            "Of course! I'd be happy to help you optimize your React component. \
             Could you share the component code or describe what specific \
             optimizations you're looking for?",
            at(10, 1),
        ),
    ]
}

/// Recent messages of the community chat room.
pub fn community_history() -> Vec<SeedMessage> {
    vec![
        seed(
            Role::Counterpart,
            Some("John Doe"),
            "Hey everyone! Working on a new React project. Anyone want to collaborate?",
            at(10, 30),
        ),
        seed(
            Role::Local,
            Some("You"),
            "I'd love to help! What kind of project is it?",
            at(10, 32),
        ),
        seed(Role::Counterpart, Some("Jane Smith"), "Count me in too!", at(10, 33)),
        seed(
            Role::Counterpart,
            Some("John Doe"),
            "It's an e-commerce platform. I'll share the details soon!",
            at(10, 35),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_greeting_alternates_roles() {
        let seed = assistant_greeting();
        let roles: Vec<Role> = seed.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Counterpart, Role::Local, Role::Counterpart]);
    }

    #[test]
    fn community_history_is_chronological() {
        let seed = community_history();
        assert_eq!(seed.len(), 4);
        assert!(seed.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert!(seed.iter().all(|m| m.sender.is_some()));
        assert_ne!(seed[0].timestamp, DateTime::<Utc>::default());
    }
}
