// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Project record fixtures.

use brainbridge_catalog::{LanguageTags, ProjectRecord, Timestamp};
use brainbridge_core::ProjectId;

/// Builds a record with the fields queries look at; the rest get fixed values.
///
/// `created` is any timestamp form the catalog accepts. Panics on a malformed
/// date, which is a bug in the test.
pub fn project(
    id: u64,
    title: &str,
    languages: &[&str],
    views: u64,
    likes: u64,
    created: &str,
) -> ProjectRecord {
    ProjectRecord {
        id: ProjectId(id),
        title: title.to_string(),
        description: format!("{title} description"),
        languages: languages.iter().collect::<LanguageTags>(),
        views,
        likes,
        comments: 0,
        author: "fixture".to_string(),
        created_at: created
            .parse::<Timestamp>()
            .unwrap_or_else(|e| panic!("fixture date {created:?}: {e}")),
        updated_at: None,
    }
}
