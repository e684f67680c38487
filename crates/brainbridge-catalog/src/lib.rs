// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Project catalog engine for BrainBridge.
//!
//! Combines free-text search, language filtering, and multi-criterion sorting
//! over an in-memory collection of [`ProjectRecord`]s. The engine holds no
//! state: callers own the records and pass them in with each [`CatalogQuery`].

pub mod loader;
pub mod model;
pub mod query;
pub mod seed;

pub use loader::{load_projects_file, load_projects_json, CatalogError};
pub use model::{LanguageTags, ProjectRecord, Timestamp};
pub use query::{
    available_languages, find_by_id, query, CatalogQuery, CatalogView, LanguageFilter, SortKey,
    ALL_LANGUAGES,
};
pub use seed::seed_projects;
