// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search, language filtering, and sorting over project records.
//!
//! [`query`] is a pure function: it borrows the records, never mutates them,
//! and returns a fresh view. Malformed query fields degrade to defaults
//! instead of failing, since the query is typed live into a search box.

use std::collections::HashSet;
use std::str::FromStr;

use brainbridge_core::ProjectId;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::debug;

use crate::model::ProjectRecord;

/// Sentinel filter value selecting every language.
pub const ALL_LANGUAGES: &str = "all";

/// Which language tag a record must carry to be shown.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LanguageFilter {
    #[default]
    All,
    /// Exact, case-sensitive tag match.
    Only(String),
}

impl LanguageFilter {
    /// Reads a raw filter-tab value. Blank input and `"all"` in any case select everything.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case(ALL_LANGUAGES) {
            LanguageFilter::All
        } else {
            LanguageFilter::Only(raw.to_string())
        }
    }

    pub fn admits(&self, record: &ProjectRecord) -> bool {
        match self {
            LanguageFilter::All => true,
            LanguageFilter::Only(tag) => record.languages.contains(tag),
        }
    }
}

impl From<String> for LanguageFilter {
    fn from(value: String) -> Self {
        LanguageFilter::parse(&value)
    }
}

impl From<LanguageFilter> for String {
    fn from(value: LanguageFilter) -> Self {
        match value {
            LanguageFilter::All => ALL_LANGUAGES.to_string(),
            LanguageFilter::Only(tag) => tag,
        }
    }
}

/// Ordering applied after filtering. Every ordering is stable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    /// Newest `created_at` first.
    Recent,
    /// Most `views` first.
    Popular,
    /// Most `likes` first.
    Trending,
    /// Input order.
    #[default]
    #[strum(serialize = "none")]
    Unsorted,
}

impl SortKey {
    /// Every key a UI may offer, in tab order.
    pub const ALL: [SortKey; 4] = [
        SortKey::Recent,
        SortKey::Popular,
        SortKey::Trending,
        SortKey::Unsorted,
    ];

    /// Reads a raw sort-tab value; anything unrecognised means input order.
    pub fn parse_lenient(raw: &str) -> Self {
        SortKey::from_str(raw.trim()).unwrap_or_default()
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        SortKey::parse_lenient(&value)
    }
}

impl From<SortKey> for String {
    fn from(value: SortKey) -> Self {
        value.to_string()
    }
}

/// The search box, filter tabs, and sort tabs of the browse page.
///
/// Absent fields deserialize to an empty search, all languages, and input order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogQuery {
    pub search_term: String,
    pub language_filter: LanguageFilter,
    pub sort_key: SortKey,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a query from raw UI control values.
    pub fn from_ui(search: &str, filter: &str, sort: &str) -> Self {
        Self {
            search_term: search.to_string(),
            language_filter: LanguageFilter::parse(filter),
            sort_key: SortKey::parse_lenient(sort),
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn language(mut self, tag: &str) -> Self {
        self.language_filter = LanguageFilter::parse(tag);
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }
}

/// Case-insensitive substring match against title, description, or any tag.
///
/// `needle` must already be trimmed and lowercased; empty matches everything.
fn matches_search(record: &ProjectRecord, needle: &str) -> bool {
    needle.is_empty()
        || record.title.to_lowercase().contains(needle)
        || record.description.to_lowercase().contains(needle)
        || record
            .languages
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Applies search, filter, and sort, returning the matching records in display order.
///
/// Ties keep their input order. The input slice is never reordered.
pub fn query<'a>(records: &'a [ProjectRecord], query: &CatalogQuery) -> Vec<&'a ProjectRecord> {
    let needle = query.search_term.trim().to_lowercase();

    let mut view: Vec<&ProjectRecord> = records
        .iter()
        .filter(|r| query.language_filter.admits(r) && matches_search(r, &needle))
        .collect();

    // `sort_by` is stable, so comparing `b` to `a` gives descending order with ties untouched.
    match query.sort_key {
        SortKey::Recent => view.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Popular => view.sort_by(|a, b| b.views.cmp(&a.views)),
        SortKey::Trending => view.sort_by(|a, b| b.likes.cmp(&a.likes)),
        SortKey::Unsorted => {}
    }

    debug!(
        search = needle.as_str(),
        sort = %query.sort_key,
        matched = view.len(),
        total = records.len(),
        "catalog query"
    );

    view
}

/// A query result together with the size of the collection it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView<'a> {
    pub projects: Vec<&'a ProjectRecord>,
    pub total: usize,
}

impl<'a> CatalogView<'a> {
    /// Runs [`query`] and keeps the collection size for the summary line.
    pub fn build(records: &'a [ProjectRecord], q: &CatalogQuery) -> Self {
        Self {
            projects: query(records, q),
            total: records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn ids(&self) -> Vec<ProjectId> {
        self.projects.iter().map(|p| p.id).collect()
    }

    pub fn summary(&self) -> String {
        format!("showing {} of {} projects", self.projects.len(), self.total)
    }
}

/// Distinct language tags across all records, in first-seen order.
pub fn available_languages(records: &[ProjectRecord]) -> Vec<&str> {
    let mut seen = HashSet::new();
    records
        .iter()
        .flat_map(|r| r.languages.iter())
        .filter(|tag| seen.insert(*tag))
        .collect()
}

pub fn find_by_id(records: &[ProjectRecord], id: ProjectId) -> Option<&ProjectRecord> {
    records.iter().find(|r| r.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LanguageTags, Timestamp};

    fn record(id: u64, title: &str, langs: &[&str], views: u64, likes: u64, created: &str) -> ProjectRecord {
        ProjectRecord {
            id: ProjectId(id),
            title: title.to_string(),
            description: String::new(),
            languages: langs.iter().collect::<LanguageTags>(),
            views,
            likes,
            comments: 0,
            author: "tester".to_string(),
            created_at: created.parse::<Timestamp>().expect("valid date"),
            updated_at: None,
        }
    }

    fn ids(view: &[&ProjectRecord]) -> Vec<u64> {
        view.iter().map(|p| p.id.0).collect()
    }

    fn scenario() -> Vec<ProjectRecord> {
        vec![
            record(1, "E-Commerce Platform", &["React"], 1250, 89, "2025-12-10"),
            record(2, "Task Management App", &["Python"], 980, 67, "2025-12-08"),
        ]
    }

    #[test]
    fn recent_and_popular_order_the_scenario() {
        let records = scenario();
        let recent = query(&records, &CatalogQuery::new().sort(SortKey::Recent));
        assert_eq!(ids(&recent), vec![1, 2]);
        let popular = query(&records, &CatalogQuery::new().sort(SortKey::Popular));
        assert_eq!(ids(&popular), vec![1, 2]);
    }

    #[test]
    fn recent_ignores_input_order() {
        let mut records = scenario();
        records.reverse();
        let recent = query(&records, &CatalogQuery::new().sort(SortKey::Recent));
        assert_eq!(ids(&recent), vec![1, 2]);
    }

    #[test]
    fn recent_parses_dates_instead_of_comparing_text() {
        let records = vec![
            record(1, "old", &[], 0, 0, "2025-12-01T23:00:00+00:00"),
            record(2, "new", &[], 0, 0, "2025-12-02T01:00:00+05:00"),
        ];
        // Record 2 is 2025-12-01T20:00Z, three hours before record 1.
        let recent = query(&records, &CatalogQuery::new().sort(SortKey::Recent));
        assert_eq!(ids(&recent), vec![1, 2]);
    }

    #[test]
    fn trending_sorts_by_likes() {
        let records = vec![
            record(1, "a", &[], 10, 5, "2025-01-01"),
            record(2, "b", &[], 5, 50, "2025-01-01"),
        ];
        let trending = query(&records, &CatalogQuery::new().sort(SortKey::Trending));
        assert_eq!(ids(&trending), vec![2, 1]);
    }

    #[test]
    fn equal_views_keep_input_order() {
        let records = vec![
            record(1, "a", &[], 100, 0, "2025-01-01"),
            record(2, "b", &[], 300, 0, "2025-01-01"),
            record(3, "c", &[], 100, 0, "2025-01-01"),
        ];
        let popular = query(&records, &CatalogQuery::new().sort(SortKey::Popular));
        assert_eq!(ids(&popular), vec![2, 1, 3]);
    }

    #[test]
    fn search_is_case_insensitive_and_trimmed() {
        let records = vec![record(1, "AI Chat Assistant", &[], 0, 0, "2025-01-01")];
        assert_eq!(query(&records, &CatalogQuery::new().search("assistant")).len(), 1);
        assert_eq!(query(&records, &CatalogQuery::new().search("  CHAT  ")).len(), 1);
        assert!(query(&records, &CatalogQuery::new().search("zzz")).is_empty());
    }

    #[test]
    fn search_covers_description_and_tags() {
        let mut r = record(1, "Dashboard", &["TypeScript"], 0, 0, "2025-01-01");
        r.description = "Weather data with API integration".to_string();
        let records = vec![r];
        assert_eq!(query(&records, &CatalogQuery::new().search("integration")).len(), 1);
        assert_eq!(query(&records, &CatalogQuery::new().search("typescript")).len(), 1);
        assert!(query(&records, &CatalogQuery::new().search("python")).is_empty());
    }

    #[test]
    fn filter_is_exact_while_search_is_not() {
        let records = vec![record(1, "Scraper", &["Python"], 0, 0, "2025-01-01")];
        assert_eq!(query(&records, &CatalogQuery::new().language("Python")).len(), 1);
        assert!(query(&records, &CatalogQuery::new().language("python")).is_empty());
        assert_eq!(query(&records, &CatalogQuery::new().search("python")).len(), 1);
    }

    #[test]
    fn filter_and_search_combine_with_and() {
        let records = vec![
            record(1, "React Shop", &["React"], 0, 0, "2025-01-01"),
            record(2, "React Blog", &["Vue.js"], 0, 0, "2025-01-01"),
        ];
        let q = CatalogQuery::new().search("react").language("React");
        assert_eq!(ids(&query(&records, &q)), vec![1]);
    }

    #[test]
    fn empty_inputs_give_empty_views() {
        assert!(query(&[], &CatalogQuery::new().sort(SortKey::Recent)).is_empty());
        let records = scenario();
        let long = "x".repeat(500);
        assert!(query(&records, &CatalogQuery::new().search(long)).is_empty());
    }

    #[test]
    fn lenient_parsing_falls_back_to_defaults() {
        let q = CatalogQuery::from_ui("", "", "most-starred");
        assert_eq!(q.language_filter, LanguageFilter::All);
        assert_eq!(q.sort_key, SortKey::Unsorted);

        let q = CatalogQuery::from_ui("x", "All", " POPULAR ");
        assert_eq!(q.language_filter, LanguageFilter::All);
        assert_eq!(q.sort_key, SortKey::Popular);

        assert_eq!(LanguageFilter::parse("Go"), LanguageFilter::Only("Go".into()));
    }

    #[test]
    fn padded_filter_value_still_matches_exact_tag() {
        let filter = LanguageFilter::parse("  Rust ");
        assert_eq!(filter, LanguageFilter::Only("Rust".into()));

        let records = vec![
            record(1, "Parser", &["Rust"], 1, 1, "2025-12-01"),
            record(2, "Scraper", &["rust"], 1, 1, "2025-12-02"),
        ];
        let view = query(&records, &CatalogQuery::from_ui("", " Rust", ""));
        assert_eq!(ids(&view), vec![1]);
    }

    #[test]
    fn query_deserializes_with_missing_and_unknown_values() {
        let q: CatalogQuery = serde_json::from_str("{}").expect("empty object");
        assert_eq!(q, CatalogQuery::default());

        let q: CatalogQuery =
            serde_json::from_str(r#"{"sortKey": "hottest", "languageFilter": "Rust"}"#)
                .expect("lenient values");
        assert_eq!(q.sort_key, SortKey::Unsorted);
        assert_eq!(q.language_filter, LanguageFilter::Only("Rust".into()));
    }

    #[test]
    fn view_summary_counts_against_total() {
        let records = scenario();
        let view = CatalogView::build(&records, &CatalogQuery::new().language("Python"));
        assert_eq!(view.ids(), vec![ProjectId(2)]);
        assert_eq!(view.summary(), "showing 1 of 2 projects");
        assert!(!view.is_empty());
    }

    #[test]
    fn available_languages_in_first_seen_order() {
        let records = vec![
            record(1, "a", &["React", "Node.js"], 0, 0, "2025-01-01"),
            record(2, "b", &["Python", "React"], 0, 0, "2025-01-01"),
        ];
        assert_eq!(available_languages(&records), vec!["React", "Node.js", "Python"]);
    }

    #[test]
    fn find_by_id_returns_matching_record() {
        let records = scenario();
        assert_eq!(
            find_by_id(&records, ProjectId(2)).map(|r| r.title.as_str()),
            Some("Task Management App")
        );
        assert!(find_by_id(&records, ProjectId(99)).is_none());
    }
}
