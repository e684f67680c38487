// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Project record model.
//!
//! Records are created by an external data source (seed data today, an API
//! later). The catalog engine only ever reads them.

use std::fmt;
use std::str::FromStr;

use brainbridge_core::ProjectId;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point in time parsed from an ISO 8601 string.
///
/// Accepts RFC 3339 (`2025-12-10T09:30:00Z`), naive date-times
/// (`2025-12-10T09:30:00`, read as UTC) and bare dates (`2025-12-10`,
/// midnight UTC). Comparison is on the instant, never on the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<Utc>);

/// A string that could not be read as a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not an ISO 8601 date or date-time")]
pub struct TimestampError(pub String);

impl Timestamp {
    /// Midnight UTC on the given calendar date, if it exists.
    pub fn from_date(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Timestamp(dt.and_utc()))
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Timestamp(value)
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Timestamp(dt.with_timezone(&Utc)));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Timestamp(dt.and_utc()));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Timestamp(dt.and_utc()))
            .ok_or_else(|| TimestampError(s.to_string()))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TimestampError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Dates without a time of day print back as bare dates.
        if self.0.time() == chrono::NaiveTime::MIN {
            write!(f, "{}", self.0.format("%Y-%m-%d"))
        } else {
            write!(f, "{}", self.0.to_rfc3339())
        }
    }
}

/// Ordered set of language tags.
///
/// Insertion order is kept for display; duplicates (exact, case-sensitive)
/// are dropped. `"Python"` and `"python"` are different tags.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct LanguageTags(Vec<String>);

impl LanguageTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tag after trimming it.
    ///
    /// Returns false when the trimmed tag is empty or already present.
    pub fn insert(&mut self, tag: impl AsRef<str>) -> bool {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    /// Removes a tag by exact match. Returns whether it was present.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for LanguageTags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = LanguageTags::new();
        for tag in iter {
            tags.insert(tag);
        }
        tags
    }
}

impl From<Vec<String>> for LanguageTags {
    fn from(value: Vec<String>) -> Self {
        value.into_iter().collect()
    }
}

impl From<LanguageTags> for Vec<String> {
    fn from(value: LanguageTags) -> Self {
        value.0
    }
}

/// A project as shown on the browse page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub languages: LanguageTags,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    pub author: String,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_parses_bare_dates_and_datetimes() {
        let date: Timestamp = "2025-12-10".parse().expect("bare date");
        let datetime: Timestamp = "2025-12-10T08:00:00Z".parse().expect("rfc3339");
        let naive: Timestamp = "2025-12-10T08:00:00".parse().expect("naive");

        assert!(date < datetime);
        assert_eq!(datetime, naive);
        assert_eq!(date, Timestamp::from_date(2025, 12, 10).expect("valid date"));
    }

    #[test]
    fn timestamp_compares_instants_not_text() {
        // Textual order says the opposite once the offset is applied.
        let early: Timestamp = "2025-12-01T10:00:00+05:00".parse().expect("offset");
        let late: Timestamp = "2025-12-01T06:00:00Z".parse().expect("utc");
        assert!(early < late);
    }

    #[test]
    fn timestamp_rejects_garbage() {
        let err = "last tuesday".parse::<Timestamp>().unwrap_err();
        assert!(err.to_string().contains("last tuesday"));
        assert!(Timestamp::from_date(2025, 2, 30).is_none());
    }

    #[test]
    fn timestamp_display_keeps_bare_dates_short() {
        let date: Timestamp = "2025-12-10".parse().expect("bare date");
        assert_eq!(date.to_string(), "2025-12-10");
        let datetime: Timestamp = "2025-12-10T08:30:00Z".parse().expect("rfc3339");
        assert_eq!(datetime.to_string(), "2025-12-10T08:30:00+00:00");
    }

    #[test]
    fn language_tags_dedupe_and_trim() {
        let mut tags = LanguageTags::new();
        assert!(tags.insert("Rust"));
        assert!(!tags.insert("Rust"));
        assert!(!tags.insert("  Rust  "));
        assert!(!tags.insert("   "));
        assert!(tags.insert("rust"));
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["Rust", "rust"]);
    }

    #[test]
    fn language_tags_remove_is_exact() {
        let mut tags: LanguageTags = ["React", "Node.js"].into_iter().collect();
        assert!(!tags.remove("react"));
        assert!(tags.remove("React"));
        assert_eq!(tags.len(), 1);
        assert!(tags.contains("Node.js"));
    }

    #[test]
    fn record_deserializes_with_defaults() {
        let json = r#"{
            "id": 7,
            "title": "CLI",
            "languages": ["Rust", "Rust", "Go"],
            "author": "Ana",
            "createdAt": "2025-11-02"
        }"#;
        let record: ProjectRecord = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(record.id, ProjectId(7));
        assert!(record.description.is_empty());
        assert_eq!(record.languages.len(), 2);
        assert_eq!(record.views, 0);
        assert!(record.updated_at.is_none());
    }

    #[test]
    fn record_rejects_negative_counters() {
        let json = r#"{"id": 1, "title": "x", "author": "a", "createdAt": "2025-01-01", "views": -3}"#;
        assert!(serde_json::from_str::<ProjectRecord>(json).is_err());
    }
}
