// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loading project records from an external JSON source.
//!
//! Malformed data is rejected here, at the boundary, so the query path never
//! has to deal with it.

use std::collections::HashSet;
use std::path::Path;

use brainbridge_core::{BrainbridgeError, ProjectId};
use thiserror::Error;
use tracing::debug;

use crate::model::ProjectRecord;

/// Problems with an external project list.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document is not a JSON array of project records.
    #[error("malformed project data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("project {id} has an empty title")]
    EmptyTitle { id: ProjectId },

    #[error("project id {id} appears more than once")]
    DuplicateId { id: ProjectId },
}

impl From<CatalogError> for BrainbridgeError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::Io { .. } => BrainbridgeError::Internal(message),
            _ => BrainbridgeError::InvalidRecord(message),
        }
    }
}

/// Checks the invariants serde cannot express: non-empty titles and unique ids.
pub fn validate_records(records: &[ProjectRecord]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for record in records {
        if record.title.trim().is_empty() {
            return Err(CatalogError::EmptyTitle { id: record.id });
        }
        if !seen.insert(record.id) {
            return Err(CatalogError::DuplicateId { id: record.id });
        }
    }
    Ok(())
}

/// Parses and validates a JSON array of project records.
pub fn load_projects_json(json: &str) -> Result<Vec<ProjectRecord>, CatalogError> {
    let records: Vec<ProjectRecord> = serde_json::from_str(json)?;
    validate_records(&records)?;
    debug!(count = records.len(), "loaded project records");
    Ok(records)
}

pub fn load_projects_file(path: &Path) -> Result<Vec<ProjectRecord>, CatalogError> {
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_projects_json(&json)
}
