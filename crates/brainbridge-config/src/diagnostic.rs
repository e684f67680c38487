// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config diagnostics.
//!
//! Figment extraction errors and validation failures both end up as
//! [`ConfigError`], a miette diagnostic. Misspelled keys and values get a
//! "did you mean" hint based on Jaro-Winkler similarity, and unknown keys
//! point at the offending line when the file is known.

#![allow(unused_assignments)] // miette's derive trips this lint on struct variants

use figment::error::{Error as FigmentError, Kind};
use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

/// Similarity a candidate must exceed before it is offered as a hint.
const CLOSE_ENOUGH: f64 = 0.75;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("`{key}` is not a known setting")]
    #[diagnostic(
        code(brainbridge::config::unknown_key),
        help("{}", hint(suggestion.as_deref(), allowed))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        allowed: String,
        #[label("not recognized here")]
        at: Option<SourceSpan>,
        #[source_code]
        file: Option<NamedSource<String>>,
    },

    #[error("`{key}` has the wrong type: {detail}")]
    #[diagnostic(code(brainbridge::config::invalid_type), help("use a {expected} here"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A well-typed value outside the accepted set.
    #[error("`{value}` is not a valid `{key}`")]
    #[diagnostic(
        code(brainbridge::config::invalid_value),
        help("{}", hint(suggestion.as_deref(), allowed))
    )]
    InvalidValue {
        key: String,
        value: String,
        suggestion: Option<String>,
        allowed: String,
    },

    #[error("{message}")]
    #[diagnostic(code(brainbridge::config::validation))]
    Validation { message: String },

    #[error("{0}")]
    #[diagnostic(code(brainbridge::config::other))]
    Other(String),
}

fn hint(suggestion: Option<&str>, allowed: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? expected one of: {allowed}"),
        None => format!("expected one of: {allowed}"),
    }
}

impl ConfigError {
    fn from_figment(error: FigmentError, sources: &[(String, String)]) -> Self {
        match &error.kind {
            Kind::UnknownField(field, expected) => {
                let (at, file) = locate(&error, field, sources).unzip();
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, expected),
                    allowed: expected.join(", "),
                    at,
                    file,
                }
            }
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: error.path.join("."),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.clone(),
            },
            _ => ConfigError::Other(error.to_string()),
        }
    }
}

/// Splits a figment error into one diagnostic per underlying failure.
///
/// `sources` pairs a file path with its contents; it is only used to attach
/// source spans to unknown keys.
pub fn figment_to_config_errors(
    err: figment::Error,
    sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| ConfigError::from_figment(e, sources))
        .collect()
}

fn locate(
    error: &FigmentError,
    field: &str,
    sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let figment::Source::File(path) = error.metadata.as_ref()?.source.as_ref()? else {
        return None;
    };
    let path = path.display().to_string();
    let (name, content) = sources.iter().find(|(name, _)| *name == path)?;
    let offset = find_key_offset(content, error.path.first().map(String::as_str), field)?;
    Some((
        SourceSpan::new(offset.into(), field.len()),
        NamedSource::new(name, content.clone()),
    ))
}

/// Byte offset of `field = ...` inside `[section]`, or among the top-level
/// keys when `section` is `None`. The search stops at the next table header.
pub fn find_key_offset(content: &str, section: Option<&str>, field: &str) -> Option<usize> {
    let start = match section {
        Some(name) => {
            let header = format!("[{name}]");
            content.find(&header)? + header.len()
        }
        None => 0,
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        let rest = &line[indent..];
        if rest.starts_with('[') {
            return None;
        }
        if let Some(after) = rest.strip_prefix(field) {
            if after.trim_start().starts_with('=') {
                return Some(offset + indent);
            }
        }
        offset += line.len();
    }
    None
}

/// Closest candidate to `unknown`, if any is similar enough to be a typo.
pub fn suggest_key(unknown: &str, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .map(|c| (strsim::jaro_winkler(unknown, c), *c))
        .filter(|(score, _)| *score > CLOSE_ENOUGH)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, c)| c.to_string())
}

/// Renders one error as a graphical miette report.
pub fn render_report(error: &ConfigError) -> String {
    let mut out = String::new();
    if GraphicalReportHandler::new()
        .render_report(&mut out, error)
        .is_err()
    {
        out = format!("error: {error}\n");
    }
    out
}

/// Prints every error to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprint!("{}", render_report(error));
    }
}
