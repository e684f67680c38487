// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `brainbridge projects` and `brainbridge languages` command implementations.

use std::path::Path;

use brainbridge_catalog::{
    available_languages, load_projects_file, seed_projects, CatalogQuery, CatalogView,
    ProjectRecord, SortKey, ALL_LANGUAGES,
};
use brainbridge_config::CatalogConfig;
use brainbridge_core::BrainbridgeError;
use colored::Colorize;
use tracing::info;

/// Loads the catalog from the configured seed file, or the built-in projects.
pub fn load_catalog(config: &CatalogConfig) -> Result<Vec<ProjectRecord>, BrainbridgeError> {
    match &config.seed_file {
        Some(path) => {
            let records = load_projects_file(Path::new(path))?;
            info!(path = %path, count = records.len(), "catalog loaded from file");
            Ok(records)
        }
        None => Ok(seed_projects()),
    }
}

/// Builds the query for one listing; flags left out fall back to config defaults.
pub fn build_query(
    config: &CatalogConfig,
    search: Option<&str>,
    language: Option<&str>,
    sort: Option<&str>,
) -> CatalogQuery {
    CatalogQuery::from_ui(
        search.unwrap_or_default(),
        language.unwrap_or(ALL_LANGUAGES),
        sort.unwrap_or(&config.default_sort),
    )
}

/// Runs the `brainbridge projects` listing.
pub fn run_projects(
    config: &CatalogConfig,
    search: Option<&str>,
    language: Option<&str>,
    sort: Option<&str>,
) -> Result<(), BrainbridgeError> {
    let records = load_catalog(config)?;
    let query = build_query(config, search, language, sort);
    let view = CatalogView::build(&records, &query);

    if view.is_empty() {
        println!("{}", "No projects match your search.".yellow());
    }
    for record in &view.projects {
        println!("{}\n", render_card(record));
    }
    println!("{}", view.summary().dimmed());

    if query.sort_key == SortKey::Unsorted {
        if let Some(raw) = sort {
            if !raw.trim().eq_ignore_ascii_case("none") {
                eprintln!(
                    "{}",
                    format!("unknown sort `{raw}`, showing catalog order").yellow()
                );
            }
        }
    }
    Ok(())
}

/// Runs the `brainbridge languages` listing.
pub fn run_languages(config: &CatalogConfig) -> Result<(), BrainbridgeError> {
    let records = load_catalog(config)?;
    for tag in available_languages(&records) {
        println!("{tag}");
    }
    Ok(())
}

/// Formats one project as a multi-line card.
pub fn render_card(record: &ProjectRecord) -> String {
    let tags = record
        .languages
        .iter()
        .map(|t| t.cyan().to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let mut card = format!(
        "{} {}\n  by {} on {}",
        format!("#{}", record.id).dimmed(),
        record.title.bold(),
        record.author,
        record.created_at
    );
    if !record.description.is_empty() {
        card.push_str(&format!("\n  {}", record.description));
    }
    if !tags.is_empty() {
        card.push_str(&format!("\n  {tags}"));
    }
    card.push_str(&format!(
        "\n  {} views  {} likes  {} comments",
        record.views, record.likes, record.comments
    ));
    card
}
