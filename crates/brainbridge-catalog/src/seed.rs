// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in project catalog.
//!
//! Stands in for the projects API until one exists. No I/O is performed.

use brainbridge_core::ProjectId;

use crate::model::{ProjectRecord, Timestamp};

fn seed(
    id: u64,
    title: &str,
    description: &str,
    languages: &[&str],
    (views, likes, comments): (u64, u64, u64),
    author: &str,
    (year, month, day): (i32, u32, u32),
) -> ProjectRecord {
    ProjectRecord {
        id: ProjectId(id),
        title: title.to_string(),
        description: description.to_string(),
        languages: languages.iter().collect(),
        views,
        likes,
        comments,
        author: author.to_string(),
        created_at: Timestamp::from_date(year, month, day).unwrap_or_default(),
        updated_at: None,
    }
}

/// Returns the six projects shown on the browse page.
pub fn seed_projects() -> Vec<ProjectRecord> {
    vec![
        seed(
            1,
            "E-Commerce Platform",
            "A full-stack e-commerce solution with React and Node.js",
            &["React", "Node.js", "MongoDB"],
            (1250, 89, 12),
            "John Doe",
            (2025, 12, 10),
        ),
        seed(
            2,
            "Task Management App",
            "Collaborative task management with real-time updates",
            &["Vue.js", "Python", "PostgreSQL"],
            (980, 67, 8),
            "Jane Smith",
            (2025, 12, 8),
        ),
        seed(
            3,
            "Weather Dashboard",
            "Beautiful weather dashboard with API integration",
            &["React", "TypeScript", "REST API"],
            (750, 45, 5),
            "Mike Johnson",
            (2025, 12, 5),
        ),
        seed(
            4,
            "Social Media Analytics",
            "Track and analyze social media performance",
            &["Python", "Django", "Chart.js"],
            (620, 38, 4),
            "Sarah Williams",
            (2025, 12, 3),
        ),
        seed(
            5,
            "Recipe Finder App",
            "Find recipes based on available ingredients",
            &["React Native", "Firebase", "Spoonacular API"],
            (540, 32, 6),
            "David Brown",
            (2025, 12, 1),
        ),
        seed(
            6,
            "Budget Tracker",
            "Personal finance management application",
            &["Angular", "Node.js", "MySQL"],
            (480, 28, 3),
            "Emily Davis",
            (2025, 11, 28),
        ),
    ]
}
