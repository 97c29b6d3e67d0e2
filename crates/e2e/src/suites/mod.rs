//! CRUD scenario suites per entity kind
//!
//! Each suite reproduces one user journey per scenario group: 404 handling,
//! create (with related-record pickers where the form requires them), edit,
//! delete-through-search, plus the deliberately unspecified placeholders.

pub mod job_templates;
pub mod organizations;
pub mod teams;
pub mod ui;

use gantry_harness::ScenarioGroup;

/// Every scenario group, in suite order
pub fn all() -> Vec<ScenarioGroup> {
    let mut groups = organizations::scenarios();
    groups.extend(teams::scenarios());
    groups.extend(job_templates::scenarios());
    groups
}

/// Groups whose name contains `filter` (case-insensitive)
pub fn matching(filter: &str) -> Vec<ScenarioGroup> {
    let needle = filter.to_lowercase();
    all()
        .into_iter()
        .filter(|g| g.name().to_lowercase().contains(&needle))
        .collect()
}
