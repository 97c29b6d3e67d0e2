//! Backend record model and run-scoped naming

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The entity kinds the console manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Organization,
    Team,
    Project,
    Inventory,
    JobTemplate,
}

impl RecordKind {
    /// Path segment under `/api/v2/` for this kind
    pub fn api_slug(&self) -> &'static str {
        match self {
            RecordKind::Organization => "organizations",
            RecordKind::Team => "teams",
            RecordKind::Project => "projects",
            RecordKind::Inventory => "inventories",
            RecordKind::JobTemplate => "job_templates",
        }
    }

    /// Slug used by per-row selection checkboxes (`select-<slug>-<id>`)
    pub fn checkbox_slug(&self) -> &'static str {
        match self {
            RecordKind::Organization => "organization",
            RecordKind::Team => "team",
            RecordKind::Project => "project",
            RecordKind::Inventory => "inventory",
            RecordKind::JobTemplate => "jobTemplate",
        }
    }

    /// Direct dependencies provisioned before a record of this kind.
    ///
    /// Logical names are shared so every fixture in a run hangs off the same
    /// organization (and job templates off the same inventory/project pair).
    pub fn dependencies(&self) -> &'static [(RecordKind, &'static str)] {
        match self {
            RecordKind::Organization => &[],
            RecordKind::Team | RecordKind::Project | RecordKind::Inventory => {
                &[(RecordKind::Organization, "fixture-org")]
            }
            RecordKind::JobTemplate => &[
                (RecordKind::Inventory, "fixture-inv"),
                (RecordKind::Project, "fixture-project"),
            ],
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_slug())
    }
}

/// A backend record referenced by the UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub kind: RecordKind,
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Per-execution unique suffix appended to generated fixture names.
///
/// Keeps records from colliding across parallel or repeated runs without
/// any cross-run coordination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunId(String);

impl RunId {
    /// Generate a fresh 8-character alphanumeric identifier
    pub fn generate() -> Self {
        let id: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(char::from)
            .collect();
        RunId(id.to_lowercase())
    }

    /// Use a fixed identifier (stable names for local debugging)
    pub fn fixed(id: impl Into<String>) -> Self {
        RunId(id.into())
    }

    /// The generated backend name for a logical fixture name
    pub fn scoped_name(&self, logical_name: &str) -> String {
        format!("{}-{}", logical_name, self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(RecordKind::Organization, "organizations", "organization")]
    #[test_case(RecordKind::Team, "teams", "team")]
    #[test_case(RecordKind::Project, "projects", "project")]
    #[test_case(RecordKind::Inventory, "inventories", "inventory")]
    #[test_case(RecordKind::JobTemplate, "job_templates", "jobTemplate")]
    fn kind_slugs(kind: RecordKind, api: &str, checkbox: &str) {
        assert_eq!(kind.api_slug(), api);
        assert_eq!(kind.checkbox_slug(), checkbox);
    }

    #[test]
    fn run_ids_are_unique() {
        let a = RunId::generate();
        let b = RunId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 8);
    }

    #[test]
    fn scoped_names_embed_run_id() {
        let run = RunId::fixed("42");
        assert_eq!(run.scoped_name("create-org"), "create-org-42");
        assert_ne!(run.scoped_name("a"), run.scoped_name("b"));
    }

    #[test]
    fn job_template_depends_on_inventory_and_project() {
        let deps = RecordKind::JobTemplate.dependencies();
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].0, RecordKind::Inventory);
        assert_eq!(deps[1].0, RecordKind::Project);
        assert!(RecordKind::Organization.dependencies().is_empty());
    }
}
