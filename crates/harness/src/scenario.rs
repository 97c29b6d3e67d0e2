//! Scenario groups
//!
//! One scenario group is one complete user journey: optional fixture setup,
//! navigation, actions, assertions. Steps are produced by a builder closure
//! that receives the group's fixtures and the run id, so backend ids flow in
//! explicitly instead of through ambient aliases.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{HarnessError, HarnessResult};
use crate::fixture::{FixtureRequest, FixtureSet};
use crate::record::{RecordKind, RunId};
use crate::selector::Selector;

/// A condition the assertion layer polls for
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Exact text of the single matching element
    TextEquals(String),
    /// Number of matching elements
    CountEquals(usize),
    /// Class list of the single matching element contains this class
    HasClass(String),
    /// Enabled/disabled state of the single matching element
    Enabled(bool),
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::TextEquals(text) => write!(f, "text == {text:?}"),
            Condition::CountEquals(n) => write!(f, "count == {n}"),
            Condition::HasClass(class) => write!(f, "has class {class:?}"),
            Condition::Enabled(true) => write!(f, "is enabled"),
            Condition::Enabled(false) => write!(f, "is disabled"),
        }
    }
}

/// One strictly ordered step of a scenario
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Visit a route relative to the console base URL
    Navigate { route: String },
    /// Click the single element matching the selector
    Click { target: Selector },
    /// Type into the single matching element, optionally clearing it first
    Type {
        target: Selector,
        text: String,
        clear_first: bool,
    },
    /// Press a keyboard key (e.g. search submit via Enter)
    Press { key: String },
    /// Choose an option from a select element
    SelectOption { target: Selector, value: String },
    /// Intercept a backend URL pattern and answer with a fixed status
    StubRoute { pattern: String, status: u16 },
    /// Capture a full-page screenshot (capture only, no comparison)
    Screenshot { name: String },
    /// Poll until the condition holds for the selector
    Expect { target: Selector, condition: Condition },
}

impl Action {
    pub fn navigate(route: impl Into<String>) -> Self {
        Action::Navigate { route: route.into() }
    }

    pub fn click(target: Selector) -> Self {
        Action::Click { target }
    }

    pub fn type_into(target: Selector, text: impl Into<String>) -> Self {
        Action::Type {
            target,
            text: text.into(),
            clear_first: false,
        }
    }

    /// Clear the field, then type
    pub fn retype(target: Selector, text: impl Into<String>) -> Self {
        Action::Type {
            target,
            text: text.into(),
            clear_first: true,
        }
    }

    pub fn press(key: impl Into<String>) -> Self {
        Action::Press { key: key.into() }
    }

    pub fn select_option(target: Selector, value: impl Into<String>) -> Self {
        Action::SelectOption {
            target,
            value: value.into(),
        }
    }

    pub fn stub_route(pattern: impl Into<String>, status: u16) -> Self {
        Action::StubRoute {
            pattern: pattern.into(),
            status,
        }
    }

    pub fn screenshot(name: impl Into<String>) -> Self {
        Action::Screenshot { name: name.into() }
    }

    pub fn expect(target: Selector, condition: Condition) -> Self {
        Action::Expect { target, condition }
    }

    /// Short name used in step reports and logs
    pub fn describe(&self) -> String {
        match self {
            Action::Navigate { route } => format!("navigate:{route}"),
            Action::Click { target } => format!("click:{}", target.css()),
            Action::Type { target, .. } => format!("type:{}", target.css()),
            Action::Press { key } => format!("press:{key}"),
            Action::SelectOption { target, .. } => format!("select:{}", target.css()),
            Action::StubRoute { pattern, status } => format!("stub:{pattern}={status}"),
            Action::Screenshot { name } => format!("screenshot:{name}"),
            Action::Expect { target, condition } => {
                format!("expect:{} {}", target.css(), condition)
            }
        }
    }

    /// Selectors this action locates, for up-front validation
    pub fn selectors(&self) -> Vec<&Selector> {
        match self {
            Action::Click { target }
            | Action::Type { target, .. }
            | Action::SelectOption { target, .. }
            | Action::Expect { target, .. } => vec![target],
            _ => Vec::new(),
        }
    }
}

/// Lifecycle of one scenario group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    Pending,
    Running,
    Passed,
    Failed,
}

impl fmt::Display for ScenarioStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScenarioStatus::Pending => "pending",
            ScenarioStatus::Running => "running",
            ScenarioStatus::Passed => "passed",
            ScenarioStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

type StepBuilder = Box<dyn Fn(&FixtureSet, &RunId) -> HarnessResult<Vec<Action>> + Send + Sync>;

/// One named user journey with its fixtures and step builder
pub struct ScenarioGroup {
    name: String,
    kind: Option<RecordKind>,
    fixtures: Vec<FixtureRequest>,
    builder: Option<StepBuilder>,
    status: ScenarioStatus,
}

impl ScenarioGroup {
    pub fn new<F>(name: impl Into<String>, builder: F) -> Self
    where
        F: Fn(&FixtureSet, &RunId) -> HarnessResult<Vec<Action>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind: None,
            fixtures: Vec::new(),
            builder: Some(Box::new(builder)),
            status: ScenarioStatus::Pending,
        }
    }

    /// A declared-but-unspecified scenario. It is reported as skipped and
    /// never run; the intended behavior is deliberately not inferred.
    pub fn not_yet_specified(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            fixtures: Vec::new(),
            builder: None,
            status: ScenarioStatus::Pending,
        }
    }

    pub fn for_kind(mut self, kind: RecordKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Request a fixture provisioned before this group runs
    pub fn with_fixture(mut self, kind: RecordKind, logical_name: &str, alias: &str) -> Self {
        self.fixtures.push(FixtureRequest::new(kind, logical_name, alias));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Option<RecordKind> {
        self.kind
    }

    pub fn fixtures(&self) -> &[FixtureRequest] {
        &self.fixtures
    }

    pub fn status(&self) -> ScenarioStatus {
        self.status
    }

    pub fn is_placeholder(&self) -> bool {
        self.builder.is_none()
    }

    /// Produce this group's concrete steps from its fixtures and the run id
    pub fn build_steps(&self, fixtures: &FixtureSet, run: &RunId) -> HarnessResult<Vec<Action>> {
        match &self.builder {
            Some(builder) => builder(fixtures, run),
            None => Ok(Vec::new()),
        }
    }

    pub fn mark_running(&mut self) -> HarnessResult<()> {
        self.transition(ScenarioStatus::Running)
    }

    pub fn mark_passed(&mut self) -> HarnessResult<()> {
        self.transition(ScenarioStatus::Passed)
    }

    pub fn mark_failed(&mut self) -> HarnessResult<()> {
        self.transition(ScenarioStatus::Failed)
    }

    fn transition(&mut self, to: ScenarioStatus) -> HarnessResult<()> {
        let legal = matches!(
            (self.status, to),
            (ScenarioStatus::Pending, ScenarioStatus::Running)
                | (ScenarioStatus::Running, ScenarioStatus::Passed)
                | (ScenarioStatus::Running, ScenarioStatus::Failed)
        );
        if !legal {
            return Err(HarnessError::InvalidTransition {
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        Ok(())
    }
}

impl fmt::Debug for ScenarioGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioGroup")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("fixtures", &self.fixtures.len())
            .field("status", &self.status)
            .finish()
    }
}
