//! Gantry test harness primitives
//!
//! This crate provides the reusable pieces every browser CRUD scenario is
//! built from:
//! - Run-scoped record naming and an idempotent fixture provisioner
//! - A structured DOM selector model that renders to CSS
//! - A bounded poll-until-condition primitive
//! - Scenario groups with a `Pending -> Running -> Passed | Failed` lifecycle
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    gantry-harness                          │
//! ├────────────────────────────────────────────────────────────┤
//! │  Provisioner<B: Backend>                                   │
//! │    └── ensure(kind, logical_name) -> Record                │
//! │          (create-or-reuse, dependency-aware, memoized)     │
//! ├────────────────────────────────────────────────────────────┤
//! │  ScenarioGroup                                             │
//! │    ├── fixtures: [FixtureRequest]                          │
//! │    └── build_steps(&FixtureSet, &RunId) -> [Action]        │
//! │          ├── Navigate { route }                            │
//! │          ├── Click / Type / Press / SelectOption           │
//! │          ├── StubRoute { pattern, status }                 │
//! │          └── Expect { Selector, Condition }                │
//! ├────────────────────────────────────────────────────────────┤
//! │  Poller { interval, window } -> wait_for(probe)            │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The browser side (compiling actions to a Playwright script and parsing
//! step results) lives in the `gantry-e2e` crate.

pub mod backend;
pub mod error;
pub mod fixture;
pub mod poll;
pub mod record;
pub mod scenario;
pub mod selector;

pub use backend::{Backend, BackendConfig, HttpBackend};
pub use error::{HarnessError, HarnessResult};
pub use fixture::{FixtureRequest, FixtureSet, Provisioner, RecordSpec};
pub use poll::Poller;
pub use record::{Record, RecordKind, RunId};
pub use scenario::{Action, Condition, ScenarioGroup, ScenarioStatus};
pub use selector::Selector;
