//! Gantry E2E runner
//!
//! Drives a real browser against a live console instance:
//! - Spawns (or attaches to) the console web server
//! - Provisions backend fixtures per scenario group
//! - Compiles scenario steps to a Playwright script run via Node
//! - Parses per-step results and writes a JSON suite report
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Scenario Runner (Rust)                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ScenarioRunner                                             │
//! │    ├── start_server() -> ServerHandle                       │
//! │    ├── run_groups([ScenarioGroup]) -> SuiteReport           │
//! │    │     ├── provision fixtures (gantry-harness)            │
//! │    │     ├── build_steps(&FixtureSet, &RunId)               │
//! │    │     └── PageDriver::run_steps -> [StepReport]          │
//! │    └── write_report() -> suite-report.json                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Suites                                                     │
//! │    ├── organizations: 404 / create / edit / delete          │
//! │    ├── teams:         404 / create(+picker) / edit / delete │
//! │    └── job_templates: 404 / create(+pickers) / edit /       │
//! │                       delete / snapshot                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod runner;
pub mod server;
pub mod suites;

pub use browser::{Browser, BrowserConfig, PageDriver, StepReport};
pub use error::{E2eError, E2eResult};
pub use runner::{GroupReport, RunnerConfig, ScenarioRunner, SuiteReport};
pub use server::{ServerConfig, ServerHandle};
