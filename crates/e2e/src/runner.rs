//! Scenario runner orchestrating the console, fixtures, and the browser
//!
//! Groups run strictly in sequence. Each group gets fresh fixtures and its
//! own browser session; a failure is recorded in that group's report and
//! the next group still starts from a clean state.

use std::path::PathBuf;
use std::time::Instant;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use gantry_harness::{
    BackendConfig, FixtureSet, HttpBackend, Provisioner, RunId, ScenarioGroup, ScenarioStatus,
};

use crate::browser::{BrowserConfig, PageDriver, StepReport};
use crate::error::E2eResult;
use crate::server::{ServerConfig, ServerHandle};

/// Result of running a single scenario group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupReport {
    pub name: String,
    pub status: ScenarioStatus,
    pub duration_ms: u64,
    pub steps: Vec<StepReport>,
    pub error: Option<String>,
}

/// Result of running the whole suite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub run_id: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub groups: Vec<GroupReport>,
}

/// Configuration for the scenario runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub server: ServerConfig,
    pub browser: BrowserConfig,
    pub backend: BackendConfig,
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            browser: BrowserConfig::default(),
            backend: BackendConfig::from_env(),
            output_dir: PathBuf::from("test-results"),
        }
    }
}

/// Main scenario runner
pub struct ScenarioRunner {
    config: RunnerConfig,
    server: Option<ServerHandle>,
    provisioner: Provisioner<HttpBackend>,
}

impl ScenarioRunner {
    pub fn new(config: RunnerConfig) -> E2eResult<Self> {
        Self::with_run_id(config, RunId::generate())
    }

    pub fn with_run_id(config: RunnerConfig, run: RunId) -> E2eResult<Self> {
        let backend = HttpBackend::new(config.backend.clone())?;
        Ok(Self {
            config,
            server: None,
            provisioner: Provisioner::new(backend, run),
        })
    }

    /// Start (or attach to) the console under test
    pub async fn start_server(&mut self) -> E2eResult<()> {
        if self.server.is_some() {
            return Ok(()); // Already running
        }

        let server = ServerHandle::start(self.config.server.clone()).await?;

        // Browser and fixture traffic both go through the console origin.
        self.config.browser.base_url = server.base_url().to_string();

        self.server = Some(server);
        Ok(())
    }

    pub fn stop_server(&mut self) -> E2eResult<()> {
        if let Some(mut server) = self.server.take() {
            server.stop()?;
        }
        Ok(())
    }

    /// Run a sequence of scenario groups and collect the suite report
    pub async fn run_groups(&mut self, groups: &mut [ScenarioGroup]) -> E2eResult<SuiteReport> {
        let start = Instant::now();

        self.start_server().await?;

        let mut reports = Vec::new();
        let mut passed = 0;
        let mut failed = 0;
        let mut skipped = 0;

        info!("Running {} scenario group(s)...", groups.len());

        for group in groups.iter_mut() {
            let report = self.run_group(group).await;
            match report.status {
                ScenarioStatus::Passed => {
                    passed += 1;
                    info!("✓ {} ({} ms)", report.name, report.duration_ms);
                }
                ScenarioStatus::Failed => {
                    failed += 1;
                    error!(
                        "✗ {} - {}",
                        report.name,
                        report.error.as_deref().unwrap_or("unknown error")
                    );
                }
                _ => {
                    skipped += 1;
                    info!("- {} (not yet specified)", report.name);
                }
            }
            reports.push(report);
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!(
            "Results: {} passed, {} failed, {} skipped ({} ms)",
            passed, failed, skipped, duration_ms
        );

        Ok(SuiteReport {
            run_id: self.provisioner.run_id().to_string(),
            total: groups.len(),
            passed,
            failed,
            skipped,
            duration_ms,
            groups: reports,
        })
    }

    /// Run one scenario group through setup, browser, and status transitions.
    ///
    /// Failures land in the returned report rather than propagating, so one
    /// group can never prevent the next one from starting.
    async fn run_group(&mut self, group: &mut ScenarioGroup) -> GroupReport {
        let start = Instant::now();

        if group.is_placeholder() {
            return GroupReport {
                name: group.name().to_string(),
                status: ScenarioStatus::Pending,
                duration_ms: 0,
                steps: Vec::new(),
                error: None,
            };
        }

        debug!("Running scenario group: {}", group.name());

        match self.execute_group(group).await {
            Ok((steps, step_error)) => {
                let status = if step_error.is_none() {
                    let _ = group.mark_passed();
                    ScenarioStatus::Passed
                } else {
                    let _ = group.mark_failed();
                    ScenarioStatus::Failed
                };
                GroupReport {
                    name: group.name().to_string(),
                    status,
                    duration_ms: start.elapsed().as_millis() as u64,
                    steps,
                    error: step_error,
                }
            }
            Err(e) => {
                // Setup or infrastructure failure: fatal to this group only,
                // never retried.
                let _ = group.mark_failed();
                GroupReport {
                    name: group.name().to_string(),
                    status: ScenarioStatus::Failed,
                    duration_ms: start.elapsed().as_millis() as u64,
                    steps: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    async fn execute_group(
        &mut self,
        group: &mut ScenarioGroup,
    ) -> E2eResult<(Vec<StepReport>, Option<String>)> {
        group.mark_running()?;

        let fixtures = if group.fixtures().is_empty() {
            FixtureSet::new()
        } else {
            self.provisioner.provision(group.fixtures()).await?
        };

        let steps = group.build_steps(&fixtures, self.provisioner.run_id())?;
        let driver = PageDriver::new(self.config.browser.clone())?;
        let reports = driver.run_steps(&steps).await?;

        let step_error = reports.iter().find(|r| !r.ok).map(|r| {
            format!(
                "step {} ({}) failed: {}",
                r.index,
                r.name,
                r.error.as_deref().unwrap_or("no diagnostic")
            )
        });

        Ok((reports, step_error))
    }

    /// Write the suite report to a JSON file
    pub fn write_report(&self, report: &SuiteReport) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("suite-report.json");
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&path, json)?;

        info!("Report written to: {}", path.display());
        Ok(path)
    }
}

impl Drop for ScenarioRunner {
    fn drop(&mut self) {
        let _ = self.stop_server();
    }
}
