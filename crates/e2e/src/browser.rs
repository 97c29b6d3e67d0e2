//! Playwright browser automation
//!
//! A scenario group's actions are compiled into one Node script executed
//! against the `playwright` package. Every locate and assert inside the
//! script is a bounded poll (same interval/window the Rust side uses), and
//! each step prints one marker-prefixed JSON line the runner parses back
//! into [`StepReport`]s. The script exits non-zero at the first failing
//! step, so a failed assertion terminates its group immediately.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use serde::{Deserialize, Serialize};
use tokio::process::Command as TokioCommand;
use tracing::debug;

use gantry_harness::{Action, Condition};

use crate::error::{E2eError, E2eResult};

/// Marker prefix on per-step result lines in browser output
const STEP_MARKER: &str = "GANTRY-STEP::";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

/// Result of executing one scenario step in the browser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    pub index: usize,
    pub name: String,
    pub ok: bool,
    pub duration_ms: u64,
    #[serde(default)]
    pub error: Option<String>,
}

/// Configuration for the browser driver
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub base_url: String,
    pub screenshot_dir: PathBuf,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub browser: Browser,
    pub headless: bool,
    /// Poll interval for locates and assertions, in milliseconds
    pub poll_interval_ms: u64,
    /// Poll window for locates and assertions, in milliseconds
    pub poll_window_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8043".to_string(),
            screenshot_dir: PathBuf::from("test-results/screenshots"),
            viewport_width: 1280,
            viewport_height: 720,
            browser: Browser::Chromium,
            headless: true,
            poll_interval_ms: 100,
            poll_window_ms: 5000,
        }
    }
}

/// Compiles scenario actions to a Playwright script and runs it
pub struct PageDriver {
    config: BrowserConfig,
}

impl PageDriver {
    pub fn new(config: BrowserConfig) -> E2eResult<Self> {
        Self::check_playwright_installed()?;
        std::fs::create_dir_all(&config.screenshot_dir)?;
        Ok(Self { config })
    }

    /// Check that Node can resolve the playwright package
    fn check_playwright_installed() -> E2eResult<()> {
        let output = Command::new("node")
            .args(["-e", "require('playwright')"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::PlaywrightNotFound),
        }
    }

    /// Build the Node script for a strictly ordered step sequence
    pub fn compile_script(&self, steps: &[Action]) -> E2eResult<String> {
        for action in steps {
            for selector in action.selectors() {
                selector.validate().map_err(E2eError::Harness)?;
            }
        }

        let mut script = format!(
            r#"const {{ chromium, firefox, webkit }} = require('playwright');

const POLL_INTERVAL = {interval};
const POLL_WINDOW = {window};
const MARKER = '{marker}';

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  const baseUrl = '{base_url}';

  const sleep = (ms) => new Promise((resolve) => setTimeout(resolve, ms));

  async function pollFor(what, check) {{
    const deadline = Date.now() + POLL_WINDOW;
    let last = 'never probed';
    for (;;) {{
      const verdict = await check();
      last = verdict.observed;
      if (verdict.ok) return;
      if (Date.now() > deadline) throw new Error(what + '; last observed: ' + last);
      await sleep(POLL_INTERVAL);
    }}
  }}

  async function locateOne(selector) {{
    await pollFor('exactly one match for ' + selector, async () => {{
      const n = await page.locator(selector).count();
      return {{ ok: n === 1, observed: n + ' element(s)' }};
    }});
    return page.locator(selector);
  }}

  const steps = [
"#,
            interval = self.config.poll_interval_ms,
            window = self.config.poll_window_ms,
            marker = STEP_MARKER,
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            width = self.config.viewport_width,
            height = self.config.viewport_height,
            base_url = js_str(&self.config.base_url),
        );

        for action in steps {
            script.push_str(&format!(
                "    {{ name: '{}', fn: async () => {{\n{}\n    }} }},\n",
                js_str(&action.describe()),
                self.action_js(action)
            ));
        }

        script.push_str(
            r#"  ];

  let code = 0;
  for (let i = 0; i < steps.length; i++) {
    const t0 = Date.now();
    try {
      await steps[i].fn();
      console.log(MARKER + JSON.stringify({ index: i, name: steps[i].name, ok: true, duration_ms: Date.now() - t0 }));
    } catch (e) {
      console.log(MARKER + JSON.stringify({ index: i, name: steps[i].name, ok: false, duration_ms: Date.now() - t0, error: String((e && e.message) || e) }));
      code = 1;
      break;
    }
  }

  await browser.close();
  process.exit(code);
})();
"#,
        );

        Ok(script)
    }

    /// Convert one action to the body of its step function
    fn action_js(&self, action: &Action) -> String {
        match action {
            Action::Navigate { route } => format!(
                "      await page.goto(baseUrl + '{}', {{ waitUntil: 'networkidle' }});",
                js_str(route)
            ),
            Action::Click { target } => format!(
                "      const el = await locateOne('{}');\n      await el.click();",
                js_str(&target.css())
            ),
            Action::Type {
                target,
                text,
                clear_first,
            } => {
                let sel = js_str(&target.css());
                let clear = if *clear_first {
                    "\n      await el.fill('');"
                } else {
                    ""
                };
                format!(
                    "      const el = await locateOne('{sel}');{clear}\n      await el.type('{}', {{ delay: 25 }});",
                    js_str(text)
                )
            }
            Action::Press { key } => {
                format!("      await page.keyboard.press('{}');", js_str(key))
            }
            Action::SelectOption { target, value } => format!(
                "      const el = await locateOne('{}');\n      await el.selectOption('{}');",
                js_str(&target.css()),
                js_str(value)
            ),
            Action::StubRoute { pattern, status } => format!(
                "      await page.route('{}', (route) => route.fulfill({{ status: {}, contentType: 'application/json', body: '{{}}' }}));",
                js_str(pattern),
                status
            ),
            Action::Screenshot { name } => {
                let path = self.config.screenshot_dir.join(format!("{name}.png"));
                format!(
                    "      await page.screenshot({{ path: '{}', fullPage: true }});",
                    js_str(&path.to_string_lossy())
                )
            }
            Action::Expect { target, condition } => self.condition_js(target.css(), condition),
        }
    }

    fn condition_js(&self, selector: String, condition: &Condition) -> String {
        let sel = js_str(&selector);
        let what = js_str(&format!("{selector} {condition}"));
        let check = match condition {
            Condition::TextEquals(expected) => format!(
                r#"const loc = page.locator('{sel}');
        const n = await loc.count();
        if (n !== 1) return {{ ok: false, observed: n + ' element(s)' }};
        const text = (await loc.innerText()).trim();
        return {{ ok: text === '{}', observed: JSON.stringify(text) }};"#,
                js_str(expected)
            ),
            Condition::CountEquals(expected) => format!(
                r#"const n = await page.locator('{sel}').count();
        return {{ ok: n === {expected}, observed: n + ' element(s)' }};"#
            ),
            Condition::HasClass(class) => format!(
                r#"const loc = page.locator('{sel}');
        const n = await loc.count();
        if (n !== 1) return {{ ok: false, observed: n + ' element(s)' }};
        const cls = (await loc.getAttribute('class')) || '';
        return {{ ok: cls.split(/\s+/).includes('{}'), observed: JSON.stringify(cls) }};"#,
                js_str(class)
            ),
            Condition::Enabled(expected) => format!(
                r#"const loc = page.locator('{sel}');
        const n = await loc.count();
        if (n !== 1) return {{ ok: false, observed: n + ' element(s)' }};
        const enabled = await loc.isEnabled();
        return {{ ok: enabled === {expected}, observed: enabled ? 'enabled' : 'disabled' }};"#
            ),
        };
        format!("      await pollFor('{what}', async () => {{\n        {check}\n      }});")
    }

    /// Execute a step sequence and parse per-step results
    pub async fn run_steps(&self, steps: &[Action]) -> E2eResult<Vec<StepReport>> {
        let script = self.compile_script(steps)?;

        let scratch = tempfile::tempdir()?;
        let script_path = scratch.path().join("scenario.js");
        std::fs::write(&script_path, &script)?;

        debug!("Running browser script: {}", script_path.display());

        // No current_dir override: Node resolves the playwright package
        // from the invoking directory's node_modules.
        let output = TokioCommand::new("node").arg(&script_path).output().await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let reports = parse_step_reports(&stdout)?;

        if reports.is_empty() && !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(E2eError::Playwright(format!(
                "Script produced no step results:\nstdout: {}\nstderr: {}",
                stdout, stderr
            )));
        }

        Ok(reports)
    }
}

/// Extract marker-prefixed JSON step lines from browser output
fn parse_step_reports(stdout: &str) -> E2eResult<Vec<StepReport>> {
    let marker = regex::Regex::new(&format!(r"{}(\{{.*\}})", STEP_MARKER))
        .map_err(|e| E2eError::Playwright(format!("bad marker pattern: {e}")))?;

    let mut reports = Vec::new();
    for line in stdout.lines() {
        if let Some(captures) = marker.captures(line) {
            let report: StepReport = serde_json::from_str(&captures[1])?;
            reports.push(report);
        }
    }
    Ok(reports)
}

/// Escape a Rust string into a single-quoted JS string literal
fn js_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_harness::Selector;

    fn driver() -> PageDriver {
        // Bypass the playwright check for compile-only tests.
        PageDriver {
            config: BrowserConfig::default(),
        }
    }

    #[test]
    fn compiles_stub_and_navigate() {
        let steps = vec![
            Action::stub_route("**/api/v2/organizations/*", 404),
            Action::navigate("/#/organizations"),
        ];
        let script = driver().compile_script(&steps).unwrap();

        assert!(script.contains(
            "page.route('**/api/v2/organizations/*', (route) => route.fulfill({ status: 404"
        ));
        assert!(script.contains("page.goto(baseUrl + '/#/organizations'"));
        // Stub registration precedes navigation.
        assert!(script.find("page.route").unwrap() < script.find("page.goto").unwrap());
    }

    #[test]
    fn click_goes_through_single_match_locate() {
        let steps = vec![Action::click(Selector::tag("a").and_attr("aria-label", "Add"))];
        let script = driver().compile_script(&steps).unwrap();
        assert!(script.contains(r#"locateOne('a[aria-label="Add"]')"#));
        assert!(script.contains("await el.click()"));
    }

    #[test]
    fn clear_then_type_fills_empty_first() {
        let steps = vec![Action::retype(Selector::id("org-name"), "edited-org-42")];
        let script = driver().compile_script(&steps).unwrap();
        assert!(script.contains("await el.fill('');"));
        assert!(script.contains("await el.type('edited-org-42'"));
    }

    #[test]
    fn text_assertion_polls_with_observed_value() {
        let steps = vec![Action::expect(
            Selector::tag("dd").and_attr_contains("data-cy", "name"),
            Condition::TextEquals("create-org-42".to_string()),
        )];
        let script = driver().compile_script(&steps).unwrap();
        assert!(script.contains("pollFor"));
        assert!(script.contains("text === 'create-org-42'"));
        assert!(script.contains("observed: JSON.stringify(text)"));
    }

    #[test]
    fn enabled_assertion_polls_element_state() {
        let steps = vec![Action::expect(
            Selector::tag("button").and_attr("aria-label", "Delete"),
            Condition::Enabled(true),
        )];
        let script = driver().compile_script(&steps).unwrap();
        assert!(script.contains("await loc.isEnabled()"));
        assert!(script.contains("enabled === true"));
        assert!(script.contains("observed: enabled ? 'enabled' : 'disabled'"));
    }

    #[test]
    fn typed_text_is_escaped() {
        let steps = vec![Action::type_into(Selector::id("org-name"), "it's")];
        let script = driver().compile_script(&steps).unwrap();
        assert!(script.contains(r"await el.type('it\'s'"));
    }

    #[test]
    fn invalid_selector_fails_compilation() {
        let steps = vec![Action::click(Selector::attr("aria-label", "bad\"quote"))];
        let err = driver().compile_script(&steps).unwrap_err();
        assert!(matches!(err, E2eError::Harness(_)));
    }

    #[test]
    fn parses_step_report_lines() {
        let stdout = format!(
            "noise\n{}{{\"index\":0,\"name\":\"navigate:/#/teams\",\"ok\":true,\"duration_ms\":12}}\n{}{{\"index\":1,\"name\":\"click:a\",\"ok\":false,\"duration_ms\":5003,\"error\":\"exactly one match for a; last observed: 2 element(s)\"}}\n",
            STEP_MARKER, STEP_MARKER
        );
        let reports = parse_step_reports(&stdout).unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports[0].ok);
        assert!(!reports[1].ok);
        assert!(reports[1].error.as_deref().unwrap().contains("2 element(s)"));
    }
}
