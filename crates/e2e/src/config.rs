//! Runner configuration overrides from a YAML file
//!
//! CLI flags cover the common knobs; a YAML file is handier for pinned
//! local setups (external console URL, credentials, slow-machine poll
//! windows). File values are applied on top of the defaults, CLI flags on
//! top of the file.

use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::Deserialize;

use crate::browser::Browser;
use crate::error::{E2eError, E2eResult};
use crate::runner::RunnerConfig;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerOverrides {
    pub server_binary: Option<PathBuf>,
    pub port: Option<u16>,
    pub external_url: Option<String>,
    pub startup_timeout_secs: Option<u64>,
    pub api_url: Option<String>,
    pub api_username: Option<String>,
    pub api_password: Option<String>,
    pub browser: Option<String>,
    pub headless: Option<bool>,
    pub viewport_width: Option<u32>,
    pub viewport_height: Option<u32>,
    pub poll_interval_ms: Option<u64>,
    pub poll_window_ms: Option<u64>,
    pub output_dir: Option<PathBuf>,
}

impl RunnerOverrides {
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Apply these overrides on top of an existing configuration
    pub fn apply(self, mut config: RunnerConfig) -> E2eResult<RunnerConfig> {
        if let Some(binary) = self.server_binary {
            config.server.binary_path = binary;
        }
        if let Some(port) = self.port {
            config.server.port = Some(port);
        }
        if let Some(url) = self.external_url {
            config.server.external_url = Some(url);
        }
        if let Some(secs) = self.startup_timeout_secs {
            config.server.startup_timeout = Duration::from_secs(secs);
        }
        if let Some(url) = self.api_url {
            config.server.api_url = url.clone();
            config.backend.base_url = url;
        }
        if let Some(user) = self.api_username {
            config.backend.username = user;
        }
        if let Some(pass) = self.api_password {
            config.backend.password = pass;
        }
        if let Some(browser) = self.browser {
            config.browser.browser = parse_browser(&browser)?;
        }
        if let Some(headless) = self.headless {
            config.browser.headless = headless;
        }
        if let Some(width) = self.viewport_width {
            config.browser.viewport_width = width;
        }
        if let Some(height) = self.viewport_height {
            config.browser.viewport_height = height;
        }
        if let Some(interval) = self.poll_interval_ms {
            config.browser.poll_interval_ms = interval;
        }
        if let Some(window) = self.poll_window_ms {
            config.browser.poll_window_ms = window;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        Ok(config)
    }
}

pub fn parse_browser(name: &str) -> E2eResult<Browser> {
    match name {
        "chromium" => Ok(Browser::Chromium),
        "firefox" => Ok(Browser::Firefox),
        "webkit" => Ok(Browser::Webkit),
        other => Err(E2eError::Config(format!("unknown browser: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn yaml_overrides_apply_on_top_of_defaults() {
        let yaml = r#"
external_url: http://console.test:8043
api_username: qa
poll_window_ms: 10000
browser: firefox
"#;
        let overrides: RunnerOverrides = serde_yaml::from_str(yaml).unwrap();
        let config = overrides.apply(RunnerConfig::default()).unwrap();

        assert_eq!(
            config.server.external_url.as_deref(),
            Some("http://console.test:8043")
        );
        assert_eq!(config.backend.username, "qa");
        assert_eq!(config.browser.poll_window_ms, 10000);
        // Untouched fields keep their defaults.
        assert_eq!(config.browser.poll_interval_ms, 100);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let yaml = "viewport: big";
        assert!(serde_yaml::from_str::<RunnerOverrides>(yaml).is_err());
    }

    #[test_case("chromium" => Browser::Chromium)]
    #[test_case("firefox" => Browser::Firefox)]
    #[test_case("webkit" => Browser::Webkit)]
    fn browser_names_parse(name: &str) -> Browser {
        parse_browser(name).unwrap()
    }

    #[test]
    fn unknown_browser_is_an_error() {
        assert!(parse_browser("netscape").is_err());
    }
}
