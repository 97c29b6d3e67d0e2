//! Console management - spawning and readiness-checking the web server
//!
//! Scenarios can run against a console the runner spawns itself, or attach
//! to one already running elsewhere (`external_url`). Either way the runner
//! polls the API ping endpoint until the console is ready to render.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tracing::info;

use gantry_harness::Poller;

use crate::error::{E2eError, E2eResult};

/// Handle to the console under test
pub struct ServerHandle {
    child: Option<Child>,
    base_url: String,
}

impl ServerHandle {
    /// Spawn the console server, or attach to an external one
    pub async fn start(config: ServerConfig) -> E2eResult<Self> {
        if let Some(url) = &config.external_url {
            let handle = ServerHandle {
                child: None,
                base_url: url.trim_end_matches('/').to_string(),
            };
            handle.wait_for_ready(config.startup_timeout).await?;
            info!("Attached to console at {}", handle.base_url);
            return Ok(handle);
        }

        let port = config.port.unwrap_or_else(find_free_port);
        let base_url = format!("http://127.0.0.1:{}", port);

        info!("Spawning console on port {}", port);

        let mut cmd = Command::new(&config.binary_path);
        cmd.env("GANTRY_CONSOLE_PORT", port.to_string())
            .env("GANTRY_CONSOLE_HOST", "127.0.0.1")
            .env("GANTRY_CONSOLE_API_URL", &config.api_url);

        if config.test_mode {
            cmd.env("GANTRY_CONSOLE_TEST_MODE", "1");
        }

        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        let child = cmd.spawn().map_err(|e| {
            E2eError::ServerStartup(format!(
                "Failed to spawn {}: {}",
                config.binary_path.display(),
                e
            ))
        })?;

        let handle = ServerHandle {
            child: Some(child),
            base_url,
        };

        handle.wait_for_ready(config.startup_timeout).await?;

        info!("Console is ready at {}", handle.base_url);
        Ok(handle)
    }

    /// Poll the API ping endpoint until the console answers
    async fn wait_for_ready(&self, timeout: Duration) -> E2eResult<()> {
        let ping_url = format!("{}/api/v2/ping/", self.base_url);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        let poller = Poller::new(Duration::from_millis(100), timeout);
        poller
            .wait_for("console readiness", || {
                let client = client.clone();
                let url = ping_url.clone();
                async move {
                    match client.get(&url).send().await {
                        Ok(resp) if resp.status().is_success() => Ok(()),
                        Ok(resp) => Err(format!("ping returned {}", resp.status())),
                        // Connection refused is expected while starting up.
                        Err(e) => Err(format!("ping failed: {e}")),
                    }
                }
            })
            .await
            .map_err(|e| E2eError::ServerReadiness(e.to_string()))
    }

    /// Get the base URL for this console
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stop the console if this handle spawned it
    pub fn stop(&mut self) -> E2eResult<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        info!("Stopping console (pid: {})", child.id());

        // Try graceful shutdown first
        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() {
                std::thread::sleep(Duration::from_millis(500));
            }
        }

        // Force kill if still running
        let _ = child.kill();
        let _ = child.wait();

        Ok(())
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Configuration for the console under test
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path to the console server binary
    pub binary_path: PathBuf,

    /// Backend API the console talks to
    pub api_url: String,

    /// Port to listen on (None = find free port)
    pub port: Option<u16>,

    /// Attach to an already-running console instead of spawning one
    pub external_url: Option<String>,

    /// Timeout for console startup
    pub startup_timeout: Duration,

    /// Enable test mode (mock data, faster timeouts)
    pub test_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            binary_path: PathBuf::from("target/debug/gantry-console"),
            api_url: "http://127.0.0.1:8043".to_string(),
            port: None,
            external_url: None,
            startup_timeout: Duration::from_secs(30),
            test_mode: true,
        }
    }
}

/// Find a free port to use
fn find_free_port() -> u16 {
    use std::net::TcpListener;

    TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind to find free port")
        .local_addr()
        .expect("Failed to get local addr")
        .port()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_free_port() {
        let port1 = find_free_port();
        let port2 = find_free_port();

        assert!(port1 > 1024);
        assert!(port2 > 1024);
    }
}
