//! Bounded poll-until-condition primitive
//!
//! The application under test renders asynchronously, so readiness and
//! lookup checks are re-run on an interval until they hold or the window
//! elapses. The same interval/window pair parameterizes the in-browser
//! locate and assert helpers.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::error::{HarnessError, HarnessResult};

/// Re-runs a probe on a fixed interval inside a bounded window
#[derive(Debug, Clone, Copy)]
pub struct Poller {
    interval: Duration,
    window: Duration,
}

impl Default for Poller {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            window: Duration::from_secs(5),
        }
    }
}

impl Poller {
    pub fn new(interval: Duration, window: Duration) -> Self {
        Self { interval, window }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Run `probe` until it returns `Ok`, or fail with a diagnostic carrying
    /// the last observed value once the window elapses.
    ///
    /// `Err` from the probe is the retryable observation, not a fatal error;
    /// a timeout aborts only this wait, nothing broader.
    pub async fn wait_for<F, Fut, T>(&self, what: &str, mut probe: F) -> HarnessResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, String>>,
    {
        let start = Instant::now();
        let mut last = String::from("never probed");

        loop {
            match probe().await {
                Ok(value) => return Ok(value),
                Err(observed) => last = observed,
            }

            if start.elapsed() >= self.window {
                return Err(HarnessError::PollTimeout {
                    what: what.to_string(),
                    waited_ms: start.elapsed().as_millis() as u64,
                    last,
                });
            }

            tokio::time::sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_once_probe_succeeds() {
        let poller = Poller::new(Duration::from_millis(1), Duration::from_secs(1));
        let mut attempts = 0;

        let value = poller
            .wait_for("third attempt", || {
                attempts += 1;
                let n = attempts;
                async move {
                    if n >= 3 {
                        Ok(n)
                    } else {
                        Err(format!("attempt {}", n))
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(value, 3);
    }

    #[tokio::test]
    async fn timeout_reports_last_observation() {
        let poller = Poller::new(Duration::from_millis(1), Duration::from_millis(10));

        let err = poller
            .wait_for("element count", || async { Err::<(), _>("3 element(s)".to_string()) })
            .await
            .unwrap_err();

        match err {
            HarnessError::PollTimeout { what, last, waited_ms } => {
                assert_eq!(what, "element count");
                assert_eq!(last, "3 element(s)");
                assert!(waited_ms >= 10);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
