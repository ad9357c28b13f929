use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

use super::Error;

/// How stubborn to be when an operation against the broker keeps failing:
/// up to `max_attempts` tries, sleeping `interval` between consecutive ones.
///
/// The defaults (10 attempts, 3 seconds apart) bound the worst case at
/// roughly 30 seconds of waiting before the caller gets a
/// [`Error::RetriesExhausted`] back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            interval: Duration::from_millis(3000),
        }
    }
}

impl RetryPolicy {
    /// Run `operation` until it succeeds or the attempt budget runs out.
    ///
    /// Attempts are strictly sequential: after a failure the task sleeps for
    /// the configured interval before trying again. There is no sleep after
    /// the final failure.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, anyhow::Error>>,
    {
        let mut last_error = None;
        for attempt in 1..=self.max_attempts {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    warn!(attempt, "Connection attempt failed: {error:#}");
                    last_error = Some(error);
                    let remaining = self.max_attempts - attempt;
                    if remaining > 0 {
                        info!(
                            "Retrying in {}s... ({remaining} retries left)",
                            self.interval.as_secs_f64()
                        );
                        tokio::time::sleep(self.interval).await;
                    }
                }
            }
        }
        Err(Error::RetriesExhausted {
            attempts: self.max_attempts,
            source: last_error
                .unwrap_or_else(|| anyhow::anyhow!("the retry budget allowed no attempts")),
        })
    }
}
