use std::time::Duration;

use async_trait::async_trait;
use stos_webclient::{ProblemId, StosClient, TransientMarker};
use tokio::time::Instant;

/// Anything that can fetch the current status page of a problem.
#[async_trait]
pub trait StatusSource {
    async fn fetch_status(&self, problem_id: &ProblemId) -> anyhow::Result<String>;
}

#[async_trait]
impl StatusSource for StosClient {
    async fn fetch_status(&self, problem_id: &ProblemId) -> anyhow::Result<String> {
        Ok(StosClient::fetch_status(self, problem_id).await?)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("STOS did not finish judging within {0:?}")]
pub struct PollTimedOut(pub Duration);

/// Re-fetches the status page until it no longer reports the submission as
/// pending. Polls forever unless a timeout is set.
#[derive(Debug, Clone)]
pub struct StatusPoller {
    interval: Duration,
    timeout: Option<Duration>,
}

impl Default for StatusPoller {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusPoller {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

    pub fn new() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            timeout: None,
        }
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn get_interval(&self) -> Duration {
        self.interval
    }

    pub fn get_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the first status page that contains no transient marker.
    pub async fn poll_until_judged<S>(
        &self,
        source: &S,
        problem_id: &ProblemId,
    ) -> anyhow::Result<String>
    where
        S: StatusSource + Sync + ?Sized,
    {
        let started_at = Instant::now();
        let mut page = source.fetch_status(problem_id).await?;
        let mut num_fetches = 1;

        while let Some(marker) = TransientMarker::find_in(&page) {
            if let Some(limit) = self.timeout {
                if started_at.elapsed() >= limit {
                    return Err(PollTimedOut(limit).into());
                }
            }
            log::debug!(
                "Problem {} is still being judged ({}), retrying in {:?}",
                problem_id,
                marker.as_ref(),
                self.interval
            );
            tokio::time::sleep(self.interval).await;
            page = source.fetch_status(problem_id).await?;
            num_fetches += 1;
        }

        log::debug!("Judging finished after {} fetch(es)", num_fetches);
        Ok(page)
    }
}
