//! Host adapter for an already running server.
//!
//! Starting is a no-op; readiness is polled over HTTP until the server
//! answers with any status.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use sequent_application::ports::{Host, HostError};

/// Polling settings for [`RemoteHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    /// Number of attempts before giving up.
    pub attempts: u32,
    /// Pause between attempts.
    pub interval: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            attempts: 20,
            interval: Duration::from_millis(250),
        }
    }
}

/// A server reachable at a fixed base URL.
#[derive(Debug, Clone)]
pub struct RemoteHost {
    base_url: String,
    probe_url: String,
    policy: ReadinessPolicy,
    client: Client,
}

impl RemoteHost {
    /// Host probed at its base URL with the default policy.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            probe_url: base_url.clone(),
            base_url,
            policy: ReadinessPolicy::default(),
            client: Client::new(),
        }
    }

    /// Probes a different URL for readiness (builder pattern).
    #[must_use]
    pub fn with_probe_url(mut self, probe_url: impl Into<String>) -> Self {
        self.probe_url = probe_url.into();
        self
    }

    /// Overrides the polling policy (builder pattern).
    #[must_use]
    pub const fn with_policy(mut self, policy: ReadinessPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[async_trait]
impl Host for RemoteHost {
    async fn start(&self) -> Result<(), HostError> {
        Ok(())
    }

    async fn wait_ready(&self) -> Result<(), HostError> {
        let mut last_error = String::from("no attempt made");

        for attempt in 1..=self.policy.attempts {
            match self.client.get(&self.probe_url).send().await {
                Ok(response) => {
                    info!(url = %self.probe_url, status = response.status().as_u16(), "host ready");
                    return Ok(());
                }
                Err(e) => {
                    debug!(attempt, error = %e, "host not ready yet");
                    last_error = e.to_string();
                }
            }

            if attempt < self.policy.attempts {
                tokio::time::sleep(self.policy.interval).await;
            }
        }

        Err(HostError::NotReady(format!(
            "{} did not answer after {} attempts: {last_error}",
            self.probe_url, self.policy.attempts
        )))
    }

    fn base_url(&self) -> String {
        self.base_url.clone()
    }
}
