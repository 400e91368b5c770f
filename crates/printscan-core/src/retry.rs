//! Opt-in retry logic for probes.
//!
//! The protocol adapter itself never retries; UDP probes against printers
//! are cheap and the sweep tolerates misses. For lossy networks this module
//! provides a configurable wrapper that retries transport-level failures
//! with exponential backoff. Agent answers (`Protocol` and `Empty`
//! errors) are never retried; the agent would answer the same way again.
//!
//! # Example
//!
//! ```no_run
//! use printscan_core::{ClientConfig, RetryConfig, RetryingClient, UdpSnmpClient};
//!
//! # fn example() -> printscan_core::Result<()> {
//! let inner = UdpSnmpClient::new(ClientConfig::default())?;
//! let client = RetryingClient::new(inner, RetryConfig::probes(2));
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, warn};

use printscan_types::Oid;

use crate::client::SnmpClient;
use crate::error::Result;

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (0 means no retries).
    pub max_retries: u32,
    /// Initial delay between retries.
    pub initial_delay: Duration,
    /// Maximum delay between retries (for exponential backoff).
    pub max_delay: Duration,
    /// Backoff multiplier (1.0 = constant delay, 2.0 = double each time).
    pub backoff_multiplier: f64,
    /// Whether to add jitter to delays.
    pub jitter: bool,
}

impl Default for RetryConfig {
    /// No retries — the observable behavior of a bare probe.
    fn default() -> Self {
        Self::none()
    }
}

impl RetryConfig {
    /// No retries.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(2),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }

    /// Retry settings suited to UDP probes: short delays, bounded backoff.
    #[must_use]
    pub fn probes(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::none()
        }
    }

    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);
        let mut millis = base.min(self.max_delay.as_millis() as f64) as u64;
        if self.jitter && millis > 0 {
            // Up to 25% extra, decorrelates probes retrying in lockstep.
            let extra = rand::rng().random_range(0..=millis / 4);
            millis += extra;
        }
        Duration::from_millis(millis)
    }
}

/// Run `operation`, retrying transport-level failures per `config`.
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, operation: &str, mut f: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;

    loop {
        match f().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!(operation, attempt, "succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if e.is_retryable() && attempt < config.max_retries => {
                attempt += 1;
                let delay = config.delay_for_attempt(attempt);
                warn!(
                    operation,
                    attempt,
                    max = config.max_retries,
                    error = %e,
                    "retrying after {delay:?}"
                );
                sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// An [`SnmpClient`] decorator that retries each fetch per a [`RetryConfig`].
#[derive(Debug)]
pub struct RetryingClient<C> {
    inner: C,
    config: RetryConfig,
}

impl<C: SnmpClient> RetryingClient<C> {
    /// Wrap a client with retry behavior.
    pub fn new(inner: C, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl<C: SnmpClient> SnmpClient for RetryingClient<C> {
    async fn fetch_scalar(&self, address: Ipv4Addr, oid: &Oid) -> Result<String> {
        with_retry(&self.config, "fetch_scalar", || {
            self.inner.fetch_scalar(address, oid)
        })
        .await
    }
}
