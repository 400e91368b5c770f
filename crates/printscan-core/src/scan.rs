//! Discovery sweep over a subnet.
//!
//! Probes candidate addresses for the common `device_name` attribute and
//! returns the first responder. The sweep is a finite search over the
//! configured suffix range; each call starts fresh.

use std::net::Ipv4Addr;
use std::ops::RangeInclusive;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};

use printscan_types::{AttributeCatalog, DiscoveredPrinter, attr};

use crate::client::SnmpClient;
use crate::error::{QueryError, Result};

/// Options for a discovery sweep.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Subnet prefix the host suffix is appended to, e.g. `"192.168.1."`.
    pub prefix: String,
    /// Inclusive range of host suffixes to probe, in ascending order.
    pub range: RangeInclusive<u8>,
    /// How many probes may be in flight at once. 1 reproduces a strictly
    /// sequential sweep.
    pub concurrency: usize,
    /// Overall budget for the sweep. Once elapsed, no further probes are
    /// issued and the sweep resolves to whatever was found so far.
    pub sweep_timeout: Option<Duration>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            prefix: "192.168.1.".to_string(),
            range: 1..=254,
            concurrency: 1,
            sweep_timeout: None,
        }
    }
}

impl ScanOptions {
    /// Create sweep options with defaults.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    /// Set the inclusive host suffix range.
    #[must_use]
    pub fn range(mut self, range: RangeInclusive<u8>) -> Self {
        self.range = range;
        self
    }

    /// Set the probe concurrency.
    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the overall sweep timeout.
    #[must_use]
    pub fn sweep_timeout(mut self, timeout: Duration) -> Self {
        self.sweep_timeout = Some(timeout);
        self
    }

    /// Resolve every candidate address up front, in ascending suffix order.
    fn candidates(&self) -> Result<Vec<Ipv4Addr>> {
        if self.concurrency == 0 {
            return Err(QueryError::invalid_config("concurrency must be at least 1"));
        }
        self.range
            .clone()
            .map(|suffix| {
                let candidate = format!("{}{}", self.prefix, suffix);
                candidate.parse::<Ipv4Addr>().map_err(|_| {
                    QueryError::invalid_config(format!(
                        "prefix {:?} does not form a valid IPv4 address ({candidate})",
                        self.prefix
                    ))
                })
            })
            .collect()
    }
}

/// Sweep the subnet for the first device answering a `device_name` probe.
///
/// Candidates are probed in ascending suffix order; the first address that
/// yields a non-empty, non-error value wins and the sweep stops issuing
/// probes. Probe failures never abort sibling probes — each outcome is
/// handled locally and converted to absence.
///
/// With `concurrency > 1` the candidates are probed in ascending
/// fixed-size batches and the lowest-suffix responder within the winning
/// batch is returned, so "lowest-numbered responder wins" holds for every
/// concurrency level.
///
/// Exhausting the range (or the sweep timeout) without a match returns
/// `Ok(None)` — a normal outcome, not an error.
///
/// # Errors
///
/// Returns an error only for invalid configuration: a prefix that does not
/// form IPv4 addresses, zero concurrency, or a catalog without a
/// `device_name` attribute.
pub async fn scan(
    client: &dyn SnmpClient,
    catalog: &AttributeCatalog,
    options: &ScanOptions,
) -> Result<Option<DiscoveredPrinter>> {
    let device_name_oid = catalog.common(attr::DEVICE_NAME).ok_or_else(|| {
        QueryError::invalid_config("catalog has no common device_name attribute")
    })?;

    let candidates = options.candidates()?;
    let deadline = options.sweep_timeout.map(|t| Instant::now() + t);

    info!(
        prefix = %options.prefix,
        start = *options.range.start(),
        end = *options.range.end(),
        concurrency = options.concurrency,
        "starting discovery sweep"
    );

    for batch in candidates.chunks(options.concurrency) {
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                warn!("sweep timeout reached, stopping");
                return Ok(None);
            }
        }

        let mut probes: FuturesUnordered<_> = batch
            .iter()
            .enumerate()
            .map(|(slot, &address)| async move {
                let outcome = match client.fetch_scalar(address, device_name_oid).await {
                    Ok(name) if !name.is_empty() => Some(DiscoveredPrinter {
                        address,
                        device_name: name,
                    }),
                    Ok(_) => None,
                    Err(e) => {
                        debug!(%address, error = %e, "probe failed");
                        None
                    }
                };
                (slot, outcome)
            })
            .collect();

        // Probes complete in arbitrary order; track the lowest batch slot
        // that answered so the lowest-numbered responder wins. A deadline
        // that expires mid-batch keeps every probe completed so far and
        // only abandons the ones still in flight.
        let mut best: Option<(usize, DiscoveredPrinter)> = None;
        let mut timed_out = false;
        loop {
            let completed = match deadline {
                Some(deadline) => match timeout_at(deadline, probes.next()).await {
                    Ok(completed) => completed,
                    Err(_) => {
                        timed_out = true;
                        break;
                    }
                },
                None => probes.next().await,
            };
            match completed {
                Some((slot, Some(found))) => {
                    if best.as_ref().is_none_or(|(lowest, _)| slot < *lowest) {
                        best = Some((slot, found));
                    }
                }
                Some((_, None)) => {}
                None => break,
            }
        }

        if let Some((_, found)) = best {
            info!(address = %found.address, device_name = %found.device_name, "device found");
            return Ok(Some(found));
        }
        if timed_out {
            warn!("sweep timeout reached mid-batch, stopping");
            return Ok(None);
        }
    }

    info!("sweep exhausted range without a responder");
    Ok(None)
}
