//! Mock network implementation for testing.
//!
//! [`MockNetwork`] implements [`SnmpClient`] without touching a socket,
//! allowing sweeps and aggregation to run against simulated agents.
//!
//! # Features
//!
//! - Real GET-NEXT semantics over each agent's ordered object tree
//! - Failure injection: silent (unreachable) agents, protocol errors
//! - Latency simulation for timeout and cancellation tests
//! - A probe counter so tests can assert a sweep stopped early

use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use std::ops::Bound;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use printscan_types::Oid;

use crate::client::SnmpClient;
use crate::error::{QueryError, Result};

#[derive(Debug, Default)]
struct MockAgent {
    /// Object tree in OID order; GET-NEXT walks this map.
    values: BTreeMap<Vec<u64>, String>,
    /// Drop every probe instead of answering.
    unreachable: bool,
    /// Answer every probe with this error-status/error-index.
    protocol_error: Option<(u32, u32)>,
}

/// A simulated subnet of SNMP agents.
///
/// Addresses with no registered agent behave like silent hosts: probes
/// time out. Registered agents answer GET-NEXT queries from their object
/// tree exactly like a real agent would.
///
/// # Example
///
/// ```
/// use std::net::Ipv4Addr;
/// use printscan_core::{MockNetwork, SnmpClient};
/// use printscan_types::{Oid, mib};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let network = MockNetwork::new();
/// let sys_name = Oid::from_segments(mib::SYS_NAME);
/// let addr = Ipv4Addr::new(192, 168, 1, 42);
/// network.insert_value(addr, &sys_name.child(0), "Printer1").await;
///
/// let value = network.fetch_scalar(addr, &sys_name).await.unwrap();
/// assert_eq!(value, "Printer1");
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MockNetwork {
    agents: RwLock<BTreeMap<Ipv4Addr, MockAgent>>,
    /// Simulated per-probe latency in milliseconds (0 = no delay).
    latency_ms: AtomicU64,
    /// Total probes issued, including ones that failed.
    probes: AtomicU64,
}

impl MockNetwork {
    /// Create an empty network with no agents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` at exactly `oid` on the agent at `address`,
    /// creating the agent if needed.
    ///
    /// Remember that queries are GET-NEXT: to make a catalog column OID
    /// resolve, register the value at an instance below it (see
    /// [`Oid::child`]).
    pub async fn insert_value(&self, address: Ipv4Addr, oid: &Oid, value: impl Into<String>) {
        let mut agents = self.agents.write().await;
        agents
            .entry(address)
            .or_default()
            .values
            .insert(oid.segments().to_vec(), value.into());
    }

    /// Make the agent at `address` drop all probes.
    pub async fn set_unreachable(&self, address: Ipv4Addr) {
        let mut agents = self.agents.write().await;
        agents.entry(address).or_default().unreachable = true;
    }

    /// Make the agent at `address` answer every probe with a protocol
    /// error.
    pub async fn set_protocol_error(&self, address: Ipv4Addr, status: u32, index: u32) {
        let mut agents = self.agents.write().await;
        agents.entry(address).or_default().protocol_error = Some((status, index));
    }

    /// Simulate per-probe latency.
    pub fn set_latency(&self, latency: Duration) {
        let millis = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self.latency_ms.store(millis, Ordering::Relaxed);
    }

    /// Number of probes issued so far.
    #[must_use]
    pub fn probe_count(&self) -> u64 {
        self.probes.load(Ordering::Relaxed)
    }
}

/// Timeout reported for probes against silent or absent agents.
const SILENT_HOST_TIMEOUT: Duration = Duration::from_secs(2);

#[async_trait]
impl SnmpClient for MockNetwork {
    async fn fetch_scalar(&self, address: Ipv4Addr, oid: &Oid) -> Result<String> {
        self.probes.fetch_add(1, Ordering::Relaxed);

        let latency = self.latency_ms.load(Ordering::Relaxed);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }

        let agents = self.agents.read().await;
        let agent = agents
            .get(&address)
            .ok_or_else(|| QueryError::timeout(SILENT_HOST_TIMEOUT))?;

        if agent.unreachable {
            return Err(QueryError::timeout(SILENT_HOST_TIMEOUT));
        }
        if let Some((status, index)) = agent.protocol_error {
            return Err(QueryError::Protocol { status, index });
        }

        // GET-NEXT: the first object strictly after the requested OID in
        // tree order.
        agent
            .values
            .range((Bound::Excluded(oid.segments().to_vec()), Bound::Unbounded))
            .next()
            .map(|(_, value)| value.clone())
            .ok_or(QueryError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use printscan_types::mib;

    fn addr(suffix: u8) -> Ipv4Addr {
        Ipv4Addr::new(192, 168, 1, suffix)
    }

    #[tokio::test]
    async fn test_getnext_returns_first_instance() {
        let network = MockNetwork::new();
        let status = Oid::from_segments(mib::HR_PRINTER_STATUS);
        network.insert_value(addr(5), &status.child(1), "idle(3)").await;

        let value = network.fetch_scalar(addr(5), &status).await.unwrap();
        assert_eq!(value, "idle(3)");
    }

    #[tokio::test]
    async fn test_getnext_skips_exact_match() {
        let network = MockNetwork::new();
        let column = Oid::from_segments(&[1, 3, 6, 1]);
        network.insert_value(addr(5), &column, "exact").await;
        network.insert_value(addr(5), &column.child(0), "next").await;

        // The exact key is never returned; GET-NEXT moves past it.
        let value = network.fetch_scalar(addr(5), &column).await.unwrap();
        assert_eq!(value, "next");
    }

    #[tokio::test]
    async fn test_silent_host_is_unreachable() {
        let network = MockNetwork::new();
        let oid = Oid::from_segments(mib::SYS_NAME);

        let err = network.fetch_scalar(addr(9), &oid).await.unwrap_err();
        assert!(matches!(err, QueryError::Unreachable(_)));
    }

    #[tokio::test]
    async fn test_unreachable_flag() {
        let network = MockNetwork::new();
        let oid = Oid::from_segments(mib::SYS_NAME);
        network.insert_value(addr(9), &oid.child(0), "Ghost").await;
        network.set_unreachable(addr(9)).await;

        let err = network.fetch_scalar(addr(9), &oid).await.unwrap_err();
        assert!(matches!(err, QueryError::Unreachable(_)));
    }

    #[tokio::test]
    async fn test_protocol_error_injection() {
        let network = MockNetwork::new();
        let oid = Oid::from_segments(mib::SYS_NAME);
        network.set_protocol_error(addr(3), 2, 1).await;

        let err = network.fetch_scalar(addr(3), &oid).await.unwrap_err();
        assert!(matches!(err, QueryError::Protocol { status: 2, index: 1 }));
    }

    #[tokio::test]
    async fn test_agent_without_successor_is_empty() {
        let network = MockNetwork::new();
        let oid = Oid::from_segments(mib::SYS_NAME);
        // Agent exists but its tree ends before the requested OID.
        network
            .insert_value(addr(4), &Oid::from_segments(&[1, 2]), "early")
            .await;

        let err = network.fetch_scalar(addr(4), &oid).await.unwrap_err();
        assert!(matches!(err, QueryError::Empty));
    }

    #[tokio::test]
    async fn test_latency_delays_probes() {
        let network = MockNetwork::new();
        let sys_name = Oid::from_segments(mib::SYS_NAME);
        network.insert_value(addr(5), &sys_name.child(0), "Printer1").await;
        network.set_latency(Duration::from_millis(10));

        let start = tokio::time::Instant::now();
        let value = network.fetch_scalar(addr(5), &sys_name).await.unwrap();
        assert_eq!(value, "Printer1");
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[tokio::test]
    async fn test_probe_counter() {
        let network = MockNetwork::new();
        let oid = Oid::from_segments(mib::SYS_NAME);
        assert_eq!(network.probe_count(), 0);

        let _ = network.fetch_scalar(addr(1), &oid).await;
        let _ = network.fetch_scalar(addr(2), &oid).await;
        assert_eq!(network.probe_count(), 2);
    }
}
