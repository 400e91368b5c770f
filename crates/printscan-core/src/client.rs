//! Protocol client adapter: single-scalar SNMP queries.
//!
//! [`SnmpClient`] is the seam between the sweep/aggregator logic and the
//! wire protocol. The production implementation, [`UdpSnmpClient`], drives
//! an SNMP v1 session over UDP; tests use [`crate::mock::MockNetwork`]
//! through the same trait.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use snmp2::{AsyncSession, Value};
use tracing::trace;

use printscan_types::{Oid, mib};

use crate::error::{QueryError, Result};

/// Connection settings shared by every query a client issues.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Read-only community string.
    pub community: String,
    /// UDP port the agents listen on.
    pub port: u16,
    /// Per-query timeout. Must be positive.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            community: mib::DEFAULT_COMMUNITY.to_string(),
            port: mib::SNMP_PORT,
            timeout: Duration::from_secs(2),
        }
    }
}

impl ClientConfig {
    /// Create a config with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the community string.
    #[must_use]
    pub fn community(mut self, community: impl Into<String>) -> Self {
        self.community = community.into();
        self
    }

    /// Set the agent UDP port.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the per-query timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(QueryError::invalid_config("per-query timeout must be positive"));
        }
        if self.community.is_empty() {
            return Err(QueryError::invalid_config("community string must not be empty"));
        }
        Ok(())
    }
}

/// A client capable of fetching one scalar attribute from a remote agent.
///
/// # Single-value contract
///
/// Each call issues exactly one request. If the agent returns multiple
/// bindings, only the first is read; the rest are ignored. There are no
/// retries at this layer — wrap a client in
/// [`crate::retry::RetryingClient`] to opt in.
#[async_trait]
pub trait SnmpClient: Send + Sync {
    /// Fetch the value following `oid` in the target's object tree,
    /// rendered as a display string.
    ///
    /// The query is GET-NEXT, not exact-match: the agent answers with the
    /// first object *after* the requested identifier in tree order. For a
    /// column or scalar OID from the catalog this lands on its first
    /// instance. If the target's tree differs from the assumed layout the
    /// answer can be an adjacent, unrelated object — callers treat values
    /// as advisory.
    async fn fetch_scalar(&self, address: Ipv4Addr, oid: &Oid) -> Result<String>;
}

/// Production [`SnmpClient`] speaking SNMP v1 over UDP.
///
/// Protocol version is fixed (v1, matching the devices this tool targets);
/// there is no version negotiation. A fresh session is opened per query
/// since every probe may target a different address.
#[derive(Debug, Clone)]
pub struct UdpSnmpClient {
    config: ClientConfig,
}

impl UdpSnmpClient {
    /// Create a client, validating the configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn query(&self, address: Ipv4Addr, oid: &Oid) -> Result<String> {
        let target = format!("{}:{}", address, self.config.port);

        let mut session = AsyncSession::new_v1(&target, self.config.community.as_bytes(), 0)
            .await
            .map_err(|e| QueryError::session(format!("{e:?}")))?;

        let wire_oid = snmp2::Oid::from(oid.segments())
            .map_err(|e| QueryError::invalid_config(format!("unencodable OID {oid}: {e:?}")))?;

        let response = session
            .getnext(&wire_oid)
            .await
            .map_err(|e| QueryError::session(format!("{e:?}")))?;

        if response.error_status != 0 {
            return Err(QueryError::Protocol {
                status: response.error_status,
                index: response.error_index,
            });
        }

        // Read only the first binding; agents answering a GET-NEXT with
        // more than one are out of contract for this adapter.
        let (answered_oid, value) = response
            .varbinds
            .into_iter()
            .next()
            .ok_or(QueryError::Empty)?;

        trace!(%address, requested = %oid, answered = %answered_oid, "scalar fetched");
        render_value(&value)
    }
}

#[async_trait]
impl SnmpClient for UdpSnmpClient {
    async fn fetch_scalar(&self, address: Ipv4Addr, oid: &Oid) -> Result<String> {
        match tokio::time::timeout(self.config.timeout, self.query(address, oid)).await {
            Ok(result) => result,
            Err(_) => Err(QueryError::timeout(self.config.timeout)),
        }
    }
}

/// Render a decoded SNMP value as a display string.
///
/// Exception values (`noSuchObject` and friends) and NULL map to
/// [`QueryError::Empty`] so callers see them as absence.
fn render_value(value: &Value<'_>) -> Result<String> {
    match value {
        Value::OctetString(bytes) => Ok(String::from_utf8_lossy(bytes).trim().to_string()),
        Value::Integer(n) => Ok(n.to_string()),
        Value::Counter32(n) | Value::Unsigned32(n) | Value::Timeticks(n) => Ok(n.to_string()),
        Value::Counter64(n) => Ok(n.to_string()),
        Value::IpAddress(octets) => Ok(Ipv4Addr::from(*octets).to_string()),
        Value::ObjectIdentifier(oid) => Ok(oid.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Null | Value::EndOfMibView | Value::NoSuchObject | Value::NoSuchInstance => {
            Err(QueryError::Empty)
        }
        other => Ok(format!("{other:?}")),
    }
}
