//! Result records produced by discovery and aggregation.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A printer found by the discovery sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiscoveredPrinter {
    /// The address that answered the device-name probe.
    pub address: Ipv4Addr,
    /// The device name the printer reported.
    pub device_name: String,
}

/// Aggregated common attributes for a discovered printer.
///
/// Built once per successful discovery and immutable afterwards; not
/// persisted anywhere. Fields the device did not answer for are an explicit
/// `None` rather than an error — a partially answered record is still a
/// complete record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrinterInfo {
    /// The address the record was gathered from.
    pub address: Ipv4Addr,
    /// Printer status as reported by the device, if it answered.
    pub status: Option<String>,
    /// The address the device reports for itself, if it answered.
    /// May legitimately differ from `address` on multi-homed devices.
    pub reported_address: Option<String>,
}

/// Brand-specific attribute values, keyed by attribute name.
///
/// Absent fields stay in the map as `None` so callers can tell "the device
/// did not answer" apart from "the attribute is not registered".
pub type BrandInfo = BTreeMap<String, Option<String>>;
