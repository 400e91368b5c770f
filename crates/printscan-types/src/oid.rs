//! Object identifiers for SNMP queries.
//!
//! An [`Oid`] is an immutable dotted-numeric key into a device's MIB tree,
//! e.g. `1.3.6.1.2.1.1.5` (sysName). Ordering follows the tree: identifiers
//! compare segment by segment, so a column OID sorts immediately before its
//! instances.

use core::fmt;
use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::ParseOidError;

/// A validated dotted-numeric object identifier.
///
/// Construct from a string with [`FromStr`] or from numeric segments with
/// [`Oid::from_segments`]. The value is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    text: String,
    segments: Vec<u64>,
}

impl Oid {
    /// Build an identifier from its numeric segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use printscan_types::Oid;
    ///
    /// let oid = Oid::from_segments(&[1, 3, 6, 1, 2, 1, 1, 5]);
    /// assert_eq!(oid.to_string(), "1.3.6.1.2.1.1.5");
    /// ```
    #[must_use]
    pub fn from_segments(segments: &[u64]) -> Self {
        let text = segments
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(".");
        Self {
            text,
            segments: segments.to_vec(),
        }
    }

    /// The numeric segments, in order.
    #[must_use]
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    /// The dotted-numeric form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// A child identifier one level below this one.
    ///
    /// Useful for addressing a specific instance under a column OID:
    /// `sysName.child(0)` is `sysName.0`.
    #[must_use]
    pub fn child(&self, arc: u64) -> Self {
        let mut segments = self.segments.clone();
        segments.push(arc);
        Self::from_segments(&segments)
    }

    /// Whether `self` is a prefix of `other` (or equal to it).
    #[must_use]
    pub fn contains(&self, other: &Oid) -> bool {
        other.segments.starts_with(&self.segments)
    }
}

impl FromStr for Oid {
    type Err = ParseOidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseOidError::Empty);
        }

        let segments = trimmed
            .split('.')
            .map(|part| {
                if part.is_empty() {
                    return Err(ParseOidError::EmptySegment {
                        input: trimmed.to_string(),
                    });
                }
                part.parse::<u64>()
                    .map_err(|_| ParseOidError::InvalidSegment {
                        input: trimmed.to_string(),
                        segment: part.to_string(),
                    })
            })
            .collect::<Result<Vec<u64>, _>>()?;

        Ok(Self::from_segments(&segments))
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// Tree order: compare numeric segments, not the string form
// ("1.3.10" sorts after "1.3.9").
impl Ord for Oid {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments.cmp(&other.segments)
    }
}

impl PartialOrd for Oid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Oid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Oid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Well-known object identifiers and protocol defaults used by the
/// attribute catalog.
pub mod mib {
    /// sysName (MIB-II system group). A GET-NEXT on this column yields the
    /// device's administratively assigned name.
    pub const SYS_NAME: &[u64] = &[1, 3, 6, 1, 2, 1, 1, 5];

    /// hrPrinterStatus (Host Resources MIB printer table).
    pub const HR_PRINTER_STATUS: &[u64] = &[1, 3, 6, 1, 2, 1, 25, 3, 5, 1, 1];

    /// hrPrinterDetectedErrorState, reported by Konica Minolta devices as
    /// the toner condition.
    pub const HR_PRINTER_DETECTED_ERROR_STATE: &[u64] = &[1, 3, 6, 1, 2, 1, 25, 3, 5, 1, 2];

    /// hrDeviceDescr, carries the model string on HP devices.
    pub const HR_DEVICE_DESCR: &[u64] = &[1, 3, 6, 1, 2, 1, 25, 3, 2, 1, 3];

    /// ipAdEntAddr (MIB-II IP address table), the address the device
    /// reports for itself.
    pub const IP_AD_ENT_ADDR: &[u64] = &[1, 3, 6, 1, 2, 1, 4, 20, 1, 1];

    /// Standard SNMP agent UDP port.
    pub const SNMP_PORT: u16 = 161;

    /// Conventional read-only community string.
    pub const DEFAULT_COMMUNITY: &str = "public";
}
