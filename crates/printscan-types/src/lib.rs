//! Shared types for printscan SNMP printer discovery.
//!
//! This crate provides the plain data types used by both the core library
//! (printscan-core) and its callers:
//!
//! - [`Oid`] — validated dotted-numeric object identifiers
//! - [`AttributeCatalog`] — the static attribute-name → OID mapping
//! - [`PrinterInfo`] / [`DiscoveredPrinter`] — result records
//! - [`ParseOidError`] — identifier parsing failures
//!
//! # Example
//!
//! ```
//! use printscan_types::{AttributeCatalog, Oid};
//!
//! let catalog = AttributeCatalog::default();
//! let oid: &Oid = catalog.common("device_name").unwrap();
//! assert_eq!(oid.to_string(), "1.3.6.1.2.1.1.5");
//! ```

pub mod catalog;
pub mod error;
pub mod oid;
pub mod types;

pub use catalog::{AttributeCatalog, COMMON_NAMESPACE, attr};
pub use error::{ParseOidError, ParseResult};
pub use oid::{Oid, mib};
pub use types::{BrandInfo, DiscoveredPrinter, PrinterInfo};
