//! SNMP printer discovery and attribute collection.
//!
//! This crate finds network printers by sweeping a subnet for devices that
//! answer a device-name query, then collects common and brand-specific
//! attributes from the catalog of known object identifiers.
//!
//! # Features
//!
//! - **Discovery sweep**: probe a host suffix range, first responder wins
//! - **Bounded concurrency**: batched probing with a deterministic
//!   lowest-address tie-break
//! - **Attribute aggregation**: status, reported address, and per-brand
//!   attributes with explicit absence for unanswered fields
//! - **Testable seam**: the [`SnmpClient`] trait with a [`MockNetwork`]
//!   implementation for offline tests
//!
//! # Quick Start
//!
//! ```no_run
//! use printscan_core::{ClientConfig, ScanOptions, UdpSnmpClient, gather_info, scan};
//! use printscan_types::AttributeCatalog;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = UdpSnmpClient::new(ClientConfig::default())?;
//!     let catalog = AttributeCatalog::default();
//!
//!     let options = ScanOptions::new("192.168.1.").concurrency(16);
//!     if let Some(printer) = scan(&client, &catalog, &options).await? {
//!         println!("found {} at {}", printer.device_name, printer.address);
//!         let info = gather_info(&client, &catalog, printer.address).await;
//!         println!("status: {:?}", info.status);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod info;
pub mod mock;
pub mod retry;
pub mod scan;

pub use client::{ClientConfig, SnmpClient, UdpSnmpClient};
pub use error::{QueryError, Result, UnreachableReason};
pub use info::{gather_brand_info, gather_info};
pub use mock::MockNetwork;
pub use retry::{RetryConfig, RetryingClient, with_retry};
pub use scan::{ScanOptions, scan};

// Re-export the shared types callers need alongside this crate.
pub use printscan_types::{
    AttributeCatalog, BrandInfo, DiscoveredPrinter, Oid, PrinterInfo, attr, mib,
};
