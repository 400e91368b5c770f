//! Integration tests for printscan-core.
//!
//! These run entirely against the mock network; no SNMP agents are
//! required. The scenarios mirror how the CLI drives the library: sweep a
//! subnet, then aggregate common and brand attributes for the responder.

use std::net::Ipv4Addr;
use std::time::Duration;

use printscan_core::{MockNetwork, QueryError, ScanOptions, SnmpClient};
use printscan_core::{gather_brand_info, gather_info, scan};
use printscan_types::{AttributeCatalog, Oid, attr, mib};

const PRINTER: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 42);

/// A network with one fully populated printer at .42 and silence elsewhere.
async fn subnet_with_printer() -> MockNetwork {
    let network = MockNetwork::new();
    network
        .insert_value(PRINTER, &Oid::from_segments(mib::SYS_NAME).child(0), "Printer1")
        .await;
    network
        .insert_value(
            PRINTER,
            &Oid::from_segments(mib::HR_PRINTER_STATUS).child(1),
            "idle(3)",
        )
        .await;
    network
        .insert_value(
            PRINTER,
            &Oid::from_segments(mib::HR_DEVICE_DESCR).child(1),
            "LaserJet 4250",
        )
        .await;
    network
}

#[tokio::test]
async fn discover_then_aggregate() {
    let network = subnet_with_printer().await;
    let catalog = AttributeCatalog::default();
    let options = ScanOptions::new("192.168.1.");

    // Sweep: .42 is the only responder in 1..=254.
    let printer = scan(&network, &catalog, &options)
        .await
        .unwrap()
        .expect("sweep should find the printer");
    assert_eq!(printer.address, PRINTER);
    assert_eq!(printer.device_name, "Printer1");

    // Common attributes: the mock implements status but not ipAdEntAddr,
    // so the record carries an explicit absence.
    let info = gather_info(&network, &catalog, printer.address).await;
    assert_eq!(info.address, PRINTER);
    assert_eq!(info.status.as_deref(), Some("idle(3)"));
    assert!(info.reported_address.is_none());

    // Brand attributes for HP.
    let hp = gather_brand_info(&network, &catalog, printer.address, "HP").await;
    assert_eq!(hp.get(attr::MODEL).unwrap().as_deref(), Some("LaserJet 4250"));

    // Unknown brands yield an empty mapping, not an error.
    let unknown = gather_brand_info(&network, &catalog, printer.address, "UnknownBrand").await;
    assert!(unknown.is_empty());
}

#[tokio::test]
async fn sweep_is_deterministic_under_concurrency() {
    let network = subnet_with_printer().await;
    // A second printer higher in the range must never win.
    network
        .insert_value(
            Ipv4Addr::new(192, 168, 1, 200),
            &Oid::from_segments(mib::SYS_NAME).child(0),
            "Printer2",
        )
        .await;
    let catalog = AttributeCatalog::default();

    for concurrency in [1, 16, 64] {
        let options = ScanOptions::new("192.168.1.").concurrency(concurrency);
        let found = scan(&network, &catalog, &options).await.unwrap().unwrap();
        assert_eq!(found.address, PRINTER, "concurrency {concurrency}");
    }
}

#[tokio::test]
async fn fetch_scalar_against_silent_host_is_unreachable() {
    let network = MockNetwork::new();
    let oid = Oid::from_segments(mib::SYS_NAME);

    let err = network
        .fetch_scalar(Ipv4Addr::new(192, 168, 1, 9), &oid)
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::Unreachable(_)));
}

#[tokio::test]
async fn empty_subnet_sweep_is_a_normal_outcome() {
    let network = MockNetwork::new();
    let catalog = AttributeCatalog::default();
    let options = ScanOptions::new("10.0.0.")
        .range(1..=50)
        .sweep_timeout(Duration::from_secs(5));

    let found = scan(&network, &catalog, &options).await.unwrap();
    assert!(found.is_none());
}
