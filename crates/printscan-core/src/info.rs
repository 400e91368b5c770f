//! Attribute aggregation for a discovered printer.
//!
//! Issues a small fixed batch of catalog queries against one address and
//! assembles the answers into result records. Aggregation never fails:
//! every query error is absorbed into an explicit absent field.

use std::net::Ipv4Addr;

use tracing::debug;

use printscan_types::{AttributeCatalog, BrandInfo, Oid, PrinterInfo, attr};

use crate::client::SnmpClient;

/// Gather the common attribute record for a printer.
///
/// Queries `status` and `ip_address` from the common namespace. A query
/// that fails or comes back empty becomes `None` in the record rather than
/// aborting the whole aggregation. Call this only for an address the sweep
/// has already confirmed (a non-empty device-name response).
pub async fn gather_info(
    client: &dyn SnmpClient,
    catalog: &AttributeCatalog,
    address: Ipv4Addr,
) -> PrinterInfo {
    let status = fetch_optional(client, address, attr::STATUS, catalog.common(attr::STATUS)).await;
    let reported_address = fetch_optional(
        client,
        address,
        attr::IP_ADDRESS,
        catalog.common(attr::IP_ADDRESS),
    )
    .await;

    PrinterInfo {
        address,
        status,
        reported_address,
    }
}

/// Gather one brand's attributes for a printer.
///
/// An unknown brand yields an empty map, never an error. For a known brand
/// every registered attribute appears in the map, with `None` for queries
/// the device did not answer.
pub async fn gather_brand_info(
    client: &dyn SnmpClient,
    catalog: &AttributeCatalog,
    address: Ipv4Addr,
    brand: &str,
) -> BrandInfo {
    let Some(attributes) = catalog.brand_attributes(brand) else {
        debug!(brand, "brand not registered in catalog");
        return BrandInfo::new();
    };

    let mut info = BrandInfo::new();
    for (name, oid) in attributes {
        let value = fetch_optional(client, address, name, Some(oid)).await;
        info.insert(name.clone(), value);
    }
    info
}

/// One query, folded to absence on any failure or empty answer.
async fn fetch_optional(
    client: &dyn SnmpClient,
    address: Ipv4Addr,
    attribute: &str,
    oid: Option<&Oid>,
) -> Option<String> {
    let oid = oid?;
    match client.fetch_scalar(address, oid).await {
        Ok(value) if !value.is_empty() => Some(value),
        Ok(_) => None,
        Err(e) => {
            debug!(%address, attribute, error = %e, "attribute query failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockNetwork;
    use printscan_types::mib;

    const PRINTER: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 42);

    async fn populated_network() -> MockNetwork {
        let network = MockNetwork::new();
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
                &Oid::from_segments(mib::IP_AD_ENT_ADDR).child(1),
                "192.168.1.42",
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
    async fn test_gather_info_full_record() {
        let network = populated_network().await;
        let catalog = AttributeCatalog::default();

        let info = gather_info(&network, &catalog, PRINTER).await;
        assert_eq!(info.address, PRINTER);
        assert_eq!(info.status.as_deref(), Some("idle(3)"));
        assert_eq!(info.reported_address.as_deref(), Some("192.168.1.42"));
    }

    #[tokio::test]
    async fn test_gather_info_missing_fields_are_none() {
        // Agent only implements the status OID.
        let network = MockNetwork::new();
        network
            .insert_value(
                PRINTER,
                &Oid::from_segments(mib::HR_PRINTER_STATUS).child(1),
                "idle(3)",
            )
            .await;
        let catalog = AttributeCatalog::default();

        let info = gather_info(&network, &catalog, PRINTER).await;
        assert_eq!(info.status.as_deref(), Some("idle(3)"));
        assert!(info.reported_address.is_none());
    }

    #[tokio::test]
    async fn test_gather_info_never_fails_on_silent_host() {
        let network = MockNetwork::new();
        let catalog = AttributeCatalog::default();

        let info = gather_info(&network, &catalog, PRINTER).await;
        assert!(info.status.is_none());
        assert!(info.reported_address.is_none());
    }

    #[tokio::test]
    async fn test_gather_brand_info_known_brand() {
        let network = populated_network().await;
        let catalog = AttributeCatalog::default();

        let info = gather_brand_info(&network, &catalog, PRINTER, "HP").await;
        assert_eq!(info.len(), 1);
        assert_eq!(
            info.get(attr::MODEL).unwrap().as_deref(),
            Some("LaserJet 4250")
        );
    }

    #[tokio::test]
    async fn test_gather_brand_info_unknown_brand_is_empty() {
        let network = populated_network().await;
        let catalog = AttributeCatalog::default();

        let info = gather_brand_info(&network, &catalog, PRINTER, "UnknownBrand").await;
        assert!(info.is_empty());
    }

    #[tokio::test]
    async fn test_gather_brand_info_preserves_absence_per_field() {
        // Konica Minolta attributes registered, device answers nothing.
        let network = MockNetwork::new();
        let catalog = AttributeCatalog::default();

        let info = gather_brand_info(&network, &catalog, PRINTER, "Konica Minolta").await;
        assert_eq!(info.len(), 1);
        assert!(info.get(attr::TONER_LEVEL).unwrap().is_none());
    }
}
