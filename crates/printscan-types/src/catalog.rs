//! Static mapping from attribute names to object identifiers.
//!
//! The catalog is built once at startup and read-only afterwards. It holds a
//! `common` namespace shared by every printer plus per-brand namespaces for
//! vendor-specific attributes. Lookups never fail with an error; unknown
//! namespaces or attributes simply resolve to `None`.

use std::collections::BTreeMap;

use crate::oid::{Oid, mib};

/// Well-known attribute names registered in the default catalog.
pub mod attr {
    /// Printer status (common namespace).
    pub const STATUS: &str = "status";
    /// The address the device reports for itself (common namespace).
    pub const IP_ADDRESS: &str = "ip_address";
    /// Administratively assigned device name (common namespace).
    pub const DEVICE_NAME: &str = "device_name";
    /// Model string (HP namespace).
    pub const MODEL: &str = "model";
    /// Toner condition (Konica Minolta namespace).
    pub const TONER_LEVEL: &str = "toner_level";
}

/// Namespace name reserved for attributes shared by every brand.
pub const COMMON_NAMESPACE: &str = "common";

/// Immutable attribute-name to object-identifier catalog.
///
/// [`AttributeCatalog::default`] registers the fixed entries every sweep and
/// aggregation relies on; extra entries can be added at construction time
/// with the `with_*` builders. There is no dynamic discovery of available
/// OIDs.
///
/// # Example
///
/// ```
/// use printscan_types::{AttributeCatalog, catalog::attr};
///
/// let catalog = AttributeCatalog::default();
/// assert!(catalog.common(attr::DEVICE_NAME).is_some());
/// assert!(catalog.resolve("HP", attr::MODEL).is_some());
/// assert!(catalog.resolve("UnknownBrand", attr::MODEL).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct AttributeCatalog {
    common: BTreeMap<String, Oid>,
    brands: BTreeMap<String, BTreeMap<String, Oid>>,
}

impl Default for AttributeCatalog {
    fn default() -> Self {
        Self::empty()
            .with_common_attribute(attr::STATUS, Oid::from_segments(mib::HR_PRINTER_STATUS))
            .with_common_attribute(attr::IP_ADDRESS, Oid::from_segments(mib::IP_AD_ENT_ADDR))
            .with_common_attribute(attr::DEVICE_NAME, Oid::from_segments(mib::SYS_NAME))
            .with_brand_attribute("HP", attr::MODEL, Oid::from_segments(mib::HR_DEVICE_DESCR))
            .with_brand_attribute(
                "Konica Minolta",
                attr::TONER_LEVEL,
                Oid::from_segments(mib::HR_PRINTER_DETECTED_ERROR_STATE),
            )
    }
}

impl AttributeCatalog {
    /// A catalog with no entries. Prefer [`AttributeCatalog::default`]
    /// unless every entry is supplied explicitly.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            common: BTreeMap::new(),
            brands: BTreeMap::new(),
        }
    }

    /// Register an attribute in the common namespace.
    #[must_use]
    pub fn with_common_attribute(mut self, name: &str, oid: Oid) -> Self {
        self.common.insert(name.to_string(), oid);
        self
    }

    /// Register an attribute under a brand namespace, creating the
    /// namespace if needed.
    #[must_use]
    pub fn with_brand_attribute(mut self, brand: &str, name: &str, oid: Oid) -> Self {
        self.brands
            .entry(brand.to_string())
            .or_default()
            .insert(name.to_string(), oid);
        self
    }

    /// Resolve an attribute in either the [`COMMON_NAMESPACE`] or a brand
    /// namespace. Unknown keys return `None`, never an error.
    #[must_use]
    pub fn resolve(&self, namespace: &str, attribute: &str) -> Option<&Oid> {
        if namespace == COMMON_NAMESPACE {
            self.common.get(attribute)
        } else {
            self.brands.get(namespace)?.get(attribute)
        }
    }

    /// Resolve an attribute in the common namespace.
    #[must_use]
    pub fn common(&self, attribute: &str) -> Option<&Oid> {
        self.common.get(attribute)
    }

    /// All attributes registered under a brand, in name order.
    /// `None` if the brand is unknown.
    #[must_use]
    pub fn brand_attributes(&self, brand: &str) -> Option<&BTreeMap<String, Oid>> {
        self.brands.get(brand)
    }

    /// Names of the registered brand namespaces.
    pub fn brands(&self) -> impl Iterator<Item = &str> {
        self.brands.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_common_entries() {
        let catalog = AttributeCatalog::default();

        let status = catalog.resolve(COMMON_NAMESPACE, attr::STATUS).unwrap();
        assert_eq!(status.to_string(), "1.3.6.1.2.1.25.3.5.1.1");

        let name = catalog.common(attr::DEVICE_NAME).unwrap();
        assert_eq!(name.to_string(), "1.3.6.1.2.1.1.5");

        let ip = catalog.common(attr::IP_ADDRESS).unwrap();
        assert_eq!(ip.to_string(), "1.3.6.1.2.1.4.20.1.1");
    }

    #[test]
    fn test_default_brand_entries() {
        let catalog = AttributeCatalog::default();

        assert!(catalog.resolve("HP", attr::MODEL).is_some());
        assert!(catalog.resolve("Konica Minolta", attr::TONER_LEVEL).is_some());

        let brands: Vec<&str> = catalog.brands().collect();
        assert_eq!(brands, vec!["HP", "Konica Minolta"]);
    }

    #[test]
    fn test_unknown_keys_resolve_to_none() {
        let catalog = AttributeCatalog::default();

        assert!(catalog.resolve("UnknownBrand", attr::MODEL).is_none());
        assert!(catalog.resolve(COMMON_NAMESPACE, "serial_number").is_none());
        assert!(catalog.resolve("HP", attr::TONER_LEVEL).is_none());
        assert!(catalog.brand_attributes("UnknownBrand").is_none());
    }

    #[test]
    fn test_extension_does_not_disturb_defaults() {
        let custom = Oid::from_segments(&[1, 3, 6, 1, 4, 1, 11, 2, 3]);
        let catalog = AttributeCatalog::default()
            .with_brand_attribute("HP", "page_count", custom.clone());

        assert_eq!(catalog.resolve("HP", "page_count"), Some(&custom));
        assert!(catalog.resolve("HP", attr::MODEL).is_some());
    }
}
