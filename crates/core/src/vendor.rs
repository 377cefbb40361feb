//! Vendor categories.
//!
//! The category drives content generation (prompt wording and the fallback
//! template). It is stored as lowercase text in `users.vendor_type`.

use serde::{Deserialize, Serialize};

pub const VENDOR_PHOTOGRAPHER: &str = "photographer";
pub const VENDOR_CATERER: &str = "caterer";
pub const VENDOR_FLORIST: &str = "florist";

/// All valid vendor type names, in seed order.
pub const VALID_VENDOR_TYPES: &[&str] = &[VENDOR_PHOTOGRAPHER, VENDOR_CATERER, VENDOR_FLORIST];

/// Closed set of vendor categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorType {
    Photographer,
    Caterer,
    Florist,
}

impl VendorType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Photographer => VENDOR_PHOTOGRAPHER,
            Self::Caterer => VENDOR_CATERER,
            Self::Florist => VENDOR_FLORIST,
        }
    }

    /// Parse a stored vendor type name. Returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            VENDOR_PHOTOGRAPHER => Some(Self::Photographer),
            VENDOR_CATERER => Some(Self::Caterer),
            VENDOR_FLORIST => Some(Self::Florist),
            _ => None,
        }
    }
}

impl std::fmt::Display for VendorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_valid_name_parses_back() {
        for name in VALID_VENDOR_TYPES {
            let parsed = VendorType::parse(name).expect("known vendor type");
            assert_eq!(parsed.as_str(), *name);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(VendorType::parse("baker"), None);
        assert_eq!(VendorType::parse("Photographer"), None);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&VendorType::Florist).unwrap();
        assert_eq!(json, "\"florist\"");
    }
}
