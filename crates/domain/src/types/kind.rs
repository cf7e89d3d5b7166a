//! The closed set of remote object categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CrmError;

/// One of the five remote CRM object categories.
///
/// The façade-facing string values (`companies`, `contacts`, `deals`,
/// `products`, `line-items`) differ from the remote endpoint path segment
/// for line items (`line_items`); [`ObjectKind::path_segment`] returns the
/// latter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectKind {
    Companies,
    Contacts,
    Deals,
    Products,
    LineItems,
}

impl ObjectKind {
    /// All kinds, in declaration order.
    pub const ALL: [ObjectKind; 5] = [
        ObjectKind::Companies,
        ObjectKind::Contacts,
        ObjectKind::Deals,
        ObjectKind::Products,
        ObjectKind::LineItems,
    ];

    /// The façade-facing string value for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Companies => "companies",
            Self::Contacts => "contacts",
            Self::Deals => "deals",
            Self::Products => "products",
            Self::LineItems => "line-items",
        }
    }

    /// The path segment used in remote `/crm/v3/...` endpoints.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Companies => "companies",
            Self::Contacts => "contacts",
            Self::Deals => "deals",
            Self::Products => "products",
            Self::LineItems => "line_items",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = CrmError;

    /// Parse a façade-facing kind string, case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| CrmError::InvalidArgument(format!("unsupported object kind: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_known_kind_strings() {
        for kind in ObjectKind::ALL {
            assert_eq!(kind.as_str().parse::<ObjectKind>().unwrap(), kind);
        }
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("Line-Items".parse::<ObjectKind>().unwrap(), ObjectKind::LineItems);
        assert_eq!("CONTACTS".parse::<ObjectKind>().unwrap(), ObjectKind::Contacts);
    }

    #[test]
    fn unknown_kind_is_invalid_argument() {
        let err = "tickets".parse::<ObjectKind>().unwrap_err();
        assert!(matches!(err, CrmError::InvalidArgument(_)));
    }

    #[test]
    fn line_items_path_segment_differs_from_kind_string() {
        assert_eq!(ObjectKind::LineItems.as_str(), "line-items");
        assert_eq!(ObjectKind::LineItems.path_segment(), "line_items");
    }

    #[test]
    fn serde_uses_kebab_case_values() {
        let json = serde_json::to_string(&ObjectKind::LineItems).unwrap();
        assert_eq!(json, "\"line-items\"");
        let kind: ObjectKind = serde_json::from_str("\"deals\"").unwrap();
        assert_eq!(kind, ObjectKind::Deals);
    }
}
