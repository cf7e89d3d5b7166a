//! The generic record envelope and pagination types.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A mapping from property name to its dynamically-typed value.
pub type PropertyMap = HashMap<String, Value>;

/// One remote CRM object of any kind.
///
/// Per-kind views (contact, deal, ...) are read-only projections over the
/// same `properties` map; there is no per-kind storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmRecord {
    /// Opaque remote identifier.
    pub id: String,
    /// Property name → value. May be empty; the remote system is
    /// authoritative for which keys exist.
    #[serde(default)]
    pub properties: PropertyMap,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived: bool,
}

impl CrmRecord {
    /// Convenience accessor: the property value rendered as a string, if
    /// present and textual.
    pub fn property_str(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(Value::as_str)
    }
}

/// One page of a remote collection endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

impl<T> Page<T> {
    /// The opaque continuation cursor, if the remote reported another page.
    pub fn next_cursor(&self) -> Option<&str> {
        self.paging.as_ref().and_then(|p| p.next.as_ref()).map(|n| n.after.as_str())
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { results: Vec::new(), paging: None }
    }
}

/// Pagination envelope: `{"paging": {"next": {"after": ..., "link": ...}}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub next: Option<NextPage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextPage {
    /// Opaque cursor identifying the start of the next page. Passed back
    /// verbatim, never interpreted locally.
    pub after: String,
    #[serde(default)]
    pub link: Option<String>,
}

/// A lightweight reference returned by the remote association endpoints.
///
/// Intentionally not a full record: the association API only returns the
/// child id plus minimal metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssociationRef {
    pub id: String,
    #[serde(default, rename = "type")]
    pub association_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_collection_envelope_with_cursor() {
        let json = r#"{
            "results": [
                {"id": "1", "properties": {"name": "Acme"}, "createdAt": "2024-01-02T03:04:05.678Z", "updatedAt": "2024-01-03T00:00:00Z", "archived": false}
            ],
            "paging": {"next": {"after": "p2", "link": "https://example.test/next"}}
        }"#;
        let page: Page<CrmRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].property_str("name"), Some("Acme"));
        assert_eq!(page.next_cursor(), Some("p2"));
    }

    #[test]
    fn last_page_omits_cursor() {
        let page: Page<CrmRecord> = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.next_cursor(), None);
    }

    #[test]
    fn record_tolerates_unknown_fields_and_missing_timestamps() {
        let json = r#"{"id": "42", "properties": {}, "somethingNew": true}"#;
        let record: CrmRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "42");
        assert!(record.created_at.is_none());
        assert!(!record.archived);
    }

    #[test]
    fn association_refs_are_id_plus_type() {
        let json = r#"{"results": [{"id": "7", "type": "contact_to_deal"}]}"#;
        let page: Page<AssociationRef> = serde_json::from_str(json).unwrap();
        assert_eq!(page.results[0].id, "7");
        assert_eq!(page.results[0].association_type.as_deref(), Some("contact_to_deal"));
    }
}
