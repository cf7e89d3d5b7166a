//! Request shapes for the collection and search endpoints.

use serde::Serialize;
use serde_json::Value;

/// Parameters of a collection read (`limit`, optional cursor, projection).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: u32,
    /// Opaque continuation cursor from a previous page, passed back verbatim.
    pub after: Option<String>,
    /// Property names to request. Empty means "remote defaults".
    pub properties: Vec<String>,
}

impl ListQuery {
    pub fn new(limit: u32) -> Self {
        Self { limit, after: None, properties: Vec::new() }
    }

    pub fn with_after(mut self, after: Option<String>) -> Self {
        self.after = after;
        self
    }

    pub fn with_properties(mut self, properties: Vec<String>) -> Self {
        self.properties = properties;
        self
    }
}

/// Body of a `/search` call.
///
/// `filter_groups` follows the remote filter grammar (filters within a group
/// are ANDed, groups are ORed) and is passed through without local
/// validation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub filter_groups: Value,
    pub properties: Vec<String>,
    pub limit: u32,
}
