//! Property schema types for `/crm/v3/properties/{kind}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One declared property of an object kind.
///
/// Fetched in bulk per kind; never mutated locally. The remote system owns
/// schema changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    /// Property name, unique within a kind.
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Data type (string, number, datetime, enumeration, ...).
    #[serde(default, rename = "type")]
    pub data_type: Option<String>,
    /// How the field renders (text, select, checkbox, ...).
    #[serde(default)]
    pub field_type: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub read_only_definition: bool,
    /// Enumerated option list, when the property is an enumeration.
    #[serde(default)]
    pub options: Vec<Value>,
    /// Formula for computed properties.
    #[serde(default)]
    pub calculation_formula: Option<String>,
    /// Target kind for cross-reference properties.
    #[serde(default)]
    pub referenced_object_type: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

/// Response envelope of the property-listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertiesResponse {
    #[serde(default)]
    pub results: Vec<PropertyDefinition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_remote_property_payload() {
        let json = r#"{
            "results": [
                {
                    "name": "industry",
                    "label": "Industry",
                    "type": "enumeration",
                    "fieldType": "select",
                    "groupName": "companyinformation",
                    "searchable": true,
                    "options": [{"label": "Tech", "value": "tech"}],
                    "hidden": false
                },
                {"name": "hs_object_id", "type": "number", "readOnlyDefinition": true}
            ]
        }"#;
        let response: PropertiesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results.len(), 2);
        let industry = &response.results[0];
        assert_eq!(industry.data_type.as_deref(), Some("enumeration"));
        assert_eq!(industry.field_type.as_deref(), Some("select"));
        assert_eq!(industry.options.len(), 1);
        assert!(response.results[1].read_only_definition);
    }

    #[test]
    fn minimal_property_only_needs_a_name() {
        let definition: PropertyDefinition = serde_json::from_str(r#"{"name": "email"}"#).unwrap();
        assert_eq!(definition.name, "email");
        assert!(!definition.required);
        assert!(definition.options.is_empty());
    }
}
