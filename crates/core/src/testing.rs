//! Test doubles shared by the core's unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use crmbridge_domain::{
    AssociationRef, CrmError, CrmRecord, ListQuery, ObjectKind, Page, PropertyDefinition,
    PropertyMap, Result, SearchRequest,
};
use serde_json::Value;

use crate::ports::ObjectGateway;

/// One recorded gateway invocation, with the arguments the core passed down.
#[derive(Debug, Clone)]
pub(crate) enum GatewayCall {
    FetchRecord { kind: ObjectKind, id: String, properties: Vec<String> },
    FetchPage { kind: ObjectKind, query: ListQuery },
    Create { kind: ObjectKind, properties: PropertyMap },
    Update { kind: ObjectKind, id: String, properties: PropertyMap },
    Delete { kind: ObjectKind, id: String },
    Search { kind: ObjectKind, filter_groups: Value, properties: Vec<String>, limit: u32 },
    ListProperties { kind: ObjectKind },
    Associations { parent: ObjectKind, parent_id: String, child: ObjectKind },
}

/// Scriptable [`ObjectGateway`] double that records every call.
#[derive(Default)]
pub(crate) struct RecordingGateway {
    pub calls: Mutex<Vec<GatewayCall>>,
    /// Property names returned by `list_properties`.
    pub schema_names: Vec<&'static str>,
    /// Queued responses for `fetch_page`, popped in order; an empty queue
    /// yields an empty final page.
    pub pages: Mutex<VecDeque<Page<CrmRecord>>>,
    /// Response for `search_records`; `None` yields an empty page.
    pub search_page: Mutex<Option<Page<CrmRecord>>>,
    /// Overrides the default `Ok(true)` delete response.
    pub delete_response: Mutex<Option<Result<bool>>>,
    /// Error returned by `fetch_record` instead of an echo record.
    pub fetch_record_error: Mutex<Option<CrmError>>,
    /// Response for `fetch_associations`; `None` yields an empty page.
    pub association_page: Mutex<Option<Page<AssociationRef>>>,
    /// Error returned by every `list_properties` call.
    pub schema_error: Mutex<Option<CrmError>>,
}

impl RecordingGateway {
    pub fn with_schema(names: Vec<&'static str>) -> Self {
        Self { schema_names: names, ..Self::default() }
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn echo_record(id: &str) -> CrmRecord {
        serde_json::from_value(serde_json::json!({ "id": id, "properties": {} })).unwrap()
    }
}

/// Build a page of records with the given ids and an optional next cursor.
pub(crate) fn page_of(ids: &[&str], after: Option<&str>) -> Page<CrmRecord> {
    let results = ids.iter().map(|id| RecordingGateway::echo_record(id)).collect();
    let paging = after.map(|cursor| {
        serde_json::from_value(serde_json::json!({ "next": { "after": cursor } })).unwrap()
    });
    Page { results, paging }
}

#[async_trait]
impl ObjectGateway for RecordingGateway {
    async fn fetch_record(
        &self,
        kind: ObjectKind,
        id: &str,
        properties: &[String],
    ) -> Result<CrmRecord> {
        self.record(GatewayCall::FetchRecord {
            kind,
            id: id.to_string(),
            properties: properties.to_vec(),
        });
        if let Some(err) = self.fetch_record_error.lock().unwrap().take() {
            return Err(err);
        }
        Ok(Self::echo_record(id))
    }

    async fn fetch_page(&self, kind: ObjectKind, query: &ListQuery) -> Result<Page<CrmRecord>> {
        self.record(GatewayCall::FetchPage { kind, query: query.clone() });
        Ok(self.pages.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn create_record(&self, kind: ObjectKind, properties: &PropertyMap) -> Result<CrmRecord> {
        self.record(GatewayCall::Create { kind, properties: properties.clone() });
        Ok(Self::echo_record("created"))
    }

    async fn update_record(
        &self,
        kind: ObjectKind,
        id: &str,
        properties: &PropertyMap,
    ) -> Result<CrmRecord> {
        self.record(GatewayCall::Update {
            kind,
            id: id.to_string(),
            properties: properties.clone(),
        });
        Ok(Self::echo_record(id))
    }

    async fn delete_record(&self, kind: ObjectKind, id: &str) -> Result<bool> {
        self.record(GatewayCall::Delete { kind, id: id.to_string() });
        self.delete_response.lock().unwrap().take().unwrap_or(Ok(true))
    }

    async fn search_records(
        &self,
        kind: ObjectKind,
        request: &SearchRequest,
    ) -> Result<Page<CrmRecord>> {
        self.record(GatewayCall::Search {
            kind,
            filter_groups: request.filter_groups.clone(),
            properties: request.properties.clone(),
            limit: request.limit,
        });
        Ok(self.search_page.lock().unwrap().take().unwrap_or_default())
    }

    async fn list_properties(&self, kind: ObjectKind) -> Result<Vec<PropertyDefinition>> {
        self.record(GatewayCall::ListProperties { kind });
        if let Some(err) = self.schema_error.lock().unwrap().as_ref() {
            return Err(err.clone());
        }
        Ok(self
            .schema_names
            .iter()
            .map(|name| serde_json::from_value(serde_json::json!({ "name": name })).unwrap())
            .collect())
    }

    async fn fetch_associations(
        &self,
        parent: ObjectKind,
        parent_id: &str,
        child: ObjectKind,
    ) -> Result<Page<AssociationRef>> {
        self.record(GatewayCall::Associations { parent, parent_id: parent_id.to_string(), child });
        Ok(self.association_page.lock().unwrap().take().unwrap_or_default())
    }
}
