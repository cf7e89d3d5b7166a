//! Ports implemented by the infrastructure layer.
//!
//! The core depends on these traits only; concrete HTTP plumbing lives in
//! `crmbridge-infra`. Both traits are consumed as `Arc<dyn _>` so services,
//! cache, and schedulers can share one gateway instance.

use std::sync::Arc;

use async_trait::async_trait;
use crmbridge_domain::{
    AssociationRef, CrmRecord, ListQuery, ObjectKind, Page, PropertyDefinition, PropertyMap,
    Result, SearchRequest,
};

/// Remote object gateway: one authenticated HTTP call per operation against
/// the CRM's endpoint namespace for a given kind.
///
/// Non-2xx responses surface as `CrmError::RemoteApi` / `CrmError::NotFound`
/// carrying the HTTP status and raw body; failures below the HTTP layer
/// surface as `CrmError::Transport`.
#[async_trait]
pub trait ObjectGateway: Send + Sync {
    /// GET a single record, requesting the given property projection.
    async fn fetch_record(
        &self,
        kind: ObjectKind,
        id: &str,
        properties: &[String],
    ) -> Result<CrmRecord>;

    /// GET one page of the kind's collection endpoint.
    async fn fetch_page(&self, kind: ObjectKind, query: &ListQuery) -> Result<Page<CrmRecord>>;

    /// POST a new record with body `{"properties": {...}}`.
    async fn create_record(&self, kind: ObjectKind, properties: &PropertyMap) -> Result<CrmRecord>;

    /// PUT an existing record; targeted fields are fully overwritten.
    async fn update_record(
        &self,
        kind: ObjectKind,
        id: &str,
        properties: &PropertyMap,
    ) -> Result<CrmRecord>;

    /// DELETE a record. `Ok(true)` only on a 2xx response; a 404 is an
    /// error, not success.
    async fn delete_record(&self, kind: ObjectKind, id: &str) -> Result<bool>;

    /// POST to the kind's `/search` endpoint.
    async fn search_records(
        &self,
        kind: ObjectKind,
        request: &SearchRequest,
    ) -> Result<Page<CrmRecord>>;

    /// GET the kind's declared property schema.
    async fn list_properties(&self, kind: ObjectKind) -> Result<Vec<PropertyDefinition>>;

    /// GET the lightweight association references from `parent` records of
    /// the given id to records of the `child` kind.
    async fn fetch_associations(
        &self,
        parent: ObjectKind,
        parent_id: &str,
        child: ObjectKind,
    ) -> Result<Page<AssociationRef>>;
}

/// Answers "what properties exist for kind K" without the caller knowing
/// whether the answer came from a cache or a remote call.
#[async_trait]
pub trait PropertySchemaProvider: Send + Sync {
    /// The ordered property schema for `kind`.
    async fn schema(&self, kind: ObjectKind) -> Result<Arc<Vec<PropertyDefinition>>>;
}
