//! The uniform operation set for one object kind.

use std::sync::Arc;

use crmbridge_domain::{
    CrmRecord, ListQuery, ObjectKind, Page, PropertyDefinition, PropertyMap, Result, SearchRequest,
};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::ports::{ObjectGateway, PropertySchemaProvider};

/// Generic resource service: CRUD, search, and pagination for a single
/// object kind, composed from the gateway and the schema provider.
///
/// Projection resolution is deliberately asymmetric and mirrors the remote
/// API's observed behavior:
/// - [`ObjectService::list_all`] / [`ObjectService::list_page`] resolve the
///   full schema-derived projection only when the caller passes none,
/// - [`ObjectService::get_by_id`] always resolves it,
/// - [`ObjectService::search`] never does; an empty projection stays empty.
#[derive(Clone)]
pub struct ObjectService {
    kind: ObjectKind,
    gateway: Arc<dyn ObjectGateway>,
    schema: Arc<dyn PropertySchemaProvider>,
}

impl ObjectService {
    pub fn new(
        kind: ObjectKind,
        gateway: Arc<dyn ObjectGateway>,
        schema: Arc<dyn PropertySchemaProvider>,
    ) -> Self {
        Self { kind, gateway, schema }
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// First page of the kind's collection.
    #[instrument(skip(self, properties), fields(kind = %self.kind))]
    pub async fn list_all(&self, properties: &[String], limit: u32) -> Result<Page<CrmRecord>> {
        info!(requested = properties.len(), limit, "listing objects");
        let effective = self.effective_projection(properties).await?;
        let query = ListQuery::new(limit).with_properties(effective);
        self.gateway.fetch_page(self.kind, &query).await
    }

    /// One page of the kind's collection, starting at an explicit cursor.
    #[instrument(skip(self, properties), fields(kind = %self.kind))]
    pub async fn list_page(
        &self,
        properties: &[String],
        limit: u32,
        after: Option<String>,
    ) -> Result<Page<CrmRecord>> {
        info!(requested = properties.len(), limit, after = after.as_deref(), "listing object page");
        let effective = self.effective_projection(properties).await?;
        let query = ListQuery::new(limit).with_after(after).with_properties(effective);
        self.gateway.fetch_page(self.kind, &query).await
    }

    /// Fetch a single record, always with the full schema-derived
    /// projection.
    #[instrument(skip(self), fields(kind = %self.kind))]
    pub async fn get_by_id(&self, id: &str) -> Result<CrmRecord> {
        info!(id, "fetching object by id");
        let projection = self.resolve_projection().await?;
        self.gateway.fetch_record(self.kind, id, &projection).await
    }

    /// Create a record; the caller-supplied map is sent verbatim, unfiltered
    /// by schema.
    #[instrument(skip(self, properties), fields(kind = %self.kind))]
    pub async fn create(&self, properties: &PropertyMap) -> Result<CrmRecord> {
        info!(property_count = properties.len(), "creating object");
        self.gateway.create_record(self.kind, properties).await
    }

    /// Update a record; remote writes fully overwrite the targeted fields.
    #[instrument(skip(self, properties), fields(kind = %self.kind))]
    pub async fn update(&self, id: &str, properties: &PropertyMap) -> Result<CrmRecord> {
        info!(id, property_count = properties.len(), "updating object");
        self.gateway.update_record(self.kind, id, properties).await
    }

    /// Delete a record. Only a 2xx remote response yields `Ok(true)`.
    #[instrument(skip(self), fields(kind = %self.kind))]
    pub async fn delete(&self, id: &str) -> Result<bool> {
        info!(id, "deleting object");
        self.gateway.delete_record(self.kind, id).await
    }

    /// Search the kind with an opaque filter-group structure.
    ///
    /// An empty projection is sent as an empty list; schema is NOT resolved
    /// here, unlike the list operations.
    #[instrument(skip(self, filter_groups, properties), fields(kind = %self.kind))]
    pub async fn search(
        &self,
        filter_groups: Value,
        properties: &[String],
        limit: u32,
    ) -> Result<Page<CrmRecord>> {
        info!(requested = properties.len(), limit, "searching objects");
        let request =
            SearchRequest { filter_groups, properties: properties.to_vec(), limit };
        self.gateway.search_records(self.kind, &request).await
    }

    /// The declared property schema for this service's kind.
    pub async fn schema(&self) -> Result<Arc<Vec<PropertyDefinition>>> {
        self.schema.schema(self.kind).await
    }

    async fn effective_projection(&self, properties: &[String]) -> Result<Vec<String>> {
        if !properties.is_empty() {
            return Ok(properties.to_vec());
        }
        debug!(kind = %self.kind, "empty projection, resolving all known properties");
        self.resolve_projection().await
    }

    async fn resolve_projection(&self) -> Result<Vec<String>> {
        let schema = self.schema.schema(self.kind).await?;
        let names: Vec<String> = schema.iter().map(|p| p.name.clone()).collect();
        debug!(kind = %self.kind, count = names.len(), "resolved property projection");
        Ok(names)
    }
}
