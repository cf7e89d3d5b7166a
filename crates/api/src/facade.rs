//! The uniform access façade over all five object kinds.
//!
//! Callers address kinds by their string token ("companies", "line-items",
//! ...); an unknown token is rejected as [`CrmError::InvalidArgument`] before
//! any remote call is made. All generic operations dispatch to the matching
//! per-kind service; the association lookups are exposed only for the pairs
//! the remote system defines.

use std::str::FromStr;
use std::sync::Arc;

use crmbridge_core::{
    CompaniesService, ContactsService, DealsService, LineItemsService, ObjectGateway,
    ObjectService, ProductsService, PropertyCache,
};
use crmbridge_domain::{
    AssociationRef, CrmRecord, ObjectKind, Page, PropertyDefinition, PropertyMap, Result,
};
use serde_json::Value;

/// Kind-dispatching façade over the per-kind services.
///
/// Clones share the underlying services and schema cache.
#[derive(Clone)]
pub struct CrmFacade {
    companies: CompaniesService,
    contacts: ContactsService,
    deals: DealsService,
    products: ProductsService,
    line_items: LineItemsService,
    cache: Arc<PropertyCache>,
}

impl CrmFacade {
    /// Wire the façade from a gateway, building the shared schema cache and
    /// one service per kind.
    pub fn new(gateway: Arc<dyn ObjectGateway>) -> Self {
        let cache = Arc::new(PropertyCache::new(Arc::clone(&gateway)));
        Self {
            companies: CompaniesService::new(Arc::clone(&gateway), cache.clone()),
            contacts: ContactsService::new(Arc::clone(&gateway), cache.clone()),
            deals: DealsService::new(Arc::clone(&gateway), cache.clone()),
            products: ProductsService::new(Arc::clone(&gateway), cache.clone()),
            line_items: LineItemsService::new(gateway, cache.clone()),
            cache,
        }
    }

    /// The generic service behind a kind token.
    ///
    /// Parsing is case-insensitive; unknown tokens fail without touching the
    /// remote system.
    fn service(&self, kind: &str) -> Result<&ObjectService> {
        Ok(match ObjectKind::from_str(kind)? {
            ObjectKind::Companies => &self.companies,
            ObjectKind::Contacts => &self.contacts,
            ObjectKind::Deals => &self.deals,
            ObjectKind::Products => &self.products,
            ObjectKind::LineItems => &self.line_items,
        })
    }

    // Generic operation set

    pub async fn list_all(
        &self,
        kind: &str,
        properties: &[String],
        limit: u32,
    ) -> Result<Page<CrmRecord>> {
        self.service(kind)?.list_all(properties, limit).await
    }

    pub async fn list_page(
        &self,
        kind: &str,
        properties: &[String],
        limit: u32,
        after: Option<String>,
    ) -> Result<Page<CrmRecord>> {
        self.service(kind)?.list_page(properties, limit, after).await
    }

    pub async fn get_by_id(&self, kind: &str, id: &str) -> Result<CrmRecord> {
        self.service(kind)?.get_by_id(id).await
    }

    pub async fn create(&self, kind: &str, properties: &PropertyMap) -> Result<CrmRecord> {
        self.service(kind)?.create(properties).await
    }

    pub async fn update(&self, kind: &str, id: &str, properties: &PropertyMap) -> Result<CrmRecord> {
        self.service(kind)?.update(id, properties).await
    }

    pub async fn delete(&self, kind: &str, id: &str) -> Result<bool> {
        self.service(kind)?.delete(id).await
    }

    pub async fn search(
        &self,
        kind: &str,
        filter_groups: Value,
        properties: &[String],
        limit: u32,
    ) -> Result<Page<CrmRecord>> {
        self.service(kind)?.search(filter_groups, properties, limit).await
    }

    // Association extensions

    /// Deals associated with the given contact.
    pub async fn deals_for_contact(&self, contact_id: &str) -> Result<Page<AssociationRef>> {
        self.contacts.deals_for_contact(contact_id).await
    }

    /// Contacts associated with the given company.
    pub async fn contacts_for_company(&self, company_id: &str) -> Result<Page<AssociationRef>> {
        self.companies.contacts_for_company(company_id).await
    }

    /// Line items associated with the given deal.
    pub async fn line_items_for_deal(&self, deal_id: &str) -> Result<Page<AssociationRef>> {
        self.line_items.line_items_for_deal(deal_id).await
    }

    // Schema cache management

    /// The declared property schema for a kind (cached).
    pub async fn schema(&self, kind: &str) -> Result<Arc<Vec<PropertyDefinition>>> {
        self.cache.schema(ObjectKind::from_str(kind)?).await
    }

    /// Force a refetch of one kind's schema.
    pub async fn refresh_schema(&self, kind: &str) -> Result<Arc<Vec<PropertyDefinition>>> {
        self.cache.refresh(ObjectKind::from_str(kind)?).await
    }

    /// Drop one kind's cached schema without refetching.
    pub fn evict_schema(&self, kind: &str) -> Result<()> {
        self.cache.evict(ObjectKind::from_str(kind)?);
        Ok(())
    }

    /// Drop every cached schema.
    pub fn evict_all_schemas(&self) {
        self.cache.evict_all();
    }

    /// The shared schema cache, for wiring into other components.
    pub fn property_cache(&self) -> Arc<PropertyCache> {
        Arc::clone(&self.cache)
    }

    /// The generic service for a parsed kind, for wiring sync workers.
    pub fn service_for(&self, kind: ObjectKind) -> ObjectService {
        let service: &ObjectService = match kind {
            ObjectKind::Companies => &self.companies,
            ObjectKind::Contacts => &self.contacts,
            ObjectKind::Deals => &self.deals,
            ObjectKind::Products => &self.products,
            ObjectKind::LineItems => &self.line_items,
        };
        service.clone()
    }
}
