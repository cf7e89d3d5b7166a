//! Per-kind services: the generic operation set plus the association
//! lookups that are not shared across kinds.
//!
//! Association calls return lightweight references (id plus minimal
//! metadata), never full child records.

use std::ops::Deref;
use std::sync::Arc;

use crmbridge_domain::{AssociationRef, ObjectKind, Page, Result};
use tracing::{info, instrument};

use crate::ports::{ObjectGateway, PropertySchemaProvider};

use super::service::ObjectService;

macro_rules! kind_service {
    ($(#[$doc:meta])* $name:ident, $kind:expr) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name {
            service: ObjectService,
            gateway: Arc<dyn ObjectGateway>,
        }

        impl $name {
            pub fn new(
                gateway: Arc<dyn ObjectGateway>,
                schema: Arc<dyn PropertySchemaProvider>,
            ) -> Self {
                Self {
                    service: ObjectService::new($kind, Arc::clone(&gateway), schema),
                    gateway,
                }
            }
        }

        impl Deref for $name {
            type Target = ObjectService;

            fn deref(&self) -> &ObjectService {
                &self.service
            }
        }
    };
}

kind_service!(
    /// Contacts, with the contact-to-deal association lookup.
    ContactsService,
    ObjectKind::Contacts
);

kind_service!(
    /// Companies, with the company-to-contact association lookup.
    CompaniesService,
    ObjectKind::Companies
);

kind_service!(
    /// Deals; no extension operations beyond the generic set.
    DealsService,
    ObjectKind::Deals
);

kind_service!(
    /// Products; no extension operations beyond the generic set.
    ProductsService,
    ObjectKind::Products
);

kind_service!(
    /// Line items, with the deal-to-line-item association lookup.
    LineItemsService,
    ObjectKind::LineItems
);

impl ContactsService {
    /// Deals associated with the given contact.
    #[instrument(skip(self))]
    pub async fn deals_for_contact(&self, contact_id: &str) -> Result<Page<AssociationRef>> {
        info!(contact_id, "fetching deals associated with contact");
        self.gateway.fetch_associations(ObjectKind::Contacts, contact_id, ObjectKind::Deals).await
    }
}

impl CompaniesService {
    /// Contacts associated with the given company.
    #[instrument(skip(self))]
    pub async fn contacts_for_company(&self, company_id: &str) -> Result<Page<AssociationRef>> {
        info!(company_id, "fetching contacts associated with company");
        self.gateway
            .fetch_associations(ObjectKind::Companies, company_id, ObjectKind::Contacts)
            .await
    }
}

impl LineItemsService {
    /// Line items associated with the given deal.
    #[instrument(skip(self))]
    pub async fn line_items_for_deal(&self, deal_id: &str) -> Result<Page<AssociationRef>> {
        info!(deal_id, "fetching line items associated with deal");
        self.gateway.fetch_associations(ObjectKind::Deals, deal_id, ObjectKind::LineItems).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::PropertyCache;
    use crate::testing::{GatewayCall, RecordingGateway};

    fn providers(
        gateway: &Arc<RecordingGateway>,
    ) -> (Arc<dyn ObjectGateway>, Arc<dyn PropertySchemaProvider>) {
        let gateway: Arc<dyn ObjectGateway> = gateway.clone();
        let cache = Arc::new(PropertyCache::new(gateway.clone()));
        (gateway, cache)
    }

    #[tokio::test]
    async fn contact_deals_hit_the_association_endpoint() {
        let recording = Arc::new(RecordingGateway::default());
        let page = serde_json::from_value(serde_json::json!({
            "results": [{"id": "55", "type": "contact_to_deal"}]
        }))
        .unwrap();
        *recording.association_page.lock().unwrap() = Some(page);

        let (gateway, schema) = providers(&recording);
        let contacts = ContactsService::new(gateway, schema);

        let associations = contacts.deals_for_contact("31").await.unwrap();
        assert_eq!(associations.results[0].id, "55");

        match recording.calls().last().unwrap() {
            GatewayCall::Associations { parent, parent_id, child } => {
                assert_eq!(*parent, ObjectKind::Contacts);
                assert_eq!(parent_id, "31");
                assert_eq!(*child, ObjectKind::Deals);
            }
            other => panic!("expected Associations, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn line_items_for_deal_use_the_deal_as_parent() {
        let recording = Arc::new(RecordingGateway::default());
        let (gateway, schema) = providers(&recording);
        let line_items = LineItemsService::new(gateway, schema);

        line_items.line_items_for_deal("77").await.unwrap();

        match recording.calls().last().unwrap() {
            GatewayCall::Associations { parent, parent_id, child } => {
                assert_eq!(*parent, ObjectKind::Deals);
                assert_eq!(parent_id, "77");
                assert_eq!(*child, ObjectKind::LineItems);
            }
            other => panic!("expected Associations, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn extension_services_expose_the_generic_operations() {
        let recording = Arc::new(RecordingGateway::with_schema(vec!["name"]));
        let (gateway, schema) = providers(&recording);
        let companies = CompaniesService::new(gateway, schema);

        assert_eq!(companies.kind(), ObjectKind::Companies);
        companies.list_all(&[], 10).await.unwrap();
        companies.contacts_for_company("1").await.unwrap();

        let calls = recording.calls();
        assert!(calls.iter().any(|c| matches!(c, GatewayCall::FetchPage { .. })));
        assert!(calls.iter().any(|c| matches!(c, GatewayCall::Associations { .. })));
    }
}
