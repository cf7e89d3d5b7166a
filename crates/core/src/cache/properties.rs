//! Memoizing store for per-kind property schemas.
//!
//! Populated lazily through the gateway's property-listing endpoint. Entries
//! have no TTL; staleness is resolved only by explicit [`PropertyCache::refresh`].
//! Concurrent cold reads of the same kind may race and issue duplicate remote
//! calls; the last write wins and both callers observe a complete schema, so
//! the races are externally indistinguishable.

use std::sync::Arc;

use async_trait::async_trait;
use crmbridge_domain::{ObjectKind, PropertyDefinition, Result};
use dashmap::DashMap;
use tracing::{debug, info};

use crate::ports::{ObjectGateway, PropertySchemaProvider};

/// Process-wide schema cache keyed by object kind.
///
/// The cache calls straight through the gateway rather than through the
/// per-kind services, which keeps the dependency graph acyclic.
pub struct PropertyCache {
    gateway: Arc<dyn ObjectGateway>,
    entries: DashMap<ObjectKind, Arc<Vec<PropertyDefinition>>>,
}

impl PropertyCache {
    pub fn new(gateway: Arc<dyn ObjectGateway>) -> Self {
        Self { gateway, entries: DashMap::new() }
    }

    /// The cached schema for `kind`, fetching and storing it on a miss.
    ///
    /// Nothing is cached when the remote call fails; the failure propagates
    /// to the caller unchanged.
    pub async fn schema(&self, kind: ObjectKind) -> Result<Arc<Vec<PropertyDefinition>>> {
        if let Some(entry) = self.entries.get(&kind) {
            debug!(kind = %kind, "property schema served from cache");
            return Ok(Arc::clone(&entry));
        }

        info!(kind = %kind, "property schema not cached, fetching from remote");
        let fetched = Arc::new(self.gateway.list_properties(kind).await?);
        self.entries.insert(kind, Arc::clone(&fetched));
        info!(kind = %kind, count = fetched.len(), "property schema cached");
        Ok(fetched)
    }

    /// Unconditionally evict then re-populate the entry for `kind`.
    pub async fn refresh(&self, kind: ObjectKind) -> Result<Arc<Vec<PropertyDefinition>>> {
        self.evict(kind);
        self.schema(kind).await
    }

    /// Remove the entry for `kind`, if present.
    pub fn evict(&self, kind: ObjectKind) {
        self.entries.remove(&kind);
        info!(kind = %kind, "property schema cache entry evicted");
    }

    /// Remove every cached entry.
    pub fn evict_all(&self) {
        self.entries.clear();
        info!("property schema cache cleared");
    }

    /// Whether an entry is currently cached for `kind`.
    pub fn contains(&self, kind: ObjectKind) -> bool {
        self.entries.contains_key(&kind)
    }
}

#[async_trait]
impl PropertySchemaProvider for PropertyCache {
    async fn schema(&self, kind: ObjectKind) -> Result<Arc<Vec<PropertyDefinition>>> {
        PropertyCache::schema(self, kind).await
    }
}

#[cfg(test)]
mod tests {
    use crmbridge_domain::CrmError;

    use super::*;
    use crate::testing::{GatewayCall, RecordingGateway};

    fn fetch_count(gateway: &RecordingGateway) -> usize {
        gateway
            .calls()
            .iter()
            .filter(|call| matches!(call, GatewayCall::ListProperties { .. }))
            .count()
    }

    #[tokio::test]
    async fn second_read_is_served_from_cache() {
        let gateway = Arc::new(RecordingGateway::with_schema(vec!["name", "domain"]));
        let cache = PropertyCache::new(gateway.clone());

        let first = cache.schema(ObjectKind::Companies).await.unwrap();
        let second = cache.schema(ObjectKind::Companies).await.unwrap();

        assert_eq!(fetch_count(&gateway), 1);
        assert_eq!(first.len(), 2);
        let first_names: Vec<_> = first.iter().map(|p| p.name.as_str()).collect();
        let second_names: Vec<_> = second.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(first_names, second_names);
    }

    #[tokio::test]
    async fn distinct_kinds_are_cached_independently() {
        let gateway = Arc::new(RecordingGateway::with_schema(vec!["email"]));
        let cache = PropertyCache::new(gateway.clone());

        cache.schema(ObjectKind::Contacts).await.unwrap();
        cache.schema(ObjectKind::Deals).await.unwrap();
        cache.schema(ObjectKind::Contacts).await.unwrap();

        assert_eq!(fetch_count(&gateway), 2);
    }

    #[tokio::test]
    async fn refresh_always_refetches() {
        let gateway = Arc::new(RecordingGateway::with_schema(vec!["amount"]));
        let cache = PropertyCache::new(gateway.clone());

        cache.schema(ObjectKind::Deals).await.unwrap();
        let refreshed = cache.refresh(ObjectKind::Deals).await.unwrap();

        assert_eq!(fetch_count(&gateway), 2);
        assert_eq!(refreshed[0].name, "amount");
        assert!(cache.contains(ObjectKind::Deals));
    }

    #[tokio::test]
    async fn nothing_is_cached_on_fetch_failure() {
        let gateway = Arc::new(RecordingGateway::default());
        *gateway.schema_error.lock().unwrap() =
            Some(CrmError::from_status(500, "boom", "boom"));
        let cache = PropertyCache::new(gateway.clone());

        let err = cache.schema(ObjectKind::Products).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(!cache.contains(ObjectKind::Products));

        // A later call tries the remote again rather than serving a poisoned
        // entry.
        cache.schema(ObjectKind::Products).await.unwrap_err();
        assert_eq!(fetch_count(&gateway), 2);
    }

    #[tokio::test]
    async fn evict_all_clears_every_entry() {
        let gateway = Arc::new(RecordingGateway::with_schema(vec!["name"]));
        let cache = PropertyCache::new(gateway.clone());

        cache.schema(ObjectKind::Companies).await.unwrap();
        cache.schema(ObjectKind::Contacts).await.unwrap();
        cache.evict_all();

        assert!(!cache.contains(ObjectKind::Companies));
        assert!(!cache.contains(ObjectKind::Contacts));
    }

    #[tokio::test]
    async fn concurrent_cold_reads_do_not_corrupt_the_cache() {
        let gateway = Arc::new(RecordingGateway::with_schema(vec!["name"]));
        let cache = Arc::new(PropertyCache::new(gateway.clone()));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            handles
                .push(tokio::spawn(async move { cache.schema(ObjectKind::Companies).await }));
        }
        for handle in handles {
            let schema = handle.await.unwrap().unwrap();
            assert_eq!(schema.len(), 1);
            assert_eq!(schema[0].name, "name");
        }

        // Duplicate fetches are tolerated on a cold cache, but at most one
        // per concurrent caller.
        let fetched = fetch_count(&gateway);
        assert!((1..=8).contains(&fetched));
        assert!(cache.contains(ObjectKind::Companies));
    }
}
