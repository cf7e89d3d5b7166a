//! # CrmBridge Core
//!
//! The generic object-access core: kind-parameterized CRUD/search/pagination
//! services, the property schema cache, and the synchronization worker.
//!
//! ## Architecture
//! - Defines the gateway and schema-provider ports as traits
//! - Pure request/response logic; all I/O lives behind the ports
//! - Implemented against `crmbridge-domain` types only

pub mod cache;
pub mod objects;
pub mod ports;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used items
pub use cache::PropertyCache;
pub use objects::{
    CompaniesService, ContactsService, DealsService, LineItemsService, ObjectService,
    ProductsService,
};
pub use ports::{ObjectGateway, PropertySchemaProvider};
pub use sync::{SyncWorker, SyncWorkerConfig};
