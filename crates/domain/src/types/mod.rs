//! Wire-level and domain data types for the CRM object API.

pub mod kind;
pub mod property;
pub mod query;
pub mod record;

pub use kind::ObjectKind;
pub use property::{PropertiesResponse, PropertyDefinition};
pub use query::{ListQuery, SearchRequest};
pub use record::{AssociationRef, CrmRecord, NextPage, Page, Paging, PropertyMap};
