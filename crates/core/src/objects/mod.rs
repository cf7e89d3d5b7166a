//! Kind-parameterized object services.

pub mod extensions;
pub mod service;

pub use extensions::{
    CompaniesService, ContactsService, DealsService, LineItemsService, ProductsService,
};
pub use service::ObjectService;
