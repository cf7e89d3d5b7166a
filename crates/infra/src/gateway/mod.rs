//! Remote gateway implementations.

pub mod hubspot;

pub use hubspot::HubSpotGateway;
