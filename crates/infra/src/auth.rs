//! Bearer-token credentials for the remote API.
//!
//! HubSpot private-app tokens are long-lived, so the default provider just
//! hands back a configured string. The trait exists so a refreshing OAuth
//! provider can be slotted in without touching the gateway.

use async_trait::async_trait;
use crmbridge_domain::Result;

/// Trait for providing access tokens.
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token.
    async fn access_token(&self) -> Result<String>;
}

/// Provider backed by a fixed private-app token.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}
