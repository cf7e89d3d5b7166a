//! HubSpot CRM v3 object gateway.
//!
//! Implements [`ObjectGateway`] against the `/crm/v3` REST surface. All five
//! object kinds share the same endpoint shapes; only the path segment
//! differs. Non-2xx responses are classified into [`CrmError`] with the raw
//! body preserved for the caller.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use crmbridge_core::ObjectGateway;
use crmbridge_domain::{
    AssociationRef, CrmError, CrmRecord, HubSpotApiConfig, ListQuery, ObjectKind, Page,
    PropertiesResponse, PropertyDefinition, PropertyMap, Result, SearchRequest,
};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument};

use crate::auth::AccessTokenProvider;
use crate::http::HttpClient;

/// Gateway over the HubSpot CRM v3 object API.
#[derive(Clone)]
pub struct HubSpotGateway {
    http: HttpClient,
    base_url: String,
    auth: Arc<dyn AccessTokenProvider>,
}

impl HubSpotGateway {
    /// Build a gateway from connection settings, constructing the underlying
    /// HTTP client with the configured timeouts.
    pub fn new(config: &HubSpotApiConfig, auth: Arc<dyn AccessTokenProvider>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()?;
        Ok(Self::with_http_client(http, &config.base_url, auth))
    }

    /// Build a gateway around an existing HTTP client.
    pub fn with_http_client(
        http: HttpClient,
        base_url: &str,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self { http, base_url: base_url.trim_end_matches('/').to_string(), auth }
    }

    fn collection_url(&self, kind: ObjectKind) -> String {
        format!("{}/crm/v3/objects/{}", self.base_url, kind.path_segment())
    }

    fn record_url(&self, kind: ObjectKind, id: &str) -> String {
        format!("{}/{}", self.collection_url(kind), urlencoding::encode(id))
    }

    fn search_url(&self, kind: ObjectKind) -> String {
        format!("{}/search", self.collection_url(kind))
    }

    fn properties_url(&self, kind: ObjectKind) -> String {
        format!("{}/crm/v3/properties/{}", self.base_url, kind.path_segment())
    }

    fn associations_url(&self, parent: ObjectKind, parent_id: &str, child: ObjectKind) -> String {
        format!(
            "{}/associations/{}",
            self.record_url(parent, parent_id),
            child.path_segment()
        )
    }

    /// Query string for collection reads: `limit` always, `after` and
    /// `properties` only when present. The projection is sent as one
    /// comma-joined parameter.
    fn list_query_params(query: &ListQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", query.limit.to_string())];
        if let Some(after) = &query.after {
            params.push(("after", after.clone()));
        }
        if !query.properties.is_empty() {
            params.push(("properties", query.properties.join(",")));
        }
        params
    }

    async fn authorized(&self, method: Method, url: &str) -> Result<RequestBuilder> {
        let token = self.auth.access_token().await?;
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    /// Send a request and decode a JSON body, classifying non-2xx statuses.
    async fn execute_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.http.send(builder).await?;
        let response = Self::check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| CrmError::Transport(format!("failed to decode response body: {err}")))
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .map_err(|err| CrmError::Transport(format!("failed to read error body: {err}")))?;
        Err(CrmError::from_status(status.as_u16(), remote_message(status.as_u16(), &body), body))
    }
}

/// Pull the human-readable `message` field out of a remote error body,
/// falling back to the status code when the body is not JSON.
fn remote_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| format!("remote API returned status {status}"))
}

#[async_trait]
impl ObjectGateway for HubSpotGateway {
    #[instrument(skip(self, properties), fields(kind = %kind))]
    async fn fetch_record(
        &self,
        kind: ObjectKind,
        id: &str,
        properties: &[String],
    ) -> Result<CrmRecord> {
        let url = self.record_url(kind, id);
        debug!(%url, "fetching record");
        let mut builder = self.authorized(Method::GET, &url).await?;
        if !properties.is_empty() {
            builder = builder.query(&[("properties", properties.join(","))]);
        }
        self.execute_json(builder).await
    }

    #[instrument(skip(self, query), fields(kind = %kind))]
    async fn fetch_page(&self, kind: ObjectKind, query: &ListQuery) -> Result<Page<CrmRecord>> {
        let url = self.collection_url(kind);
        debug!(%url, limit = query.limit, after = query.after.as_deref(), "fetching page");
        let builder =
            self.authorized(Method::GET, &url).await?.query(&Self::list_query_params(query));
        self.execute_json(builder).await
    }

    #[instrument(skip(self, properties), fields(kind = %kind))]
    async fn create_record(&self, kind: ObjectKind, properties: &PropertyMap) -> Result<CrmRecord> {
        let url = self.collection_url(kind);
        debug!(%url, "creating record");
        let builder =
            self.authorized(Method::POST, &url).await?.json(&json!({ "properties": properties }));
        self.execute_json(builder).await
    }

    #[instrument(skip(self, properties), fields(kind = %kind))]
    async fn update_record(
        &self,
        kind: ObjectKind,
        id: &str,
        properties: &PropertyMap,
    ) -> Result<CrmRecord> {
        let url = self.record_url(kind, id);
        debug!(%url, "updating record");
        let builder =
            self.authorized(Method::PUT, &url).await?.json(&json!({ "properties": properties }));
        self.execute_json(builder).await
    }

    /// Delete returns `Ok(true)` only for a 2xx response; a 404 surfaces as
    /// [`CrmError::NotFound`] rather than a silent success.
    #[instrument(skip(self), fields(kind = %kind))]
    async fn delete_record(&self, kind: ObjectKind, id: &str) -> Result<bool> {
        let url = self.record_url(kind, id);
        debug!(%url, "deleting record");
        let builder = self.authorized(Method::DELETE, &url).await?;
        let response = self.http.send(builder).await?;
        Self::check_status(response).await?;
        Ok(true)
    }

    #[instrument(skip(self, request), fields(kind = %kind))]
    async fn search_records(
        &self,
        kind: ObjectKind,
        request: &SearchRequest,
    ) -> Result<Page<CrmRecord>> {
        let url = self.search_url(kind);
        debug!(%url, limit = request.limit, "searching records");
        let builder = self.authorized(Method::POST, &url).await?.json(request);
        self.execute_json(builder).await
    }

    #[instrument(skip(self), fields(kind = %kind))]
    async fn list_properties(&self, kind: ObjectKind) -> Result<Vec<PropertyDefinition>> {
        let url = self.properties_url(kind);
        debug!(%url, "listing property schema");
        let builder = self.authorized(Method::GET, &url).await?;
        let response: PropertiesResponse = self.execute_json(builder).await?;
        Ok(response.results)
    }

    #[instrument(skip(self), fields(parent = %parent, child = %child))]
    async fn fetch_associations(
        &self,
        parent: ObjectKind,
        parent_id: &str,
        child: ObjectKind,
    ) -> Result<Page<AssociationRef>> {
        let url = self.associations_url(parent, parent_id, child);
        debug!(%url, "fetching associations");
        let builder = self.authorized(Method::GET, &url).await?;
        self.execute_json(builder).await
    }
}
