//! Clinio API client implementation.

use crate::error::{handle_api_error, ClinioError, Result};
use crate::models::{ApiErrorBody, ConnectionStatus, LoginResponse, RootInfo};
use clinio_core::{
    ClientConfig, CredentialStore, EventSink, FixedLocation, MemoryCredentialStore, Navigator,
    NullSink,
};
use clinio_tenant::{resolve, tenant_header};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument};
use url::Url;

/// Tenant-aware client for the Clinio platform API.
///
/// One instance is built at startup and shared by cloning; every request
/// re-reads the credential store and re-resolves the tenant from the current
/// location, so context changes after construction are honored without
/// rebuilding the client.
#[derive(Clone)]
pub struct ClinioClient {
    pub(crate) http: Client,
    pub(crate) base_url: Url,
    pub(crate) config: ClientConfig,
    pub(crate) store: Arc<dyn CredentialStore>,
    pub(crate) navigator: Arc<dyn Navigator>,
    pub(crate) events: Arc<dyn EventSink>,
}

impl std::fmt::Debug for ClinioClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClinioClient")
            .field("base_url", &self.base_url)
            .field("mode", &self.config.mode)
            .finish()
    }
}

/// Builder for creating a [`ClinioClient`].
#[derive(Default)]
pub struct ClinioClientBuilder {
    config: Option<ClientConfig>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    store: Option<Arc<dyn CredentialStore>>,
    navigator: Option<Arc<dyn Navigator>>,
    events: Option<Arc<dyn EventSink>>,
}

impl ClinioClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit configuration instead of the defaults.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the API base URL selected by the configuration mode.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Override the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Inject the credential store backing authentication state.
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Inject the location/navigation capability of the host.
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Inject the sink receiving classified user-facing events.
    pub fn event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = Some(events);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ClinioClient> {
        let config = self.config.unwrap_or_default();
        let navigator: Arc<dyn Navigator> = self
            .navigator
            .unwrap_or_else(|| Arc::new(FixedLocation::new("localhost", "/")));
        let store: Arc<dyn CredentialStore> = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryCredentialStore::new()));
        let events: Arc<dyn EventSink> = self.events.unwrap_or_else(|| Arc::new(NullSink));

        let base_url = self
            .base_url
            .unwrap_or_else(|| config.api_base_url().to_string());
        let base_url = Url::parse(&base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let descriptor = resolve(&navigator.hostname(), config.mode, &config.base_domain);
        for (name, value) in tenant_header(&descriptor) {
            headers.insert(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(&value)?,
            );
        }

        let http = Client::builder()
            .timeout(self.timeout.unwrap_or_else(|| config.timeout()))
            .default_headers(headers)
            .build()
            .map_err(ClinioError::Http)?;

        Ok(ClinioClient {
            http,
            base_url,
            config,
            store,
            navigator,
            events,
        })
    }
}

impl ClinioClient {
    /// Create a new client builder.
    pub fn builder() -> ClinioClientBuilder {
        ClinioClientBuilder::new()
    }

    /// Create a client with default settings for `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// The resolved API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a URL under the API base.
    fn url(&self, path: &str) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(ClinioError::Url)
    }

    /// Outbound phase: re-read credentials and tenant context, assemble the
    /// request, transmit. Any failure while assembling headers rejects the
    /// request before transmission.
    async fn send_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &Url,
        body: Option<&B>,
    ) -> Result<Response> {
        let descriptor = resolve(
            &self.navigator.hostname(),
            self.config.mode,
            &self.config.base_domain,
        );

        let mut request = self.http.request(method.clone(), url.clone());

        if let Some(token) = self.store.token() {
            request = request.header(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Token {}", token))?,
            );
        }
        for (name, value) in tenant_header(&descriptor) {
            request = request.header(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(&value)?,
            );
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        if self.config.mode.is_development() {
            debug!(
                %method,
                %url,
                tenant = descriptor.tenant_id(),
                base_url = %self.base_url,
                "api request"
            );
        }

        request.send().await.map_err(|err| {
            error!(%method, %url, error = %err, "transport failure");
            ClinioError::Http(err)
        })
    }

    /// Inbound phase: pass successes through, classify failures.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        method: &Method,
        url: &Url,
        response: Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            if self.config.mode.is_development() {
                debug!(%method, %url, status = status.as_u16(), "api response");
            }
            response.json().await.map_err(ClinioError::Http)
        } else {
            Err(self.fail(method, url, status, response).await)
        }
    }

    /// Classify a non-success response: log, run the status policy, and
    /// produce the error the caller still receives.
    async fn fail(
        &self,
        method: &Method,
        url: &Url,
        status: StatusCode,
        response: Response,
    ) -> ClinioError {
        let text = response.text().await.unwrap_or_default();
        let data: Option<serde_json::Value> = serde_json::from_str(&text).ok();

        error!(%method, %url, status = status.as_u16(), body = %text, "api error");
        self.apply_error_policy(status, data.as_ref());

        let body = data.as_ref().map(ApiErrorBody::from_value).unwrap_or_default();
        let message = body.error.or(body.message).unwrap_or_else(|| {
            if text.is_empty() {
                format!("HTTP {}", status.as_u16())
            } else {
                text.clone()
            }
        });

        ClinioError::Api {
            status: status.as_u16(),
            message,
            data,
        }
    }

    /// GET `path` and deserialize the payload.
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        let response = self.send_request::<()>(Method::GET, &url, None).await?;
        self.handle_response(&Method::GET, &url, response).await
    }

    /// POST `body` to `path` and deserialize the payload.
    #[instrument(skip(self, body))]
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path)?;
        let response = self.send_request(Method::POST, &url, Some(body)).await?;
        self.handle_response(&Method::POST, &url, response).await
    }

    /// PUT `body` to `path` and deserialize the payload.
    #[instrument(skip(self, body))]
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path)?;
        let response = self.send_request(Method::PUT, &url, Some(body)).await?;
        self.handle_response(&Method::PUT, &url, response).await
    }

    /// DELETE `path`.
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path)?;
        let response = self.send_request::<()>(Method::DELETE, &url, None).await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.fail(&Method::DELETE, &url, status, response).await)
        }
    }

    /// Probe the API root. Total: connectivity problems come back in the
    /// status, never as an error.
    #[instrument(skip(self))]
    pub async fn check_connection(&self) -> ConnectionStatus {
        match self.get::<RootInfo>("/").await {
            Ok(info) => ConnectionStatus {
                connected: true,
                tenant: info.tenant,
                version: info.version,
                error: None,
            },
            Err(err) => ConnectionStatus {
                connected: false,
                tenant: None,
                version: None,
                error: Some(handle_api_error(&err, None)),
            },
        }
    }

    /// Authenticate and persist the returned token and user record.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response: LoginResponse = self.post("/v1/auth/login/", &body).await?;

        self.store.set_token(&response.token);
        if !response.user.is_null() {
            self.store.set_user_data(&response.user.to_string());
        }
        Ok(response)
    }

    /// End the session server-side (best effort) and clear local credentials.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if let Err(err) = self
            .post::<serde_json::Value, _>("/v1/auth/logout/", &serde_json::json!({}))
            .await
        {
            debug!(error = %err, "logout request failed");
        }
        self.store.clear_credentials();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_to_configured_endpoint() {
        let client = ClinioClient::builder().build().unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/api");
    }

    #[test]
    fn test_base_url_override() {
        let client = ClinioClient::builder()
            .base_url("http://127.0.0.1:9000/api")
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:9000/api");
    }

    #[test]
    fn test_url_building_appends_under_base() {
        let client = ClinioClient::builder()
            .base_url("http://localhost:8000/api")
            .build()
            .unwrap();

        let url = client.url("/v1/auth/login/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/auth/login/");

        let url = client.url("/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/");
    }
}
