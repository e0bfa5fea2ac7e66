//! HTTP plumbing for the todo-list API: URL construction, auth headers and
//! the status-code to error-kind mapping.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::ApiClientConfig;
use crate::constants::USER_ID_HEADER;
use crate::error::{TodoError, TodoResult};

/// Remote data source speaking the JSON API
///
/// Every request carries the configured bearer token plus the caller id in
/// `X-User-Id`. Failures are never retried.
#[derive(Clone)]
pub struct TodoApiClient {
    client: Client,
    config: ApiClientConfig,
    base_url: Url,
}

impl std::fmt::Debug for TodoApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout_ms", &self.config.timeout_ms)
            .field("auth_configured", &!self.config.bearer_token.is_empty())
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl TodoApiClient {
    pub fn new(config: ApiClientConfig) -> TodoResult<Self> {
        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| TodoError::Configuration(format!("Invalid base URL: {e}")))?;
        // a trailing slash keeps any path prefix when joining endpoint paths
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if !config.bearer_token.is_empty() {
            let value = HeaderValue::from_str(&format!("Bearer {}", config.bearer_token))
                .map_err(|e| TodoError::Configuration(format!("Invalid bearer token: {e}")))?;
            default_headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(format!("todolist-web/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(default_headers)
            .build()
            .map_err(|e| TodoError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        info!(
            base_url = %config.base_url,
            timeout_ms = config.timeout_ms,
            "Created todo-list API client"
        );

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub(crate) fn url(&self, path: &str, query: &[(&str, String)]) -> TodoResult<Url> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TodoError::Configuration(format!("Failed to construct URL: {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, user_id: &str) -> RequestBuilder {
        self.client.request(method, url).header(USER_ID_HEADER, user_id)
    }

    async fn send(&self, builder: RequestBuilder, operation: &str) -> TodoResult<Response> {
        let response = builder.send().await.map_err(|e| {
            error!(operation, error = %e, "Request to todo-list API failed");
            TodoError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(operation, status = %status, "API call succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .unwrap_or(body);
        error!(operation, status = %status, error = %message, "API call failed");
        Err(status_error(status, message))
    }

    async fn decode<T: DeserializeOwned>(response: Response, operation: &str) -> TodoResult<T> {
        let bytes = response.bytes().await.map_err(TodoError::from)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            error!(operation, error = %e, "Failed to parse API response");
            TodoError::ResponseFormat(format!("Failed to parse {operation} response: {e}"))
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        user_id: &str,
        operation: &str,
    ) -> TodoResult<T> {
        debug!(url = %url, operation, "GET");
        let response = self
            .send(self.request(Method::GET, url, user_id), operation)
            .await?;
        Self::decode(response, operation).await
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        url: Url,
        body: &B,
        user_id: &str,
        operation: &str,
    ) -> TodoResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!(url = %url, method = %method, operation, "Sending JSON request");
        let response = self
            .send(self.request(method, url, user_id).json(body), operation)
            .await?;
        Self::decode(response, operation).await
    }

    /// For endpoints answering 204 or an ignorable body
    pub(crate) async fn send_no_content<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        user_id: &str,
        operation: &str,
    ) -> TodoResult<()>
    where
        B: Serialize + ?Sized + Sync,
    {
        debug!(url = %url, method = %method, operation, "Sending request");
        let mut builder = self.request(method, url, user_id);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(builder, operation).await?;
        Ok(())
    }
}

pub(crate) fn status_error(status: StatusCode, message: String) -> TodoError {
    match status {
        StatusCode::NOT_FOUND => TodoError::NotFound(message),
        StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => TodoError::Authorization(message),
        StatusCode::BAD_REQUEST => TodoError::Validation(message),
        other => TodoError::ResponseFormat(format!("Unexpected status {other}: {message}")),
    }
}
