use crate::response::EntityResponse;
use http::{HeaderMap, StatusCode};
use microcatalog_core::config::ApiConfig;
use microcatalog_core::error::{CatalogError, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Shared HTTP plumbing for the entity APIs.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CatalogError::Http(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Absolute URL of a resource path such as `api/teams`.
    pub fn resource_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Send a request and decode its JSON body, if any.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<EntityResponse<T>> {
        let (status, headers, bytes) = self.send(request).await?;
        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            Some(
                serde_json::from_slice(&bytes)
                    .map_err(|e| CatalogError::Decode(e.to_string()))?,
            )
        };
        Ok(EntityResponse {
            status,
            headers,
            body,
        })
    }

    /// Send a request whose response body is ignored.
    pub async fn execute_empty(&self, request: RequestBuilder) -> Result<EntityResponse<()>> {
        let (status, headers, _) = self.send(request).await?;
        Ok(EntityResponse {
            status,
            headers,
            body: None,
        })
    }

    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, HeaderMap, Vec<u8>)> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::Http(e.to_string()))?;

        let status = response.status();
        let url = response.url().to_string();
        let headers = response.headers().clone();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Http(e.to_string()))?
            .to_vec();

        debug!(url = %url, status = status.as_u16(), len = bytes.len(), "Backend response");

        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message: error_message(status, &bytes),
            });
        }
        Ok((status, headers, bytes))
    }
}

/// Best human-readable message from an error body: problem-details `detail`,
/// then `title`, then `message`, then the raw text, then the status reason.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(Value::Object(problem)) = serde_json::from_slice::<Value>(body) {
        for key in ["detail", "title", "message"] {
            if let Some(Value::String(msg)) = problem.get(key) {
                return msg.clone();
            }
        }
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if !text.is_empty() {
        return text.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("unknown status")
        .to_string()
}
