//! Authenticated request client
//!
//! One `ApiClient` per application, cloned freely. Concurrent requests that
//! resolve to the same de-duplication key share a single network call: the
//! first caller spawns the call on its own task and installs a shared handle
//! to it in the in-flight map, later callers await the same handle, and the
//! entry is removed on settle on every exit path. Because the call runs on
//! its own task it completes even if every waiter drops early, so no entry
//! can outlive its request.

use futures_util::future::{BoxFuture, Shared};
use futures_util::FutureExt;
use parking_lot::Mutex;
use reqwest::{header, Method, StatusCode};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

use medport_session::SessionStore;

use crate::error::ClientError;
use crate::request::RequestOptions;
use crate::response::{ApiResponse, ResponseBody};
use crate::Result;

/// Header names and values the portal backend expects on every call.
pub mod headers {
    /// Anti-CSRF marker header
    pub const X_REQUESTED_WITH: &str = "X-Requested-With";
    pub const X_REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";
    /// Identifies the browsing context that owns the session
    pub const X_TAB_ID: &str = "X-Tab-Id";
    pub const CACHE_CONTROL_VALUE: &str = "no-cache, no-store, must-revalidate";
    pub const PRAGMA_VALUE: &str = "no-cache";
}

type SharedResponse = Shared<BoxFuture<'static, Result<ApiResponse>>>;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    store: SessionStore,
    /// In-flight requests keyed by method+URL (+body hash when present).
    /// Invariant: an entry is removed before its future settles.
    in_flight: Arc<Mutex<HashMap<String, SharedResponse>>>,
}

impl ApiClient {
    pub fn new(base_url: Url, store: SessionStore) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url, store)
    }

    /// Use a pre-configured `reqwest::Client` (timeouts, proxies).
    pub fn with_http_client(http: reqwest::Client, base_url: Url, store: SessionStore) -> Self {
        Self {
            http,
            base_url,
            store,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session_store(&self) -> &SessionStore {
        &self.store
    }

    /// Number of requests currently in flight (for invariant checks).
    pub fn in_flight_len(&self) -> usize {
        self.in_flight.lock().len()
    }

    // === Verb wrappers ===

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.request(Method::GET, path, RequestOptions::new()).await
    }

    pub async fn get_with(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.request(Method::GET, path, options).await
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<ApiResponse> {
        self.request(Method::POST, path, RequestOptions::new().json(body)?)
            .await
    }

    pub async fn post_with(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.request(Method::POST, path, options).await
    }

    pub async fn put<T: Serialize>(&self, path: &str, body: &T) -> Result<ApiResponse> {
        self.request(Method::PUT, path, RequestOptions::new().json(body)?)
            .await
    }

    pub async fn put_with(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.request(Method::PUT, path, options).await
    }

    pub async fn patch<T: Serialize>(&self, path: &str, body: &T) -> Result<ApiResponse> {
        self.request(Method::PATCH, path, RequestOptions::new().json(body)?)
            .await
    }

    pub async fn patch_with(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.request(Method::PATCH, path, options).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.request(Method::DELETE, path, RequestOptions::new())
            .await
    }

    pub async fn delete_with(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.request(Method::DELETE, path, options).await
    }

    /// Issue a request, collapsing into an identical in-flight one if it
    /// exists. All callers of a collapsed request receive the same outcome.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        let url = self.resolve(path)?;
        let key = dedup_key(&method, &url, options.body.as_ref())?;

        let shared = {
            let mut in_flight = self.in_flight.lock();
            if let Some(existing) = in_flight.get(&key) {
                tracing::debug!(method = %method, url = %url, "Joined in-flight request");
                existing.clone()
            } else {
                let client = self.clone();
                let entry_key = key.clone();
                // Spawned so the call runs to completion even if every
                // waiter drops early; the entry is removed on settle
                // regardless of who is still listening.
                let task = tokio::spawn(async move {
                    let result = client.execute(method, url, options).await;
                    client.in_flight.lock().remove(&entry_key);
                    result
                });

                let future = async move {
                    match task.await {
                        Ok(result) => result,
                        Err(e) => Err(ClientError::Network(format!("Request task failed: {}", e))),
                    }
                }
                .boxed()
                .shared();

                in_flight.insert(key, future.clone());
                future
            }
        };

        shared.await
    }

    /// Resolve a path against the base URL. Absolute URLs pass through.
    fn resolve(&self, path: &str) -> Result<Url> {
        if let Ok(url) = Url::parse(path) {
            return Ok(url);
        }

        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", path, e)))
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .header(headers::X_REQUESTED_WITH, headers::X_REQUESTED_WITH_VALUE)
            .header(header::CACHE_CONTROL, headers::CACHE_CONTROL_VALUE)
            .header(header::PRAGMA, headers::PRAGMA_VALUE);

        if !options.skip_auth {
            // Absent session sends no credential; the server's 401 then
            // drives the expiry flow
            if let Some(token) = self.store.token() {
                request = request.bearer_auth(token);
            }
            if let Some(tab_id) = self.store.tab_id() {
                request = request.header(headers::X_TAB_ID, tab_id);
            }
        }

        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &options.body {
            request = request.json(body);
        }

        tracing::debug!(method = %method, url = %url, "Issuing request");

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        self.normalize(response, &url, options.skip_auth_refresh)
            .await
    }

    async fn normalize(
        &self,
        response: reqwest::Response,
        url: &Url,
        skip_auth_refresh: bool,
    ) -> Result<ApiResponse> {
        let status = response.status();
        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("application/json"))
            .unwrap_or(false);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if status.is_success() {
            let body = if is_json {
                match serde_json::from_slice(&bytes) {
                    Ok(value) => ResponseBody::Json(value),
                    // Mislabeled content-type falls back to raw bytes
                    Err(_) => ResponseBody::Raw(bytes),
                }
            } else {
                ResponseBody::Raw(bytes)
            };

            return Ok(ApiResponse { status, body });
        }

        let body: Option<serde_json::Value> = serde_json::from_slice(&bytes).ok();

        if status == StatusCode::UNAUTHORIZED && !skip_auth_refresh {
            tracing::info!(url = %url, "Authentication rejected, expiring session");
            self.store.expire();
            return Err(ClientError::SessionExpired { body });
        }

        tracing::warn!(status = %status, url = %url, "Request failed");
        Err(ClientError::Http { status, body })
    }
}

impl Clone for ApiClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            store: self.store.clone(),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

/// Key for collapsing concurrent identical requests. Bodyless requests key
/// on method+URL; requests with a body also hash the serialized payload so
/// distinct mutations to the same endpoint never collapse.
fn dedup_key(method: &Method, url: &Url, body: Option<&serde_json::Value>) -> Result<String> {
    match body {
        None => Ok(format!("{}:{}", method, url)),
        Some(value) => {
            let serialized =
                serde_json::to_vec(value).map_err(|e| ClientError::Serialization(e.to_string()))?;
            let digest = Sha256::digest(&serialized);
            let mut hex = String::with_capacity(digest.len() * 2);
            for byte in digest {
                hex.push_str(&format!("{:02x}", byte));
            }
            Ok(format!("{}:{}:{}", method, url, hex))
        }
    }
}
