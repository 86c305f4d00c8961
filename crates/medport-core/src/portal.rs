//! Portal container
//!
//! Central wiring point: builds the HTTP client from configuration, owns the
//! session store and the API client, and exposes the login/logout flows.
//! Constructed once at application start and passed to call sites by Clone.

use serde::Serialize;
use tokio::task::JoinHandle;

use medport_client::{ApiClient, RequestOptions};
use medport_session::{AuthEvent, SessionStore};

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

pub struct Portal {
    config: Config,
    store: SessionStore,
    client: ApiClient,
}

impl Portal {
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| CoreError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let store = SessionStore::new();
        let client = ApiClient::with_http_client(http, config.base_url.clone(), store.clone());

        Ok(Self {
            config,
            store,
            client,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session_store(&self) -> &SessionStore {
        &self.store
    }

    /// Authenticate against the backend and establish a session from the
    /// returned token. The call itself runs unauthenticated and outside the
    /// 401 expiry flow.
    pub async fn login<T: Serialize>(&self, path: &str, credentials: &T) -> Result<()> {
        let options = RequestOptions::new()
            .json(credentials)?
            .skip_auth()
            .skip_auth_refresh();

        let response = self.client.post_with(path, options).await?;

        let token = response
            .json()
            .and_then(|body| body.get("token"))
            .and_then(|token| token.as_str())
            .ok_or(CoreError::MalformedLoginResponse)?;

        self.store.establish(token.to_string())?;

        Ok(())
    }

    /// Tell the backend the session is over, then clear it locally. The
    /// local session is cleared even when the server call fails.
    pub async fn logout(&self, path: &str) -> Result<()> {
        let result = self
            .client
            .post_with(path, RequestOptions::new().skip_auth_refresh())
            .await;

        self.store.clear();

        if let Err(e) = result {
            tracing::warn!(error = %e, "Logout request failed, session cleared locally");
        }

        Ok(())
    }

    /// Watch for session expiry and hand the configured login route to the
    /// handler. The handler performs the actual navigation; nothing in the
    /// transport layer does.
    pub fn spawn_expiry_observer<F>(&self, handler: F) -> JoinHandle<()>
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let mut events = self.store.subscribe();
        let login_route = self.config.login_route.clone();

        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(AuthEvent::SessionExpired) => {
                        tracing::info!(route = %login_route, "Session expired, requesting login redirect");
                        handler(&login_route);
                    }
                    Ok(_) => {}
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Auth event observer lagged");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

impl Clone for Portal {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            store: self.store.clone(),
            client: self.client.clone(),
        }
    }
}
