//! Portal configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::CoreError;
use crate::Result;

const DEFAULT_LOGIN_ROUTE: &str = "/login";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the portal backend API
    pub base_url: Url,
    /// Route the UI should navigate to when the session expires
    pub login_route: String,
    /// Overall per-request timeout
    pub request_timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
}

impl Config {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Build from environment: `MEDPORT_API_BASE_URL` (required),
    /// `MEDPORT_LOGIN_ROUTE` and `MEDPORT_REQUEST_TIMEOUT_SECS` (optional).
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("MEDPORT_API_BASE_URL")
            .map_err(|_| CoreError::Config("MEDPORT_API_BASE_URL is not set".to_string()))?;
        let base_url = Url::parse(&base_url)
            .map_err(|e| CoreError::Config(format!("Invalid MEDPORT_API_BASE_URL: {}", e)))?;

        let mut config = Self::new(base_url);

        if let Ok(route) = std::env::var("MEDPORT_LOGIN_ROUTE") {
            if !route.trim().is_empty() {
                config.login_route = route;
            }
        }

        if let Ok(secs) = std::env::var("MEDPORT_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| CoreError::Config("Invalid MEDPORT_REQUEST_TIMEOUT_SECS".to_string()))?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
