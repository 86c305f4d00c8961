//! Per-request options
//!
//! Mirrors what callers of the portal client actually tune: a JSON body,
//! extra headers, and the two escape flags - `skip_auth` for login/register
//! calls that run before a session exists, and `skip_auth_refresh` to keep
//! the 401 expiry flow from looping when its own calls fail.

use serde::Serialize;

use crate::error::ClientError;
use crate::Result;

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// JSON payload, serialized into the request body
    pub body: Option<serde_json::Value>,
    /// Additional headers on top of the standard set
    pub headers: Vec<(String, String)>,
    /// Do not attach credentials (login/register)
    pub skip_auth: bool,
    /// Do not run the 401 session-expiry flow
    pub skip_auth_refresh: bool,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body =
            Some(serde_json::to_value(body).map_err(|e| ClientError::Serialization(e.to_string()))?);
        Ok(self)
    }

    /// Add a header to this request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn skip_auth(mut self) -> Self {
        self.skip_auth = true;
        self
    }

    pub fn skip_auth_refresh(mut self) -> Self {
        self.skip_auth_refresh = true;
        self
    }
}
