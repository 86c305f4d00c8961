//! Session data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::Result;

#[derive(Clone, Serialize, Deserialize)]
pub struct Session {
    /// Identifier of the owning browsing context
    pub tab_id: String,
    /// Opaque bearer credential
    pub token: String,
    /// When the session was established
    pub established_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: String) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }

        Ok(Self {
            tab_id: Uuid::new_v4().to_string(),
            token,
            established_at: Utc::now(),
        })
    }
}

// The credential must never end up in logs, so Debug redacts it.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("tab_id", &self.tab_id)
            .field("token", &"<redacted>")
            .field("established_at", &self.established_at)
            .finish()
    }
}
