//! Authentication lifecycle events
//!
//! Broadcast by the [`SessionStore`](crate::SessionStore) so that transport
//! code never has to know about UI concerns like redirecting to login.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuthEvent {
    /// A session was created (login or restore)
    SessionEstablished { tab_id: String },
    /// The session was cleared deliberately (logout)
    SessionCleared,
    /// The server rejected the credential; observers should send the user
    /// back to login
    SessionExpired,
}
