//! Session store
//!
//! Process-wide owner of the current session. Mutation is limited to
//! establish-on-login and clear-on-logout/expiry; every mutation emits an
//! [`AuthEvent`] on the broadcast channel.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::error::SessionError;
use crate::event::AuthEvent;
use crate::session::Session;
use crate::Result;

const EVENT_CHANNEL_CAPACITY: usize = 16;

pub struct SessionStore {
    /// Current session, if any
    session: Arc<RwLock<Option<Session>>>,
    /// Auth lifecycle events for observers (expiry listeners, UI)
    events: broadcast::Sender<AuthEvent>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            session: Arc::new(RwLock::new(None)),
            events,
        }
    }

    /// Create a session from a freshly issued credential (login path).
    /// Replaces any existing session.
    pub fn establish(&self, token: String) -> Result<Session> {
        let session = Session::new(token)?;
        *self.session.write() = Some(session.clone());

        tracing::info!(tab_id = %session.tab_id, "Session established");
        let _ = self.events.send(AuthEvent::SessionEstablished {
            tab_id: session.tab_id.clone(),
        });

        Ok(session)
    }

    /// Install an existing session (restored browsing context).
    pub fn adopt(&self, session: Session) {
        let tab_id = session.tab_id.clone();
        *self.session.write() = Some(session);

        tracing::info!(tab_id = %tab_id, "Session adopted");
        let _ = self.events.send(AuthEvent::SessionEstablished { tab_id });
    }

    /// Current bearer token, read on every outbound request.
    pub fn token(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.token.clone())
    }

    /// Identifier of the owning browsing context.
    pub fn tab_id(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.tab_id.clone())
    }

    pub fn current(&self) -> Result<Session> {
        self.session
            .read()
            .clone()
            .ok_or(SessionError::NotAuthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    /// Destroy the session deliberately (logout). No-op when already empty.
    pub fn clear(&self) {
        if self.session.write().take().is_some() {
            tracing::info!("Session cleared");
            let _ = self.events.send(AuthEvent::SessionCleared);
        }
    }

    /// Destroy the session because the server rejected it. No-op when
    /// already empty, so concurrent 401s expire the session exactly once.
    pub fn expire(&self) {
        if self.session.write().take().is_some() {
            tracing::warn!("Session expired by server");
            let _ = self.events.send(AuthEvent::SessionExpired);
        }
    }

    /// Subscribe to auth lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            events: self.events.clone(),
        }
    }
}
