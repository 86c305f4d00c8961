//! MedPort Session Management
//!
//! A session binds one authenticated browsing context ("tab") to an opaque
//! bearer credential. The store is the single owner of that state:
//! - Created on login, read on every outbound request
//! - Destroyed on logout or on an authentication rejection from the server
//! - In-memory only, process lifetime, no durability
//!
//! Session expiry is reported through a broadcast event channel rather than
//! by navigating anywhere: the HTTP client stays transport-only and a
//! higher-level observer decides how to react.

mod error;
mod event;
mod session;
mod store;

pub use error::SessionError;
pub use event::AuthEvent;
pub use session::Session;
pub use store::SessionStore;

pub type Result<T> = std::result::Result<T, SessionError>;
