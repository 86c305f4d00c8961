//! MedPort Core
//!
//! Wires the session store and the API client together behind a single
//! [`Portal`] container, owns configuration, and hosts the observer that
//! turns session-expiry events into a login redirect request.

mod config;
mod error;
mod portal;

pub use config::Config;
pub use error::CoreError;
pub use portal::Portal;

// Re-export the component crates
pub use medport_client::{ApiClient, ApiResponse, ClientError, RequestOptions, ResponseBody};
pub use medport_session::{AuthEvent, Session, SessionError, SessionStore};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
