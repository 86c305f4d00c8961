//! MedPort API Client
//!
//! Authenticated request client for the portal backend:
//! - Bearer token and tab-context headers attached from the session store
//! - Identical concurrent requests collapse into one network call
//! - Uniform JSON response and error normalization
//! - On 401, the session is expired through the store; observers of the
//!   store's event channel handle the redirect to login
//!
//! The client is constructed once at application start and handed to call
//! sites by cheap `Clone` - there is no global instance.

mod client;
mod error;
mod request;
mod response;

pub use client::{ApiClient, headers};
pub use error::ClientError;
pub use request::RequestOptions;
pub use response::{ApiResponse, ResponseBody};

pub type Result<T> = std::result::Result<T, ClientError>;
