//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Session error: {0}")]
    Session(#[from] medport_session::SessionError),

    #[error("Client error: {0}")]
    Client(#[from] medport_client::ClientError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Login response did not contain a token")]
    MalformedLoginResponse,
}
