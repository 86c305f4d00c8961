//! Session error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Session token cannot be empty")]
    EmptyToken,
}
