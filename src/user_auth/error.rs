//! Auth gate error taxonomy.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Username already registered
    #[error("username already registered: {0}")]
    Conflict(String),

    /// Bad credentials, or a missing/invalid/expired token. The message is
    /// for logs only; clients get one generic body.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(name) => AuthError::Conflict(name),
            StoreError::Database(e) => AuthError::Internal(format!("Store failure: {}", e)),
        }
    }
}
