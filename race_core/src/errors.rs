//! Definitions for error types used throughout core.

use crate::{AuthError, EventClientError, StoreError, utils::validation::ValidationErrors};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// store error
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// events service error
    #[error("events service error: {0}")]
    Events(#[from] EventClientError),

    /// users service error
    #[error("authorization error: {0}")]
    Auth(#[from] AuthError),

    /// An addressed resource does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// A unique child already exists (second generation attempt,
    /// duplicate OK time event)
    #[error("{0}")]
    AlreadyExists(String),

    /// Input that cannot be planned or assigned
    #[error("{0}")]
    BadRequest(String),

    /// Generic collected validation errors holding stringified field names
    #[error("validation error: {0:?}")]
    Validation(#[from] ValidationErrors),

    /// The store holds state the invariants forbid
    #[error("inconsistent state: {0}")]
    Inconsistent(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::NotFound(_) | CoreError::Store(StoreError::NotFound)
        )
    }
    pub fn is_already_exists(&self) -> bool {
        matches!(self, CoreError::AlreadyExists(_))
    }
}
