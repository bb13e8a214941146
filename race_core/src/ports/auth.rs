// users service port

use async_trait::async_trait;
use thiserror::Error;

/// Authorization against the remote users service. The service answers
/// 204 (ok), 401 (unauthorized) or 403 (forbidden) for a token and a set
/// of required roles; anything else is an upstream failure.
#[async_trait]
pub trait AuthPort: Send + Sync {
    async fn authorize(&self, token: Option<&str>, roles: &[&str]) -> AuthResult<()>;
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// token missing, expired or invalid
    #[error("not authenticated")]
    Unauthorized,

    /// token valid but lacks a required role
    #[error("not authorized")]
    Forbidden,

    /// upstream answered outside its contract
    #[error("got unknown status {0} from users service")]
    UnknownStatus(u16),

    // transport errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type AuthResult<T> = Result<T, AuthError>;
