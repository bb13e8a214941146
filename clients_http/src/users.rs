// implementation of the auth port against the users service

use anyhow::Result;
use async_trait::async_trait;
use race_core::{AuthError, AuthPort, AuthResult};
use tracing::{debug, instrument, warn};
use url::Url;

pub struct HttpUsersClient {
    base: Url,
    http: reqwest::Client,
}

impl HttpUsersClient {
    pub fn new(base: Url) -> Self {
        HttpUsersClient {
            base,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(crate::service_url(
            "USERS_HOST_SERVER",
            "USERS_HOST_PORT",
        )?))
    }
}

#[async_trait]
impl AuthPort for HttpUsersClient {
    #[instrument(name = "users.authorize", skip(self, token), fields(roles = ?roles))]
    async fn authorize(&self, token: Option<&str>, roles: &[&str]) -> AuthResult<()> {
        let url = self
            .base
            .join("/authorize")
            .map_err(|error| AuthError::Other(error.into()))?;
        let body = serde_json::json!({ "token": token, "roles": roles });
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|error| AuthError::Other(error.into()))?;

        match response.status().as_u16() {
            204 => {
                debug!("authorized");
                Ok(())
            }
            401 => Err(AuthError::Unauthorized),
            403 => Err(AuthError::Forbidden),
            status => {
                warn!(status, "unexpected_status");
                Err(AuthError::UnknownStatus(status))
            }
        }
    }
}
