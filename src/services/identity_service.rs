use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::IdentityConfig;
use crate::middleware::auth_context::AuthenticatedUser;

const USER_ENDPOINT: &str = "auth/v1/user";

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity provider is not configured")]
    NotConfigured,
    #[error("invalid identity provider url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("identity provider unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),
    #[error("identity provider answered {0}")]
    Upstream(StatusCode),
}

/// Resolves a bearer token to the user it belongs to.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, IdentityError>;
}

#[derive(Debug, Deserialize)]
struct IdentityUser {
    id: String,
    email: Option<String>,
}

/// Token introspection against a hosted auth service (`GET /auth/v1/user`).
pub struct HttpIdentityProvider {
    http_client: reqwest::Client,
    user_url: Url,
    api_key: String,
}

impl HttpIdentityProvider {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, IdentityError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http_client,
            user_url: base.join(USER_ENDPOINT)?,
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let url = config.url.as_deref().ok_or(IdentityError::NotConfigured)?;
        Self::new(url, config.api_key.clone())
    }

    pub fn user_url(&self) -> &Url {
        &self.user_url
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, IdentityError> {
        let response = self
            .http_client
            .get(self.user_url.clone())
            .bearer_auth(token)
            .header("apikey", &self.api_key)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let user: IdentityUser = response.json().await?;
                Ok(AuthenticatedUser {
                    user_id: user.id,
                    email: user.email,
                })
            }
            status if status.is_client_error() => Err(IdentityError::InvalidToken),
            status => Err(IdentityError::Upstream(status)),
        }
    }
}

/// Used when no identity provider is configured.
pub struct UnconfiguredIdentityProvider;

#[async_trait]
impl IdentityProvider for UnconfiguredIdentityProvider {
    async fn authenticate(&self, _token: &str) -> Result<AuthenticatedUser, IdentityError> {
        Err(IdentityError::NotConfigured)
    }
}
