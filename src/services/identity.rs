use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::warn;
use url::Url;

use crate::{error::AppError, models::principal::Principal};

/// A resolved provider session: who the user is plus a short-lived bearer
/// token for API calls.
#[derive(Debug, Clone)]
pub struct ProviderSession {
    pub principal: Principal,
    pub token: String,
}

/// Capability interface over the external identity provider, so any
/// provider (or a fake in tests) can stand in.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the session persisted by the provider itself, refreshing the
    /// bearer token. `None` means nobody is signed in.
    async fn restore(&self) -> Result<Option<ProviderSession>, AppError>;
    async fn login(&self, email: &str, password: &str) -> Result<ProviderSession, AppError>;
    async fn signup(&self, email: &str, password: &str) -> Result<ProviderSession, AppError>;
    async fn logout(&self) -> Result<(), AppError>;
}

const SESSION_FILE: &str = "provider_session.json";

/// Talks to an email/password token service over HTTP and keeps its own
/// session (uid, email, refresh token) under the data root so `restore`
/// can mint a fresh bearer token after a process restart.
pub struct HttpIdentityProvider {
    base: Url,
    http: Client,
    root: Arc<PathBuf>,
}

#[derive(Serialize, Deserialize)]
struct StoredSession {
    uid: String,
    email: String,
    refresh_token: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    uid: String,
    email: String,
    id_token: String,
    refresh_token: String,
}

impl TokenResponse {
    fn into_session(self) -> ProviderSession {
        ProviderSession {
            principal: Principal {
                uid: self.uid,
                email: self.email,
            },
            token: self.id_token,
        }
    }
}

#[derive(Serialize)]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

impl HttpIdentityProvider {
    pub fn new(base: Url, data_root: PathBuf) -> Self {
        Self {
            base,
            http: Client::new(),
            root: Arc::new(data_root),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        let raw = format!("{}/{}", self.base.as_str().trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|err| AppError::Config(format!("invalid identity url: {err}")))
    }

    fn session_path(&self) -> PathBuf {
        self.root.join(SESSION_FILE)
    }

    async fn exchange(&self, path: &str, body: impl Serialize) -> Result<TokenResponse, AppError> {
        let response = self
            .http
            .post(self.endpoint(path)?)
            .json(&body)
            .send()
            .await
            .map_err(|err| AppError::Auth(format!("identity provider unreachable: {err}")))?;
        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AppError::Auth(if message.is_empty() {
                "invalid credentials".to_string()
            } else {
                message
            }));
        }
        response
            .json()
            .await
            .map_err(|err| AppError::Auth(format!("malformed provider response: {err}")))
    }

    async fn remember(&self, response: &TokenResponse) -> Result<(), AppError> {
        let stored = StoredSession {
            uid: response.uid.clone(),
            email: response.email.clone(),
            refresh_token: response.refresh_token.clone(),
        };
        let data = serde_json::to_vec(&stored).map_err(|err| AppError::Other(err.into()))?;
        fs::create_dir_all(&*self.root).await?;
        fs::write(self.session_path(), data).await?;
        Ok(())
    }

    async fn forget(&self) -> Result<(), AppError> {
        let path = self.session_path();
        if fs::try_exists(&path).await? {
            fs::remove_file(path).await?;
        }
        Ok(())
    }

    async fn stored_session(&self) -> Result<Option<StoredSession>, AppError> {
        let path = self.session_path();
        if !fs::try_exists(&path).await? {
            return Ok(None);
        }
        let raw = fs::read(&path).await?;
        match serde_json::from_slice(&raw) {
            Ok(stored) => Ok(Some(stored)),
            Err(err) => {
                warn!(path = %path.display(), "discarding unreadable provider session: {err}");
                self.forget().await?;
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn restore(&self) -> Result<Option<ProviderSession>, AppError> {
        let Some(stored) = self.stored_session().await? else {
            return Ok(None);
        };
        let response = self
            .http
            .post(self.endpoint("v1/refresh")?)
            .json(&RefreshRequest {
                refresh_token: &stored.refresh_token,
            })
            .send()
            .await
            .map_err(|err| AppError::Auth(format!("identity provider unreachable: {err}")))?;
        if !response.status().is_success() {
            // A rejected refresh token means the provider session is gone;
            // resolve to anonymous instead of failing startup.
            warn!(
                "provider session refresh rejected ({})",
                response.status()
            );
            self.forget().await?;
            return Ok(None);
        }
        let body: TokenResponse = response
            .json()
            .await
            .map_err(|err| AppError::Auth(format!("malformed provider response: {err}")))?;
        self.remember(&body).await?;
        Ok(Some(body.into_session()))
    }

    async fn login(&self, email: &str, password: &str) -> Result<ProviderSession, AppError> {
        let response = self
            .exchange("v1/login", PasswordRequest { email, password })
            .await?;
        self.remember(&response).await?;
        Ok(response.into_session())
    }

    async fn signup(&self, email: &str, password: &str) -> Result<ProviderSession, AppError> {
        let response = self
            .exchange("v1/signup", PasswordRequest { email, password })
            .await?;
        self.remember(&response).await?;
        Ok(response.into_session())
    }

    async fn logout(&self) -> Result<(), AppError> {
        self.forget().await?;
        let response = self
            .http
            .post(self.endpoint("v1/logout")?)
            .send()
            .await
            .map_err(|err| AppError::Auth(format!("identity provider unreachable: {err}")))?;
        if !response.status().is_success() {
            return Err(AppError::Auth(format!(
                "provider logout returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}
