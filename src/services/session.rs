use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::{error::AppError, models::principal::Principal};

use super::{
    credentials::TokenStore,
    identity::{IdentityProvider, ProviderSession},
};

/// `Unknown` until the first restore resolves, then `Anonymous` or
/// `Authenticated`. Login and signup move `Anonymous → Authenticated`,
/// logout the reverse. There are no other transitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Unknown,
    Anonymous,
    Authenticated(Principal),
}

impl SessionState {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            SessionState::Authenticated(principal) => Some(principal),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, SessionState::Unknown)
    }
}

/// Tracks the current principal and owns every write to the persisted
/// bearer token. Concurrent sign-in attempts are not coordinated; the last
/// one to finish wins.
#[derive(Clone)]
pub struct SessionService {
    provider: Arc<dyn IdentityProvider>,
    tokens: TokenStore,
    state: Arc<watch::Sender<SessionState>>,
}

impl SessionService {
    pub fn new(provider: Arc<dyn IdentityProvider>, tokens: TokenStore) -> Self {
        let (state, _) = watch::channel(SessionState::Unknown);
        Self {
            provider,
            tokens,
            state: Arc::new(state),
        }
    }

    /// Resolve the initial `Unknown` state by asking the provider for the
    /// current principal. Persists the refreshed token, or removes a stale
    /// one if nobody is signed in.
    pub async fn restore(&self) -> Result<SessionState, AppError> {
        match self.provider.restore().await? {
            Some(session) => {
                self.tokens.save(&session.token).await?;
                let next = SessionState::Authenticated(session.principal);
                self.transition(next.clone());
                Ok(next)
            }
            None => {
                self.tokens.clear().await?;
                self.transition(SessionState::Anonymous);
                Ok(SessionState::Anonymous)
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Principal, AppError> {
        let session = self.provider.login(email, password).await?;
        self.finish_sign_in(session).await
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<Principal, AppError> {
        let session = self.provider.signup(email, password).await?;
        self.finish_sign_in(session).await
    }

    async fn finish_sign_in(&self, session: ProviderSession) -> Result<Principal, AppError> {
        self.tokens.save(&session.token).await?;
        info!(uid = %session.principal.uid, "session established");
        self.transition(SessionState::Authenticated(session.principal.clone()));
        Ok(session.principal)
    }

    /// The provider call is best effort; the persisted token is always
    /// removed and the session always ends up anonymous.
    pub async fn logout(&self) -> Result<(), AppError> {
        if let Err(err) = self.provider.logout().await {
            warn!("identity provider logout failed: {err}");
        }
        self.tokens.clear().await?;
        self.transition(SessionState::Anonymous);
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Watch session transitions; dependent work can await the first
    /// resolved state before fetching anything.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn transition(&self, next: SessionState) {
        self.state.send_replace(next);
    }
}
