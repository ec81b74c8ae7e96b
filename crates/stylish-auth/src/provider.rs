//! Session-token resolution.

use crate::{AuthError, SignInForm, SignUpForm};
use std::sync::Arc;
use stylish_commerce::account::SessionToken;
use stylish_data::{AuthApi, FetchError};
use tracing::{info, warn};

/// Durable home of the session token.
pub trait TokenStore: Send + Sync {
    /// The stored token, if any.
    fn load_token(&self) -> Option<SessionToken>;

    /// Persist a token, replacing any previous one.
    fn store_token(&self, token: &SessionToken) -> Result<(), AuthError>;

    /// Forget the stored token.
    fn clear_token(&self) -> Result<(), AuthError>;
}

/// Reads, acquires and forgets the session token.
///
/// Once a token is stored it is reused for every authenticated call until
/// [`sign_out`](Self::sign_out). There is no client-side expiry.
#[derive(Clone)]
pub struct TokenProvider {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn TokenStore>,
}

impl TokenProvider {
    pub fn new(api: Arc<dyn AuthApi>, store: Arc<dyn TokenStore>) -> Self {
        Self { api, store }
    }

    /// The stored token, without bootstrapping.
    pub fn current(&self) -> Option<SessionToken> {
        self.store.load_token().filter(|t| !t.is_empty())
    }

    /// The stored token, or a freshly bootstrapped one.
    ///
    /// A bootstrapped token is persisted before it is returned.
    pub async fn resolve(&self) -> Result<SessionToken, AuthError> {
        if let Some(token) = self.current() {
            return Ok(token);
        }

        info!("no stored session token, bootstrapping");
        let token = self.api.bootstrap_token().await.map_err(|e| {
            warn!(error = %e, "token bootstrap failed");
            AuthError::Bootstrap(e.user_message())
        })?;

        self.store.store_token(&token)?;
        Ok(token)
    }

    /// Sign in with a validated form and persist the token.
    pub async fn sign_in(&self, form: &SignInForm) -> Result<SessionToken, AuthError> {
        let credentials = form.validate()?;
        let token = self.api.sign_in(&credentials).await.map_err(rejected)?;
        self.store.store_token(&token)?;
        info!(provider = credentials.provider(), "signed in");
        Ok(token)
    }

    /// Register with a validated form and persist the token.
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<SessionToken, AuthError> {
        form.validate()?;
        let token = self
            .api
            .sign_up(form.name.trim(), form.email.trim(), &form.password)
            .await
            .map_err(rejected)?;
        self.store.store_token(&token)?;
        info!("signed up");
        Ok(token)
    }

    /// Forget the stored token.
    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.store.clear_token()?;
        info!("signed out");
        Ok(())
    }

    pub fn api(&self) -> &Arc<dyn AuthApi> {
        &self.api
    }
}

fn rejected(e: FetchError) -> AuthError {
    warn!(error = %e, "authentication request rejected");
    AuthError::Rejected(e.user_message())
}
