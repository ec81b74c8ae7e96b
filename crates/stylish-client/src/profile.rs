//! Member profile panel.

use std::sync::{Mutex, MutexGuard, PoisonError};
use stylish_auth::{AuthError, SignInForm, SignUpForm, TokenProvider};
use stylish_commerce::prelude::Profile;
use tracing::{info, warn};

/// Which form the panel shows to a visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignMode {
    #[default]
    SignIn,
    SignUp,
}

impl SignMode {
    pub fn toggled(self) -> Self {
        match self {
            SignMode::SignIn => SignMode::SignUp,
            SignMode::SignUp => SignMode::SignIn,
        }
    }
}

#[derive(Default)]
struct PanelState {
    mode: SignMode,
    profile: Option<Profile>,
}

/// Sign-in/sign-up forms and the loaded member profile.
pub struct ProfilePanel {
    tokens: TokenProvider,
    state: Mutex<PanelState>,
}

impl ProfilePanel {
    pub fn new(tokens: TokenProvider) -> Self {
        Self {
            tokens,
            state: Mutex::new(PanelState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn mode(&self) -> SignMode {
        self.state().mode
    }

    pub fn set_mode(&self, mode: SignMode) {
        self.state().mode = mode;
    }

    pub fn toggle_mode(&self) -> SignMode {
        let mut state = self.state();
        state.mode = state.mode.toggled();
        state.mode
    }

    /// The loaded profile, if any.
    pub fn profile(&self) -> Option<Profile> {
        self.state().profile.clone()
    }

    /// Whether a session token is stored.
    pub fn is_signed_in(&self) -> bool {
        self.tokens.current().is_some()
    }

    /// Load the profile of the current session, bootstrapping a token if
    /// none is stored.
    pub async fn load(&self) -> Result<Profile, AuthError> {
        let token = self.tokens.resolve().await?;
        let profile = self
            .tokens
            .api()
            .fetch_profile(&token)
            .await
            .map_err(|e| {
                warn!(error = %e, "profile request failed");
                AuthError::Rejected(e.user_message())
            })?;

        self.state().profile = Some(profile.clone());
        info!(email = %profile.email, "profile loaded");
        Ok(profile)
    }

    /// Sign in, then load the profile.
    pub async fn sign_in(&self, form: &SignInForm) -> Result<Profile, AuthError> {
        self.tokens.sign_in(form).await?;
        self.load().await
    }

    /// Register, then load the profile.
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<Profile, AuthError> {
        self.tokens.sign_up(form).await?;
        self.load().await
    }

    /// Forget the token and the loaded profile.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.tokens.sign_out()?;
        let mut state = self.state();
        state.profile = None;
        state.mode = SignMode::SignIn;
        Ok(())
    }
}
