//! Session-token resolution and member credential forms.
//!
//! [`TokenProvider`] is the single place that reads, bootstraps, stores and
//! clears the session token. Storage is abstracted by [`TokenStore`] so the
//! application state can own persistence.

mod error;
mod form;
mod provider;

pub use error::AuthError;
pub use form::{FormField, SignInForm, SignUpForm};
pub use provider::{TokenProvider, TokenStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{AuthError, FormField, SignInForm, SignUpForm, TokenProvider, TokenStore};
}
