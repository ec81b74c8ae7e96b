//! Member account types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bearer credential for authenticated API calls.
///
/// Opaque to the client. Acquired by sign-in, sign-up or guest bootstrap
/// and reused until explicitly cleared. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the raw token for an `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Check if the token is blank.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// A member's public profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Avatar URL.
    #[serde(rename = "picture", default)]
    pub picture_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_debug_is_redacted() {
        let token = SessionToken::new("eyJhbGciOi.secret");
        assert_eq!(format!("{:?}", token), "SessionToken(***)");
        assert_eq!(token.expose(), "eyJhbGciOi.secret");
    }

    #[test]
    fn test_token_blank() {
        assert!(SessionToken::new("  ").is_empty());
        assert!(!SessionToken::new("abc").is_empty());
    }

    #[test]
    fn test_profile_from_api() {
        let json = r#"{"provider":"native","name":"Ada","email":"ada@test.com","picture":"https://cdn/ada.png"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.picture_url.as_deref(), Some("https://cdn/ada.png"));
    }
}
