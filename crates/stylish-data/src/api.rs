//! Contracts of the external collaborators the client consumes.
//!
//! Each trait is implemented over HTTP in production and by in-memory
//! fakes in tests.

use crate::FetchError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stylish_commerce::prelude::*;

/// Product catalog and marketing content.
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// One page of a category listing.
    async fn fetch_by_category(
        &self,
        category: &str,
        cursor: &Cursor,
    ) -> Result<ProductPage, FetchError>;

    /// One page of keyword search results.
    async fn search_by_keyword(
        &self,
        keyword: &str,
        cursor: &Cursor,
    ) -> Result<ProductPage, FetchError>;

    /// A single product by id.
    async fn fetch_product(&self, id: &ProductId) -> Result<Product, FetchError>;

    /// Campaigns shown in the home page carousel.
    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, FetchError>;
}

/// Sign-in credentials, tagged by provider on the wire.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum Credentials {
    /// Email and password.
    Native { email: String, password: String },
    /// Access token issued by Facebook login.
    Facebook { access_token: String },
}

impl Credentials {
    pub fn native(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Native {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn facebook(access_token: impl Into<String>) -> Self {
        Credentials::Facebook {
            access_token: access_token.into(),
        }
    }

    /// Provider name as sent to the API.
    pub fn provider(&self) -> &'static str {
        match self {
            Credentials::Native { .. } => "native",
            Credentials::Facebook { .. } => "facebook",
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Native { email, .. } => f
                .debug_struct("Native")
                .field("email", email)
                .field("password", &"***")
                .finish(),
            Credentials::Facebook { .. } => f
                .debug_struct("Facebook")
                .field("access_token", &"***")
                .finish(),
        }
    }
}

/// Member authentication.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Acquire a token without user interaction (guest checkout).
    async fn bootstrap_token(&self) -> Result<SessionToken, FetchError>;

    /// Sign in with existing credentials.
    async fn sign_in(&self, credentials: &Credentials) -> Result<SessionToken, FetchError>;

    /// Register a new member and sign them in.
    async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SessionToken, FetchError>;

    /// Profile of the member owning `token`.
    async fn fetch_profile(&self, token: &SessionToken) -> Result<Profile, FetchError>;
}

/// Order submission.
#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn submit_order(
        &self,
        payload: &CheckoutPayload,
        token: &SessionToken,
    ) -> Result<OrderConfirmation, FetchError>;
}

/// Result of a payment tokenization request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentProof {
    /// Zero on success.
    pub status: i32,
    /// One-time proof ("prime"), present on success.
    #[serde(default)]
    pub prime: Option<String>,
    /// Provider message explaining a failure.
    #[serde(default, rename = "msg")]
    pub message: Option<String>,
}

impl PaymentProof {
    pub fn accepted(prime: impl Into<String>) -> Self {
        Self {
            status: 0,
            prime: Some(prime.into()),
            message: None,
        }
    }

    pub fn rejected(status: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            prime: None,
            message: Some(message.into()),
        }
    }

    /// The proof, if tokenization succeeded.
    pub fn prime(&self) -> Option<&str> {
        if self.status == 0 {
            self.prime.as_deref().filter(|p| !p.is_empty())
        } else {
            None
        }
    }
}

/// Third-party card tokenization.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Whether the card input fields are complete and valid.
    async fn is_ready(&self) -> bool;

    /// Exchange the card fields for a one-time payment proof.
    async fn request_payment_proof(&self) -> Result<PaymentProof, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_credentials_wire_format() {
        let json = serde_json::to_value(Credentials::native("ada@test.com", "secret")).unwrap();
        assert_eq!(json["provider"], "native");
        assert_eq!(json["email"], "ada@test.com");
        assert_eq!(json["password"], "secret");
    }

    #[test]
    fn test_facebook_credentials_wire_format() {
        let creds = Credentials::facebook("fb-token");
        assert_eq!(creds.provider(), "facebook");

        let json = serde_json::to_value(creds).unwrap();
        assert_eq!(json["provider"], "facebook");
        assert_eq!(json["access_token"], "fb-token");
    }

    #[test]
    fn test_credentials_debug_redacted() {
        let debug = format!("{:?}", Credentials::native("ada@test.com", "secret"));
        assert!(debug.contains("ada@test.com"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_payment_proof_prime() {
        assert_eq!(PaymentProof::accepted("p1").prime(), Some("p1"));
        assert_eq!(PaymentProof::rejected(915, "card declined").prime(), None);

        let odd = PaymentProof {
            status: 0,
            prime: Some(String::new()),
            message: None,
        };
        assert_eq!(odd.prime(), None);
    }
}
