//! Payment gateway for terminal and sandbox use.

use crate::api::{PaymentGateway, PaymentProof};
use crate::FetchError;
use async_trait::async_trait;

/// Status reported when no card has been tokenized.
pub const STATUS_NO_PRIME: i32 = -1;

/// A [`PaymentGateway`] holding a prime issued ahead of time.
///
/// There are no card fields outside the browser SDK, so readiness means a
/// prime was configured.
#[derive(Debug, Clone, Default)]
pub struct PresetPrimeGateway {
    prime: Option<String>,
}

impl PresetPrimeGateway {
    pub fn new(prime: Option<String>) -> Self {
        Self {
            prime: prime.filter(|p| !p.trim().is_empty()),
        }
    }
}

#[async_trait]
impl PaymentGateway for PresetPrimeGateway {
    async fn is_ready(&self) -> bool {
        self.prime.is_some()
    }

    async fn request_payment_proof(&self) -> Result<PaymentProof, FetchError> {
        Ok(match &self.prime {
            Some(prime) => PaymentProof::accepted(prime.clone()),
            None => PaymentProof::rejected(STATUS_NO_PRIME, "no payment prime configured"),
        })
    }
}
