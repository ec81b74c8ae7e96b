//! Checkout sequencing.

use crate::{CheckoutError, SessionStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use stylish_auth::{AuthError, TokenProvider};
use stylish_commerce::prelude::{CheckoutPayload, Order, OrderNumber, OrderTotals, Recipient};
use stylish_data::{OrderApi, PaymentGateway};
use tracing::{info, warn};

/// What the confirmation view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub order_number: OrderNumber,
    pub totals: OrderTotals,
}

/// Holds the single-flight flag until dropped.
struct FlightGuard<'a>(&'a AtomicBool);

impl<'a> FlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightGuard(flag))
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs one checkout attempt as an ordered chain of checks.
///
/// The chain stops at the first failure:
///
/// 1. resolve the session token (bootstrapping one if none is stored)
/// 2. the cart has at least one line
/// 3. every recipient field is filled, then phone and email are well formed
/// 4. the payment fields are ready
/// 5. the payment provider issues a proof
/// 6. totals are computed from the cart
/// 7. the order is submitted
/// 8. the ordered lines are removed from the cart
///
/// Only one attempt runs at a time.
pub struct CheckoutSequencer {
    session: Arc<SessionStore>,
    tokens: TokenProvider,
    payments: Arc<dyn PaymentGateway>,
    orders: Arc<dyn OrderApi>,
    in_progress: AtomicBool,
}

impl CheckoutSequencer {
    pub fn new(
        session: Arc<SessionStore>,
        tokens: TokenProvider,
        payments: Arc<dyn PaymentGateway>,
        orders: Arc<dyn OrderApi>,
    ) -> Self {
        Self {
            session,
            tokens,
            payments,
            orders,
            in_progress: AtomicBool::new(false),
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Place an order for the current cart.
    ///
    /// On failure the cart is unchanged and the attempt may be repeated.
    pub async fn checkout(&self, recipient: &Recipient) -> Result<CheckoutReceipt, CheckoutError> {
        let Some(_guard) = FlightGuard::acquire(&self.in_progress) else {
            warn!("checkout already in progress");
            return Err(CheckoutError::AlreadyInProgress);
        };

        let result = self.run(recipient).await;
        if let Err(e) = &result {
            warn!(error = %e, "checkout stopped");
        }
        result
    }

    async fn run(&self, recipient: &Recipient) -> Result<CheckoutReceipt, CheckoutError> {
        let token = self.tokens.resolve().await.map_err(|e| match e {
            AuthError::Storage(reason) => CheckoutError::Storage(reason),
            AuthError::Bootstrap(reason) | AuthError::Rejected(reason) => {
                CheckoutError::Authentication(reason)
            }
            other => CheckoutError::Authentication(other.to_string()),
        })?;

        let cart = self.session.cart();
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        if let Some(field) = recipient.first_missing_field() {
            return Err(CheckoutError::MissingRecipientField(field));
        }
        if let Some(field) = recipient.first_malformed_field() {
            return Err(CheckoutError::InvalidRecipientField(field));
        }

        if !self.payments.is_ready().await {
            return Err(CheckoutError::PaymentNotReady);
        }

        let proof = self.payments.request_payment_proof().await.map_err(|e| {
            warn!(error = %e, "payment proof request failed");
            CheckoutError::PaymentRejected { status: -1 }
        })?;
        let Some(prime) = proof.prime() else {
            warn!(status = proof.status, message = ?proof.message, "payment rejected");
            return Err(CheckoutError::PaymentRejected {
                status: proof.status,
            });
        };

        let order = Order::new(&cart, recipient.clone())?;
        let totals = order.totals();
        let payload = CheckoutPayload {
            payment_proof: prime.to_string(),
            order,
        };

        let confirmation = self
            .orders
            .submit_order(&payload, &token)
            .await
            .map_err(|e| CheckoutError::Submission(e.user_message()))?;

        // The order exists now; a storage failure must not hide that.
        if let Err(e) = self.session.settle_order(&cart) {
            warn!(error = %e, "could not persist cart after checkout");
        }

        info!(
            order_number = %confirmation.order_number,
            total = totals.total.amount(),
            lines = cart.line_count(),
            "order placed"
        );

        Ok(CheckoutReceipt {
            order_number: confirmation.order_number,
            totals,
        })
    }
}
