//! Application state and controllers of the STYLiSH storefront client.
//!
//! - [`SessionStore`]: the cart and the session token, persisted on every change
//! - [`PaginationController`]: infinite-scroll product listing
//! - [`CheckoutSequencer`]: the checkout guard chain and order submission
//! - [`CarouselController`]: auto-advancing campaign banner
//! - [`ProfilePanel`]: member sign-in/up and profile
//!
//! Controllers are shared behind `Arc` and take `&self`. None of them hold a
//! lock across an `.await`.

mod carousel;
mod checkout;
mod error;
mod pager;
mod profile;
mod session;

#[cfg(test)]
mod fakes;

pub use carousel::{CarouselController, DEFAULT_INTERVAL};
pub use checkout::{CheckoutReceipt, CheckoutSequencer};
pub use error::{CheckoutError, PagerError, SessionError};
pub use pager::{PageOutcome, PagerPhase, PaginationController, SkipReason};
pub use profile::{ProfilePanel, SignMode};
pub use session::{SessionStore, CART_KEY, TOKEN_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CarouselController, CheckoutError, CheckoutReceipt, CheckoutSequencer, PageOutcome,
        PagerError, PagerPhase, PaginationController, ProfilePanel, SessionError, SessionStore,
        SignMode, SkipReason,
    };
}
