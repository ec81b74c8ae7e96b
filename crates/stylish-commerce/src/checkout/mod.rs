//! Checkout types.

mod order;
mod recipient;

pub use order::*;
pub use recipient::*;
