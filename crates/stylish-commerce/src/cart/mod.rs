//! Shopping cart types.

mod cart;
mod pricing;

pub use cart::*;
pub use pricing::*;
