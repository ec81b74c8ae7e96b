//! Catalog types.

mod campaign;
mod product;

pub use campaign::*;
pub use product::*;
