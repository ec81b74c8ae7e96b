//! Catalog query context and paged results.

mod page;
mod query;

pub use page::*;
pub use query::*;
