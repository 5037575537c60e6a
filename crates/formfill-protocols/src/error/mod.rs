//! Error types for the formfill protocol layer.

mod fill;
mod page;
mod store;

pub use fill::*;
pub use page::*;
pub use store::*;
