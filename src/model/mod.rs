pub mod common;
pub mod document;
pub mod listing;
pub mod query;

pub use common::*;
pub use document::*;
pub use listing::*;
pub use query::*;
