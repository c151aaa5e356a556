pub mod data;
pub mod pipeline;

pub use data::*;
pub use pipeline::*;
