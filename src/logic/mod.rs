pub mod properties;
pub mod sampling;

pub use properties::*;
pub use sampling::*;
