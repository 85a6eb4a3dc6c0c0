mod object;
mod smoothing;

pub use object::*;
pub use smoothing::*;
