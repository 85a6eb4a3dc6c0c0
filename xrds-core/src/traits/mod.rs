mod handle;
mod object;

pub use handle::*;
pub use object::*;
