mod error;
mod runtime;
mod runtime_builder;
mod world;

pub use error::*;
pub use runtime::*;
pub use runtime_builder::*;
pub use world::*;
