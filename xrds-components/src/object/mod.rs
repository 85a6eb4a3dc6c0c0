mod anchor_handle;
mod handled_object;

pub use anchor_handle::*;
pub use handled_object::*;
