use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum HandleError {
    /// `hold()` was called on an object that can only be held through one of its handles
    InvalidOperation(&'static str),
    /// Smoothing half-life must be strictly positive
    InvalidHalfLife,
    /// Handle slot is not part of the configured handle list
    SlotOutOfBounds { slot: usize, len: usize },
}

impl std::error::Error for HandleError {}

impl Display for HandleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOperation(reason) => write!(f, "Invalid operation: {}", reason),
            Self::InvalidHalfLife => write!(f, "Smoothing half-life must be greater than zero"),
            Self::SlotOutOfBounds { slot, len } => write!(
                f,
                "Handle slot out of bounds (slot: {}, handles: {})",
                slot, len
            ),
        }
    }
}
