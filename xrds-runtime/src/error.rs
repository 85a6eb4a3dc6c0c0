use core::fmt;
use std::error::Error;

#[derive(Debug)]
pub enum RuntimeError {
    InvalidTickRate,
    Handler(anyhow::Error),
    Io(std::io::Error),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTickRate => write!(f, "Tick rate must be greater than zero"),
            Self::Handler(e) => write!(f, "Runtime handler failed: {}", e),
            Self::Io(e) => write!(f, "Runtime I/O error: {}", e),
        }
    }
}

impl Error for RuntimeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTickRate => None,
            Self::Handler(e) => Some(&**e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<anyhow::Error> for RuntimeError {
    fn from(value: anyhow::Error) -> Self {
        Self::Handler(value)
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
