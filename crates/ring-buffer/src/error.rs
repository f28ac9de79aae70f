//! Buffer Error Types

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors returned by buffer operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Capacity must be at least one slot
    #[error("Invalid buffer capacity: {0}")]
    InvalidCapacity(usize),

    /// Read attempted with nothing available
    #[error("Buffer empty: no samples to read")]
    Empty,

    /// Write refused under the reject policy
    #[error("Buffer full: capacity {capacity} reached")]
    Full { capacity: usize },
}

/// Last condition recorded by a [`GuardedBuffer`](crate::GuardedBuffer)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Nothing recorded
    #[default]
    None,
    /// A write overwrote the oldest entry
    Overflow,
    /// A read found the buffer empty
    Underflow,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::None => write!(f, "No errors detected"),
            ErrorKind::Overflow => write!(f, "Last error: Buffer Overflow"),
            ErrorKind::Underflow => write!(f, "Last error: Buffer Underflow"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_messages() {
        assert_eq!(ErrorKind::None.to_string(), "No errors detected");
        assert_eq!(ErrorKind::Overflow.to_string(), "Last error: Buffer Overflow");
        assert_eq!(ErrorKind::Underflow.to_string(), "Last error: Buffer Underflow");
        assert_eq!(ErrorKind::default(), ErrorKind::None);
    }

    #[test]
    fn test_buffer_error_messages() {
        assert_eq!(
            BufferError::Full { capacity: 10 }.to_string(),
            "Buffer full: capacity 10 reached"
        );
        assert_eq!(
            BufferError::InvalidCapacity(0).to_string(),
            "Invalid buffer capacity: 0"
        );
    }
}
