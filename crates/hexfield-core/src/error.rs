//! Error type shared by the hexfield crates.

use std::fmt;

/// Errors raised by invalid arguments to hex geometry operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexError {
    /// A direction index outside `0..=5`.
    InvalidDirection(i32),
}

impl fmt::Display for HexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDirection(i) => {
                write!(f, "invalid hex direction index {i}: expected 0..=5")
            }
        }
    }
}

impl std::error::Error for HexError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_index() {
        let e = HexError::InvalidDirection(7);
        assert_eq!(e.to_string(), "invalid hex direction index 7: expected 0..=5");
    }
}
