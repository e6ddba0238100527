#![forbid(unsafe_code)]

//! Rejection reasons for field transitions.
//!
//! None of these reach the host API as failures. A rejected transition
//! leaves the field untouched and carries the reason so the controller can
//! log it.

/// Why a field event was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinError {
    /// Number mode received something other than ASCII digits.
    NonNumericValue(String),
    /// The event named a cell past the end of the field.
    CellOutOfRange { cell: usize, length: usize },
    /// The event targeted a cell ahead of the typing position.
    CellDisabled(usize),
    /// A delete arrived while no cell holds focus.
    NoFocusedCell,
    /// The entered character would fuse with a neighbouring cell's into a
    /// single grapheme once the value is joined.
    MergesWithNeighbour(usize),
}

impl std::fmt::Display for PinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonNumericValue(value) => write!(f, "not numeric: {value:?}"),
            Self::CellOutOfRange { cell, length } => {
                write!(f, "cell {cell} out of range for length {length}")
            }
            Self::CellDisabled(cell) => write!(f, "cell {cell} is disabled"),
            Self::NoFocusedCell => write!(f, "no cell has focus"),
            Self::MergesWithNeighbour(cell) => {
                write!(f, "cell {cell} would merge with a neighbouring cell")
            }
        }
    }
}

impl std::error::Error for PinError {}
