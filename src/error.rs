//! Error types for lane vector operations

use thiserror::Error;

use crate::element::ElementKind;

/// Result type for lane vector operations
pub type Result<T> = std::result::Result<T, LaneError>;

/// Errors that can occur while building or operating on lane vectors
///
/// Every error is raised before a result value is produced, so a failed
/// operation never leaves a partially written vector or memory region behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LaneError {
    /// Shape bit width is unknown or does not hold a whole number of lanes
    #[error("Unsupported shape: {bits} bits")]
    UnsupportedShape {
        /// Requested shape width in bits
        bits: usize,
    },

    /// Integer division with a zero divisor in an active lane
    #[error("Division by zero in lane {lane}")]
    DivideByZero {
        /// First offending lane
        lane: usize,
    },

    /// Shuffle or index lane that does not name a source lane
    #[error("Invalid permutation: lane {lane} has source index {index}")]
    InvalidPermutation {
        /// Destination lane
        lane: usize,
        /// Raw source index carried by that lane
        index: i64,
    },

    /// Slice origin outside `[0, length)`
    #[error("Invalid origin {origin} for vector of {length} lanes")]
    InvalidOrigin {
        /// Requested origin
        origin: usize,
        /// Lane count of the vector
        length: usize,
    },

    /// Part selector outside its permitted range
    #[error("Invalid part {part} (limit {limit})")]
    InvalidPart {
        /// Requested part
        part: i32,
        /// Number of valid parts
        limit: usize,
    },

    /// Memory access or lane index outside the addressed region
    #[error("Index out of bounds: range [{index}, {index} + {size}) exceeds length {length}")]
    IndexOutOfBounds {
        /// Start of the access
        index: i64,
        /// Number of addressed elements (or bytes)
        size: usize,
        /// Length of the region
        length: usize,
    },

    /// Store into a read-only memory region
    #[error("Target memory region is read-only")]
    ReadOnlyTarget,

    /// Conversion between kinds the vector cannot take part in
    #[error("Unsupported conversion from {from} to {to}")]
    UnsupportedConversion {
        /// Source element kind
        from: ElementKind,
        /// Destination element kind
        to: ElementKind,
    },

    /// Operator not defined for the element kind (e.g. bitwise ops on floats)
    #[error("Operator {op} is not supported for {kind} lanes")]
    UnsupportedOperator {
        /// Operator name
        op: &'static str,
        /// Element kind of the vector
        kind: ElementKind,
    },

    /// Wide scalar that cannot be represented exactly by the element kind
    #[error("Value {value} is not representable as {kind}")]
    UnrepresentableScalar {
        /// Offending value
        value: i64,
        /// Target element kind
        kind: ElementKind,
    },

    /// Lane count mismatch between operands
    #[error("Size mismatch: expected {expected}, got {actual}")]
    SizeMismatch {
        /// Expected lane count
        expected: usize,
        /// Actual lane count
        actual: usize,
    },

    /// Operands built from species of different shapes
    #[error("Shape mismatch: expected {expected} bits, got {actual} bits")]
    ShapeMismatch {
        /// Expected shape width in bits
        expected: usize,
        /// Actual shape width in bits
        actual: usize,
    },

    /// Mask with more lanes than a `u64` bit pattern can hold
    #[error("Mask of {lanes} lanes does not fit a 64-bit pattern")]
    MaskTooWide {
        /// Lane count of the mask
        lanes: usize,
    },
}

impl LaneError {
    pub(crate) fn out_of_bounds(index: i64, size: usize, length: usize) -> Self {
        LaneError::IndexOutOfBounds {
            index,
            size,
            length,
        }
    }
}
