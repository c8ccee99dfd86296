use thiserror::Error;

/// Unified error type for all table and date operations.
///
/// Every fallible operation in the crate reports through this enum,
/// synchronously, at the call site. Missing-value propagation is a designed
/// outcome of cell arithmetic and never surfaces here.
#[derive(Error, Debug)]
pub enum Error {
    /// A column's length does not match the table's row count.
    #[error("inconsistent row count for column '{name}': expected {expected}, found {found}")]
    InconsistentRowCount {
        name: String,
        expected: usize,
        found: usize,
    },

    /// A referenced column does not exist.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// A positional index is past the end of the table.
    #[error("index out of bounds: index {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    /// A column name is already in use.
    #[error("duplicate column name: {0}")]
    DuplicateColumnName(String),

    /// Date text did not match its format pattern, or the pattern itself
    /// is malformed.
    #[error("format error: {0}")]
    Format(String),

    /// Incompatible cell kinds were compared or combined.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// A calendar component is impossible (month 13, day 32, ...).
    #[error("value out of range: {0}")]
    OutOfRange(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
