use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::temporal::DateValue;

/// One typed value within a table.
///
/// `Missing` marks "value not available" and is a distinct variant, never a
/// zero or an empty string. `NotANumber` tags an undefined numeric result
/// (for example an indeterminate division); it is present data, not a
/// missing value, and the two predicates never overlap:
/// `Cell::NotANumber.is_missing()` is `false` and
/// `Cell::Missing.is_not_a_number()` is `false`.
///
/// The derived `PartialEq` is structural: `Missing == Missing` holds, which
/// is what sentinel matching and test assertions need. Three-valued
/// "unknown" equality lives in [`Cell::semantic_eq`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// A numeric value.
    Number(f64),
    /// A text value.
    Text(String),
    /// A boolean value.
    Boolean(bool),
    /// A calendar day.
    Date(DateValue),
    /// An undefined numeric result.
    NotANumber,
    /// Value not available.
    Missing,
}

impl Cell {
    /// Whether this cell is `Missing`.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Whether this cell is `NotANumber`. Always `false` for `Missing`.
    pub fn is_not_a_number(&self) -> bool {
        matches!(self, Cell::NotANumber)
    }

    /// Whether this cell carries a present value (neither `Missing` nor
    /// `NotANumber` counts as absent; only `Missing` does).
    pub fn is_present(&self) -> bool {
        !self.is_missing()
    }

    /// The numeric payload, if this is a `Number`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text payload, if this is a `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean payload, if this is a `Boolean`.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Cell::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The date payload, if this is a `Date`.
    pub fn as_date(&self) -> Option<DateValue> {
        match self {
            Cell::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Short kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Cell::Number(_) => "number",
            Cell::Text(_) => "text",
            Cell::Boolean(_) => "boolean",
            Cell::Date(_) => "date",
            Cell::NotANumber => "not-a-number",
            Cell::Missing => "missing",
        }
    }

    /// Three-valued equality: `None` when either side is `Missing` (the
    /// comparison is unknown), otherwise `Some` of the structural answer,
    /// except that `NotANumber` never equals anything, itself included.
    pub fn semantic_eq(&self, other: &Cell) -> Option<bool> {
        match (self, other) {
            (Cell::Missing, _) | (_, Cell::Missing) => None,
            (Cell::NotANumber, _) | (_, Cell::NotANumber) => Some(false),
            (a, b) => Some(a == b),
        }
    }

    /// Element-wise addition with missing-value propagation.
    pub fn checked_add(&self, other: &Cell) -> Result<Cell> {
        self.numeric_op(other, "add", |a, b| a + b)
    }

    /// Element-wise subtraction with missing-value propagation.
    pub fn checked_sub(&self, other: &Cell) -> Result<Cell> {
        self.numeric_op(other, "subtract", |a, b| a - b)
    }

    /// Element-wise multiplication with missing-value propagation.
    pub fn checked_mul(&self, other: &Cell) -> Result<Cell> {
        self.numeric_op(other, "multiply", |a, b| a * b)
    }

    /// Element-wise division. A zero divisor yields `NotANumber` rather
    /// than an error or an infinity.
    pub fn checked_div(&self, other: &Cell) -> Result<Cell> {
        match (self, other) {
            (Cell::Missing, _) | (_, Cell::Missing) => Ok(Cell::Missing),
            (_, Cell::Number(d)) if *d == 0.0 => match self {
                Cell::Number(_) | Cell::NotANumber => Ok(Cell::NotANumber),
                _ => Err(self.mismatch(other, "divide")),
            },
            _ => self.numeric_op(other, "divide", |a, b| a / b),
        }
    }

    /// Shared arithmetic kernel: `Missing` propagates, `NotANumber`
    /// propagates, two numbers compute (a NaN result is re-tagged
    /// `NotANumber`), and any other kind combination is a type mismatch.
    fn numeric_op<F>(&self, other: &Cell, verb: &str, f: F) -> Result<Cell>
    where
        F: FnOnce(f64, f64) -> f64,
    {
        match (self, other) {
            (Cell::Missing, _) | (_, Cell::Missing) => Ok(Cell::Missing),
            (Cell::NotANumber, Cell::Number(_) | Cell::NotANumber)
            | (Cell::Number(_), Cell::NotANumber) => Ok(Cell::NotANumber),
            (Cell::Number(a), Cell::Number(b)) => {
                let result = f(*a, *b);
                if result.is_nan() {
                    Ok(Cell::NotANumber)
                } else {
                    Ok(Cell::Number(result))
                }
            }
            _ => Err(self.mismatch(other, verb)),
        }
    }

    fn mismatch(&self, other: &Cell, verb: &str) -> Error {
        Error::TypeMismatch(format!(
            "cannot {} {} and {}",
            verb,
            self.kind_name(),
            other.kind_name()
        ))
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Boolean(b) => write!(f, "{}", b),
            Cell::Date(d) => write!(f, "{}", d),
            Cell::NotANumber => write!(f, "NaN"),
            Cell::Missing => write!(f, "NA"),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Cell::NotANumber
        } else {
            Cell::Number(value)
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Boolean(value)
    }
}

impl From<DateValue> for Cell {
    fn from(value: DateValue) -> Self {
        Cell::Date(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Cell::Missing,
        }
    }
}
