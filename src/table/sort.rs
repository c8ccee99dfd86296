//! Stable multi-key row ordering.

use std::cmp::Ordering;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::table::Table;

/// Per-key sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One sort key: a column and a direction. A sort request is an ordered
/// sequence of keys; the first key is primary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

impl SortKey {
    /// Ascending key on the named column.
    pub fn asc<N: Into<String>>(column: N) -> Self {
        SortKey {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending key on the named column.
    pub fn desc<N: Into<String>>(column: N) -> Self {
        SortKey {
            column: column.into(),
            direction: SortDirection::Descending,
        }
    }
}

impl Table {
    /// Stable multi-key sort: keys are compared in sequence order and the
    /// first mismatch decides; ties keep their original relative order.
    ///
    /// `Missing` sorts after all present values regardless of direction;
    /// the direction reverses comparisons among present values only.
    /// `NotANumber` orders after all finite numbers and before `Missing`.
    /// A key column mixing present cell kinds (say numbers and text) is a
    /// `TypeMismatch`, detected before any reordering; an empty key list
    /// returns the table unchanged.
    pub fn sort(&self, keys: &[SortKey]) -> Result<Table> {
        if keys.is_empty() {
            return Ok(self.clone());
        }
        let key_columns: Vec<(&[Cell], SortDirection)> = keys
            .iter()
            .map(|key| {
                let cells = self.get_column(&key.column)?;
                check_uniform_kind(&key.column, cells)?;
                Ok((cells, key.direction))
            })
            .collect::<Result<_>>()?;

        debug!("sorting {} rows by {} keys", self.row_count(), keys.len());
        let mut indices: Vec<usize> = (0..self.row_count()).collect();
        indices.sort_by(|&a, &b| {
            for (cells, direction) in &key_columns {
                let ord = compare_cells(&cells[a], &cells[b], *direction);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });
        Ok(self.take_rows(&indices))
    }
}

/// Comparison class of a present cell; `Missing` has none.
fn kind_class(cell: &Cell) -> Option<&'static str> {
    match cell {
        Cell::Number(_) | Cell::NotANumber => Some("number"),
        Cell::Text(_) => Some("text"),
        Cell::Boolean(_) => Some("boolean"),
        Cell::Date(_) => Some("date"),
        Cell::Missing => None,
    }
}

/// Reject a key column whose present cells are not all of one kind.
fn check_uniform_kind(column: &str, cells: &[Cell]) -> Result<()> {
    let mut seen: Option<&'static str> = None;
    for cell in cells {
        if let Some(class) = kind_class(cell) {
            match seen {
                None => seen = Some(class),
                Some(first) if first != class => {
                    return Err(Error::TypeMismatch(format!(
                        "sort column '{}' mixes {} and {} cells",
                        column, first, class
                    )))
                }
                Some(_) => {}
            }
        }
    }
    Ok(())
}

fn compare_cells(a: &Cell, b: &Cell, direction: SortDirection) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = compare_present(a, b);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
    }
}

/// Ordering among present cells of one kind class.
fn compare_present(a: &Cell, b: &Cell) -> Ordering {
    match (a, b) {
        (Cell::Number(x), Cell::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (Cell::NotANumber, Cell::NotANumber) => Ordering::Equal,
        (Cell::NotANumber, Cell::Number(_)) => Ordering::Greater,
        (Cell::Number(_), Cell::NotANumber) => Ordering::Less,
        (Cell::Text(x), Cell::Text(y)) => x.cmp(y),
        (Cell::Boolean(x), Cell::Boolean(y)) => x.cmp(y),
        (Cell::Date(x), Cell::Date(y)) => x.cmp(y),
        // Kinds are validated before sorting starts.
        _ => Ordering::Equal,
    }
}
