//! The `Table` data structure: an ordered collection of named, typed
//! columns of equal length.
//!
//! Every operation borrows the table and returns a new value; there is no
//! aliasing between the input and the result, so mutating (by rebinding)
//! one table can never affect another. A `Table` is a plain owned value;
//! callers wanting to use one from several threads clone it first.

pub mod sort;
pub mod transform;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::{Error, Result};

pub use self::sort::{SortDirection, SortKey};
pub use self::transform::RecodeRule;

/// One named column of cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Column {
    name: String,
    cells: Vec<Cell>,
}

/// An in-memory table of named, typed columns sharing one row count.
///
/// Invariants: every column's length equals the row count, and column
/// names are unique. Both are enforced at every construction point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table with no columns and no rows.
    pub fn new() -> Self {
        Table {
            columns: Vec::new(),
        }
    }

    /// Build a table from `(name, cells)` pairs.
    ///
    /// Fails with `InconsistentRowCount` if the sequences have unequal
    /// lengths, or `DuplicateColumnName` if a name repeats. Column order
    /// follows the input order.
    pub fn from_columns<N, I>(pairs: I) -> Result<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Vec<Cell>)>,
    {
        let mut table = Table::new();
        for (name, cells) in pairs {
            let name = name.into();
            if table.contains_column(&name) {
                return Err(Error::DuplicateColumnName(name));
            }
            let expected = table.row_count();
            if !table.columns.is_empty() && cells.len() != expected {
                return Err(Error::InconsistentRowCount {
                    name,
                    expected,
                    found: cells.len(),
                });
            }
            table.columns.push(Column { name, cells });
        }
        Ok(table)
    }

    /// Number of rows. An empty table has zero rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Whether a column with this name exists.
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// The cells of a named column, in row order.
    pub fn get_column(&self, name: &str) -> Result<&[Cell]> {
        self.column_position(name)
            .map(|i| self.columns[i].cells.as_slice())
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// A view over one row, addressed by position.
    pub fn row(&self, index: usize) -> Result<RowView<'_>> {
        if index >= self.row_count() {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.row_count(),
            });
        }
        Ok(RowView { table: self, index })
    }

    /// Iterate over all rows in order.
    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> {
        (0..self.row_count()).map(move |index| RowView { table: self, index })
    }

    /// Keep only the rows for which `predicate` returns true, preserving
    /// their original relative order.
    pub fn select_rows<F>(&self, predicate: F) -> Table
    where
        F: Fn(&RowView) -> bool,
    {
        let keep: Vec<usize> = self
            .rows()
            .filter(|row| predicate(row))
            .map(|row| row.index)
            .collect();
        self.take_rows(&keep)
    }

    /// Return a table with `name` set to `cells`: overwritten in place if
    /// the column exists (position preserved), appended at the end if not.
    ///
    /// Fails with `InconsistentRowCount` if `cells` does not match the row
    /// count of a non-empty table.
    pub fn with_column<N: Into<String>>(&self, name: N, cells: Vec<Cell>) -> Result<Table> {
        let name = name.into();
        if !self.columns.is_empty() && cells.len() != self.row_count() {
            return Err(Error::InconsistentRowCount {
                name,
                expected: self.row_count(),
                found: cells.len(),
            });
        }
        let mut result = self.clone();
        match result.column_position(&name) {
            Some(i) => result.columns[i].cells = cells,
            None => result.columns.push(Column { name, cells }),
        }
        Ok(result)
    }

    /// Rename a column, addressed by name.
    ///
    /// Fails with `ColumnNotFound` if `old_name` is absent and
    /// `DuplicateColumnName` if `new_name` is already used by another
    /// column. Renaming a column to its own name is a no-op.
    pub fn rename_column<N: Into<String>>(&self, old_name: &str, new_name: N) -> Result<Table> {
        let index = self
            .column_position(old_name)
            .ok_or_else(|| Error::ColumnNotFound(old_name.to_string()))?;
        self.rename_column_at(index, new_name)
    }

    /// Rename a column, addressed by position.
    pub fn rename_column_at<N: Into<String>>(&self, index: usize, new_name: N) -> Result<Table> {
        let new_name = new_name.into();
        if index >= self.columns.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.columns.len(),
            });
        }
        if self
            .columns
            .iter()
            .enumerate()
            .any(|(i, c)| i != index && c.name == new_name)
        {
            return Err(Error::DuplicateColumnName(new_name));
        }
        let mut result = self.clone();
        result.columns[index].name = new_name;
        Ok(result)
    }

    fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Materialize a new table holding the rows at `indices`, in the
    /// order given. Callers pass valid indices only.
    pub(crate) fn take_rows(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|col| Column {
                name: col.name.clone(),
                cells: indices.iter().map(|&i| col.cells[i].clone()).collect(),
            })
            .collect();
        Table { columns }
    }
}

/// A borrowed view over one row of a table.
#[derive(Clone, Copy)]
pub struct RowView<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> RowView<'a> {
    /// Position of this row within its table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The cell in the named column, or `None` if the column is absent.
    pub fn get(&self, name: &str) -> Option<&'a Cell> {
        self.table
            .column_position(name)
            .map(|i| &self.table.columns[i].cells[self.index])
    }

    /// The cell in the named column, failing with `ColumnNotFound`.
    pub fn cell(&self, name: &str) -> Result<&'a Cell> {
        self.get(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// The numeric value in the named column, if present and a number.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Cell::as_number)
    }

    /// The text value in the named column, if present and text.
    pub fn text(&self, name: &str) -> Option<&'a str> {
        self.get(name).and_then(Cell::as_text)
    }

    /// The boolean value in the named column, if present and a boolean.
    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Cell::as_boolean)
    }

    /// The date value in the named column, if present and a date.
    pub fn date(&self, name: &str) -> Option<crate::temporal::DateValue> {
        self.get(name).and_then(Cell::as_date)
    }
}
