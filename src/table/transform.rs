//! Column derivation, conditional recoding, and missing-value operations.

use log::debug;

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::table::{RowView, Table};

/// One recoding rule: rows matching `predicate` receive `value`.
///
/// Rules are evaluated in order per row and the first match wins. Rows
/// matching no rule keep whatever value they already have, so sequential
/// [`Table::recode`] calls accumulate: a later call only touches the rows
/// its own rules match and never resets earlier assignments.
pub struct RecodeRule {
    predicate: Box<dyn Fn(&RowView) -> bool>,
    value: Cell,
}

impl RecodeRule {
    /// Build a rule from a row predicate and the value to assign.
    pub fn new<F, V>(predicate: F, value: V) -> Self
    where
        F: Fn(&RowView) -> bool + 'static,
        V: Into<Cell>,
    {
        RecodeRule {
            predicate: Box::new(predicate),
            value: value.into(),
        }
    }

    fn matches(&self, row: &RowView) -> bool {
        (self.predicate)(row)
    }
}

impl Table {
    /// Compute a column element-wise from the other columns of this table.
    ///
    /// The result is placed under `name` with the same overwrite-or-append
    /// rule as [`Table::with_column`]. The derivation function sees a
    /// [`RowView`] and typically combines cells with the checked arithmetic
    /// on [`Cell`], so a `Missing` operand yields a `Missing` result rather
    /// than an error.
    pub fn derive<N, F>(&self, name: N, f: F) -> Result<Table>
    where
        N: Into<String>,
        F: Fn(&RowView) -> Result<Cell>,
    {
        let mut cells = Vec::with_capacity(self.row_count());
        for row in self.rows() {
            cells.push(f(&row)?);
        }
        self.with_column(name, cells)
    }

    /// Derive `name` as the per-row sum of the named numeric columns.
    ///
    /// Any `Missing` operand makes that row's sum `Missing`; `NotANumber`
    /// propagates; a non-numeric column is a `TypeMismatch`.
    pub fn sum_across<N: Into<String>>(&self, name: N, columns: &[&str]) -> Result<Table> {
        // Resolve names up front so a typo fails before any work.
        for column in columns {
            if !self.contains_column(column) {
                return Err(Error::ColumnNotFound(column.to_string()));
            }
        }
        self.derive(name, |row| {
            let mut acc = Cell::Number(0.0);
            for column in columns {
                acc = acc.checked_add(row.cell(column)?)?;
            }
            Ok(acc)
        })
    }

    /// Apply recoding rules to `column`, first match per row wins.
    ///
    /// Rows matching no rule keep their existing value; where the column
    /// does not exist yet, unmatched rows are `Missing` and the column is
    /// appended. See [`RecodeRule`] for the accumulation policy.
    pub fn recode(&self, column: &str, rules: &[RecodeRule]) -> Result<Table> {
        let existing: Vec<Cell> = match self.get_column(column) {
            Ok(cells) => cells.to_vec(),
            Err(_) => vec![Cell::Missing; self.row_count()],
        };
        let mut cells = Vec::with_capacity(self.row_count());
        for (row, current) in self.rows().zip(existing) {
            let recoded = rules
                .iter()
                .find(|rule| rule.matches(&row))
                .map(|rule| rule.value.clone());
            cells.push(recoded.unwrap_or(current));
        }
        self.with_column(column, cells)
    }

    /// Replace every cell of `column` equal to `sentinel` with `Missing`.
    pub fn replace_with_missing(&self, column: &str, sentinel: &Cell) -> Result<Table> {
        let cells = self
            .get_column(column)?
            .iter()
            .map(|c| {
                if c == sentinel {
                    Cell::Missing
                } else {
                    c.clone()
                }
            })
            .collect();
        self.with_column(column, cells)
    }

    /// Replace every `Missing` cell of `column` with `value`.
    pub fn fill_missing<V: Into<Cell>>(&self, column: &str, value: V) -> Result<Table> {
        let value = value.into();
        let cells = self
            .get_column(column)?
            .iter()
            .map(|c| {
                if c.is_missing() {
                    value.clone()
                } else {
                    c.clone()
                }
            })
            .collect();
        self.with_column(column, cells)
    }

    /// Keep only the rows with no `Missing` cell in any column, order
    /// preserved. `NotANumber` is present data and survives.
    pub fn drop_incomplete_rows(&self) -> Table {
        let keep: Vec<usize> = self
            .rows()
            .filter(|row| {
                self.column_names()
                    .iter()
                    .all(|name| row.get(name).map_or(true, Cell::is_present))
            })
            .map(|row| row.index())
            .collect();
        debug!(
            "drop_incomplete_rows: keeping {} of {} rows",
            keep.len(),
            self.row_count()
        );
        self.take_rows(&keep)
    }

    /// Number of `Missing` cells in `column`.
    pub fn missing_count(&self, column: &str) -> Result<usize> {
        Ok(self
            .get_column(column)?
            .iter()
            .filter(|c| c.is_missing())
            .count())
    }

    /// Number of present (non-`Missing`) cells in `column`.
    pub fn present_count(&self, column: &str) -> Result<usize> {
        Ok(self.row_count() - self.missing_count(column)?)
    }

    /// Sum of a numeric column.
    ///
    /// With `ignore_missing` false, any `Missing` cell makes the result
    /// `Missing`; with true, `Missing` cells are excluded entirely (never
    /// treated as zero). A `NotANumber` cell makes the result
    /// `NotANumber`. Non-numeric cells are a `TypeMismatch`.
    pub fn sum(&self, column: &str, ignore_missing: bool) -> Result<Cell> {
        self.aggregate(column, ignore_missing, |values| {
            Cell::Number(values.iter().sum())
        })
    }

    /// Mean of a numeric column, with the same `ignore_missing` semantics
    /// as [`Table::sum`]. A mean over zero surviving values is `Missing`.
    pub fn mean(&self, column: &str, ignore_missing: bool) -> Result<Cell> {
        self.aggregate(column, ignore_missing, |values| {
            if values.is_empty() {
                Cell::Missing
            } else {
                Cell::Number(values.iter().sum::<f64>() / values.len() as f64)
            }
        })
    }

    /// Shared aggregation kernel: validates the column is numeric, applies
    /// the missing-value policy, then hands the surviving values to `f`.
    fn aggregate<F>(&self, column: &str, ignore_missing: bool, f: F) -> Result<Cell>
    where
        F: FnOnce(&[f64]) -> Cell,
    {
        let mut values = Vec::new();
        let mut saw_missing = false;
        let mut saw_nan = false;
        for cell in self.get_column(column)? {
            match cell {
                Cell::Number(n) => values.push(*n),
                Cell::NotANumber => saw_nan = true,
                Cell::Missing => saw_missing = true,
                other => {
                    return Err(Error::TypeMismatch(format!(
                        "cannot aggregate {} cell in column '{}'",
                        other.kind_name(),
                        column
                    )))
                }
            }
        }
        if saw_missing && !ignore_missing {
            return Ok(Cell::Missing);
        }
        if saw_nan {
            return Ok(Cell::NotANumber);
        }
        Ok(f(&values))
    }
}
