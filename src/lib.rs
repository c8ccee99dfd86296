//! tabrs: a small in-memory tabular data transformation engine.
//!
//! The single data structure is [`Table`], an ordered collection of named,
//! typed columns of equal length. Operations cover column derivation,
//! conditional recoding, renaming, missing-value semantics, calendar-day
//! parsing/formatting/arithmetic, and stable multi-key sorting. Every
//! operation is a pure function returning a new `Table`.
//!
//! File I/O, display, and persistence are a caller's concern; this crate
//! only computes.

pub mod cell;
pub mod error;
pub mod table;
pub mod temporal;

// Re-export commonly used types
pub use cell::Cell;
pub use error::{Error, Result};
pub use table::{RecodeRule, RowView, SortDirection, SortKey, Table};
pub use temporal::{
    difference_in_units, format_date, month_name, parse_date, subtract, today, weekday_name,
    Clock, DateValue, SystemClock, TimeUnit,
};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
