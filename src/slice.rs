// src/slice.rs

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::source::Source;
use crate::table::{SourceTable, YearRow};

/// The selected year is not one of the table's years.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("year {year} is not in the table (available: {first}..={last})")]
    YearNotFound { year: i32, first: i32, last: i32 },
}

/// What the charts need for one selected year.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct YearSlice<'a> {
    pub year: i32,
    /// Values of the selected year, in `Source::ALL` order.
    pub values: [f64; Source::COUNT],
    /// Rows from the first year up to and including the selected one.
    pub trend: &'a [YearRow],
}

impl YearSlice<'_> {
    pub fn value(&self, source: Source) -> f64 {
        self.values[source.index()]
    }

    pub fn trend_years(&self) -> Vec<i32> {
        self.trend.iter().map(|r| r.year).collect()
    }

    /// One source's values across the trend rows.
    pub fn trend_column(&self, source: Source) -> Vec<f64> {
        self.trend.iter().map(|r| r.value(source)).collect()
    }
}

/// Slice `table` at `year`.
///
/// The trend ends at the first row holding `year`; rows are unique and ascending
/// so this is every row with a year `<= year`.
pub fn compute_slice(table: &SourceTable, year: i32) -> Result<YearSlice<'_>, SelectionError> {
    let pos = table
        .position(year)
        .ok_or(SelectionError::YearNotFound {
            year,
            first: table.min_year(),
            last: table.max_year(),
        })?;
    let rows = table.rows();
    debug!(year, trend_rows = pos + 1, "computed year slice");
    Ok(YearSlice {
        year,
        values: rows[pos].values,
        trend: &rows[..=pos],
    })
}
