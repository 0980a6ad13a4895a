// src/table.rs

use arrow::{
    array::{ArrayRef, Float64Array, Int32Array},
    datatypes::{DataType, Field, Schema},
    error::ArrowError,
    record_batch::RecordBatch,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::load::LoadError;
use crate::source::Source;

/// Generation values of every source for a single year.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct YearRow {
    pub year: i32,
    /// One value per source, in `Source::ALL` order.
    pub values: [f64; Source::COUNT],
}

impl YearRow {
    pub fn value(&self, source: Source) -> f64 {
        self.values[source.index()]
    }
}

/// Year-indexed table of per-source generation values.
///
/// Rows are unique by year and sorted ascending. There is always at least one
/// row. The table never changes after construction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SourceTable {
    rows: Vec<YearRow>,
}

impl SourceTable {
    /// Builds a table from rows in any order, rejecting duplicate years.
    pub fn from_rows(mut rows: Vec<YearRow>) -> Result<Self, LoadError> {
        if rows.is_empty() {
            return Err(LoadError::Empty);
        }
        if !rows.windows(2).all(|w| w[0].year < w[1].year) {
            warn!("years are not in ascending order in the source; sorting");
            rows.sort_by_key(|r| r.year);
        }
        if let Some(w) = rows.windows(2).find(|w| w[0].year == w[1].year) {
            return Err(LoadError::DuplicateYear { year: w[0].year });
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[YearRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Never true for a table built through `from_rows`.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn years(&self) -> Vec<i32> {
        self.rows.iter().map(|r| r.year).collect()
    }

    pub fn min_year(&self) -> i32 {
        self.rows[0].year
    }

    pub fn max_year(&self) -> i32 {
        self.rows[self.rows.len() - 1].year
    }

    /// Position of the first row for `year`.
    pub fn position(&self, year: i32) -> Option<usize> {
        self.rows.iter().position(|r| r.year == year)
    }

    pub fn row(&self, year: i32) -> Option<&YearRow> {
        self.position(year).map(|i| &self.rows[i])
    }

    /// All values of one source, in year order.
    pub fn column(&self, source: Source) -> Vec<f64> {
        self.rows.iter().map(|r| r.value(source)).collect()
    }

    /// Arrow schema: `year` followed by one column per source, named by series name.
    pub fn arrow_schema() -> Schema {
        let mut fields = Vec::with_capacity(Source::COUNT + 1);
        fields.push(Field::new("year", DataType::Int32, false));
        for s in Source::ALL {
            fields.push(Field::new(s.column_name(), DataType::Float64, false));
        }
        Schema::new(fields)
    }

    pub fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        let mut cols: Vec<ArrayRef> = Vec::with_capacity(Source::COUNT + 1);
        cols.push(Arc::new(Int32Array::from(self.years())));
        for s in Source::ALL {
            cols.push(Arc::new(Float64Array::from(self.column(s))));
        }
        RecordBatch::try_new(Arc::new(Self::arrow_schema()), cols)
    }
}
