// src/load/reshape.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::grid::Cell;
use super::LoadError;
use crate::source::Source;
use crate::table::{SourceTable, YearRow};

/// `2000` or the World Bank databank form `2000 [YR2000]`.
static YEAR_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(?:\s*\[YR(\d{4})\])?$").expect("year header regex"));

/// World Bank marker for "no data".
const MISSING_MARKER: &str = "..";

fn is_series_header(cell: &Cell) -> bool {
    match cell {
        Cell::Text(s) => {
            let squashed: String = s.chars().filter(|c| !c.is_whitespace()).collect();
            squashed.eq_ignore_ascii_case("SeriesName")
        }
        _ => false,
    }
}

/// Parse a header cell into a year, if it names one.
pub fn parse_year_header(cell: &Cell) -> Option<i32> {
    match cell {
        Cell::Number(n) if n.fract() == 0.0 && (1000.0..=9999.0).contains(n) => Some(*n as i32),
        Cell::Text(s) => {
            let caps = YEAR_HEADER.captures(s.trim())?;
            let year = &caps[1];
            match caps.get(2) {
                Some(tagged) if tagged.as_str() != year => None,
                _ => year.parse().ok(),
            }
        }
        _ => None,
    }
}

/// Numeric value of a data cell; `Ok(None)` when the cell is missing.
fn parse_value(cell: &Cell, source: Source, year: i32) -> Result<Option<f64>, LoadError> {
    match cell {
        Cell::Empty => Ok(None),
        Cell::Number(n) => Ok(Some(*n)),
        Cell::Text(s) => {
            let t = s.trim();
            if t.is_empty() || t == MISSING_MARKER {
                return Ok(None);
            }
            t.parse::<f64>()
                .map(Some)
                .map_err(|_| LoadError::InvalidValue {
                    series: source,
                    year,
                    value: t.to_string(),
                })
        }
    }
}

impl SourceTable {
    /// Transpose a "series name → value per year" grid into a year-indexed table.
    ///
    /// The first row is the header; it must hold a `SeriesName` column and at
    /// least one year column. Every tracked source must appear exactly once.
    pub fn from_grid(grid: &[Vec<Cell>]) -> Result<Self, LoadError> {
        let header = grid.first().ok_or(LoadError::EmptySheet)?;

        let series_col = header
            .iter()
            .position(is_series_header)
            .ok_or(LoadError::MissingSeriesColumn)?;

        let mut year_cols: Vec<(usize, i32)> = Vec::new();
        let mut seen_years: HashMap<i32, usize> = HashMap::new();
        for (idx, cell) in header.iter().enumerate() {
            if idx == series_col {
                continue;
            }
            match parse_year_header(cell) {
                Some(year) => {
                    if seen_years.insert(year, idx).is_some() {
                        return Err(LoadError::DuplicateYear { year });
                    }
                    year_cols.push((idx, year));
                }
                None => debug!(column = idx, header = ?cell, "skipping non-year column"),
            }
        }
        if year_cols.is_empty() {
            return Err(LoadError::NoYearColumns);
        }

        // values[year_col][source]
        let mut values: Vec<[Option<f64>; Source::COUNT]> =
            vec![[None; Source::COUNT]; year_cols.len()];
        let mut found = [false; Source::COUNT];

        for row in grid.iter().skip(1) {
            let name = match row.get(series_col).and_then(Cell::to_text) {
                Some(n) => n,
                None => continue,
            };
            let source = match Source::from_column_name(&name) {
                Some(s) => s,
                None => {
                    warn!(series = %name.trim(), "ignoring untracked series");
                    continue;
                }
            };
            if found[source.index()] {
                return Err(LoadError::DuplicateSeries { series: source });
            }
            found[source.index()] = true;

            for (slot, &(col, year)) in values.iter_mut().zip(&year_cols) {
                let cell = row.get(col).unwrap_or(&Cell::Empty);
                slot[source.index()] = parse_value(cell, source, year)?;
            }
        }

        if let Some(missing) = Source::ALL.into_iter().find(|s| !found[s.index()]) {
            return Err(LoadError::MissingSource { missing });
        }

        let mut rows = Vec::with_capacity(year_cols.len());
        for (slot, &(_, year)) in values.iter().zip(&year_cols) {
            if slot.iter().all(Option::is_none) {
                debug!(year, "dropping year with no data");
                continue;
            }
            let mut out = [0.0; Source::COUNT];
            for s in Source::ALL {
                out[s.index()] = slot[s.index()].ok_or(LoadError::MissingValue { series: s, year })?;
            }
            rows.push(YearRow { year, values: out });
        }

        SourceTable::from_rows(rows)
    }
}
