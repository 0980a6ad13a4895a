// src/selector.rs

use serde::Serialize;
use std::collections::BTreeMap;

use crate::slice::SelectionError;
use crate::table::SourceTable;

/// Discrete year slider: one stop per year in the table, no values in between.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct YearSelector {
    pub min: i32,
    pub max: i32,
    /// Stop → label shown under it.
    pub marks: BTreeMap<i32, String>,
    /// Initially selected stop; the earliest year.
    pub value: i32,
    /// Always `None` so the slider snaps to marks only.
    pub step: Option<i32>,
}

impl YearSelector {
    pub fn new(table: &SourceTable) -> Self {
        Self {
            min: table.min_year(),
            max: table.max_year(),
            marks: table.years().into_iter().map(|y| (y, y.to_string())).collect(),
            value: table.min_year(),
            step: None,
        }
    }

    pub fn stops(&self) -> impl Iterator<Item = i32> + '_ {
        self.marks.keys().copied()
    }

    /// Accept `year` only if it is one of the stops.
    pub fn select(&self, year: i32) -> Result<i32, SelectionError> {
        if self.marks.contains_key(&year) {
            Ok(year)
        } else {
            Err(SelectionError::YearNotFound {
                year,
                first: self.min,
                last: self.max,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::YearRow;

    fn table(years: &[i32]) -> SourceTable {
        SourceTable::from_rows(
            years
                .iter()
                .map(|&year| YearRow {
                    year,
                    values: [1.0; 5],
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn stops_follow_table_years() {
        let sel = YearSelector::new(&table(&[1990, 1995, 2000]));
        assert_eq!(sel.min, 1990);
        assert_eq!(sel.max, 2000);
        assert_eq!(sel.value, 1990);
        assert_eq!(sel.step, None);
        assert_eq!(sel.stops().collect::<Vec<_>>(), vec![1990, 1995, 2000]);
        assert_eq!(sel.marks[&1995], "1995");
    }

    #[test]
    fn select_rejects_years_between_stops() {
        let sel = YearSelector::new(&table(&[1990, 1995, 2000]));
        assert_eq!(sel.select(1995), Ok(1995));
        assert!(matches!(
            sel.select(1993),
            Err(SelectionError::YearNotFound { year: 1993, .. })
        ));
    }

    #[test]
    fn serializes_marks_with_string_keys() {
        let sel = YearSelector::new(&table(&[2000, 2001]));
        let json = serde_json::to_value(&sel).unwrap();
        assert_eq!(json["marks"]["2001"], "2001");
        assert!(json["step"].is_null());
    }
}
