// src/load/mod.rs
pub mod grid;
pub mod reshape;

use std::{fs, path::Path, path::PathBuf};
use thiserror::Error;
use tracing::info;

use crate::source::Source;
use crate::table::SourceTable;

pub use grid::{read_grid, Cell, Format};
pub use reshape::parse_year_header;

/// Failure to build a `SourceTable` from a file. Always fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot open workbook {path:?}: {source}")]
    Workbook {
        path: PathBuf,
        source: calamine::Error,
    },
    #[error("cannot parse CSV {path:?}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("unsupported spreadsheet format: {path:?}")]
    UnsupportedFormat { path: PathBuf },
    #[error("worksheet `{sheet}` not found (available: {available:?})")]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },
    #[error("spreadsheet is empty")]
    EmptySheet,
    #[error("no `SeriesName` column in header row")]
    MissingSeriesColumn,
    #[error("no year columns in header row")]
    NoYearColumns,
    #[error("year {year} appears more than once")]
    DuplicateYear { year: i32 },
    #[error("series `{series}` appears more than once")]
    DuplicateSeries { series: Source },
    #[error("series `{missing}` not found in spreadsheet")]
    MissingSource { missing: Source },
    #[error("series `{series}` has no value for {year}")]
    MissingValue { series: Source, year: i32 },
    #[error("series `{series}` has non-numeric value `{value}` for {year}")]
    InvalidValue {
        series: Source,
        year: i32,
        value: String,
    },
    #[error("spreadsheet holds no year with data")]
    Empty,
}

/// Load the first worksheet of `path` into a `SourceTable`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<SourceTable, LoadError> {
    load_sheet(path, None)
}

/// Load a named worksheet (or the first one when `sheet` is `None`).
/// CSV files have a single implicit sheet and ignore `sheet`.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_sheet<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> Result<SourceTable, LoadError> {
    let path = path.as_ref();
    fs::metadata(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let grid = read_grid(path, sheet)?;
    let table = SourceTable::from_grid(&grid)?;
    info!(
        years = table.len(),
        first = table.min_year(),
        last = table.max_year(),
        "loaded source table"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use rust_xlsxwriter::{Workbook, Worksheet};
    use std::io::Write;
    use tempfile::{tempdir, Builder, NamedTempFile};
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,powermix::load=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn write_csv(content: &str) -> Result<NamedTempFile> {
        let mut tmp = Builder::new().suffix(".csv").tempfile()?;
        tmp.write_all(content.as_bytes())?;
        Ok(tmp)
    }

    const DATABANK_CSV: &str = "\
Country Name,Series Name,Series Code,2000 [YR2000],2001 [YR2001],2002 [YR2002],2003 [YR2003]
Philippines,Coal,EG.ELC.COAL.ZS,36.8,37.3,34.4,..
Philippines,Hydroelectric,EG.ELC.HYRO.ZS,17.4,14.8,14.8,..
Philippines,Natural gas,EG.ELC.NGAS.ZS,0.0,0.0,12.3,..
Philippines,Oil,EG.ELC.PETR.ZS,24.3,21.6,19.6,..
Philippines,Other Renewable,EG.ELC.RNWX.ZS,21.5,26.3,18.9,..
";

    #[test]
    fn loads_databank_csv() -> Result<()> {
        init_test_logging();
        let tmp = write_csv(DATABANK_CSV)?;

        let table = load(tmp.path())?;
        assert_eq!(table.years(), vec![2000, 2001, 2002]);
        assert_eq!(table.row(2002).unwrap().value(Source::NaturalGas), 12.3);
        Ok(())
    }

    #[test]
    fn loading_twice_is_deterministic() -> Result<()> {
        init_test_logging();
        let tmp = write_csv(DATABANK_CSV)?;

        let first = load(tmp.path())?;
        let second = load(tmp.path())?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() -> Result<()> {
        let dir = tempdir()?;
        let err = load(dir.path().join("nope.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        Ok(())
    }

    /// Write the five sources for 2000–2002 into `ws`, with numeric year headers
    /// as Excel stores them.
    fn fill_mix_sheet(ws: &mut Worksheet) -> Result<()> {
        ws.write_string(0, 0, "SeriesName")?;
        for (col, year) in [2000.0, 2001.0, 2002.0].into_iter().enumerate() {
            ws.write_number(0, col as u16 + 1, year)?;
        }
        for (row, src) in Source::ALL.into_iter().enumerate() {
            let row = row as u32 + 1;
            ws.write_string(row, 0, src.column_name())?;
            for col in 0..3u16 {
                ws.write_number(row, col + 1, (row * 10 + col as u32) as f64)?;
            }
        }
        Ok(())
    }

    #[test]
    fn loads_first_sheet_of_workbook() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let path = dir.path().join("electricity_prod_databank.xlsx");
        let mut wb = Workbook::new();
        fill_mix_sheet(wb.add_worksheet())?;
        wb.save(&path)?;

        let table = load(&path)?;
        assert_eq!(table.years(), vec![2000, 2001, 2002]);
        assert_eq!(table.column(Source::Coal), vec![10.0, 11.0, 12.0]);
        assert_eq!(
            table.row(2001).unwrap().values,
            [11.0, 21.0, 31.0, 41.0, 51.0]
        );

        let slice = crate::slice::compute_slice(&table, 2001)?;
        assert_eq!(slice.trend_years(), vec![2000, 2001]);
        Ok(())
    }

    #[test]
    fn loads_named_sheet_of_workbook() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let path = dir.path().join("mix.xlsx");
        let mut wb = Workbook::new();
        wb.add_worksheet()
            .set_name("Notes")?
            .write_string(0, 0, "Source: World Development Indicators")?;
        fill_mix_sheet(wb.add_worksheet().set_name("Data")?)?;
        wb.save(&path)?;

        // the first sheet has no SeriesName header
        assert!(matches!(load(&path), Err(LoadError::MissingSeriesColumn)));

        let table = load_sheet(&path, Some("Data"))?;
        assert_eq!(table.years(), vec![2000, 2001, 2002]);
        assert_eq!(table.row(2002).unwrap().value(Source::OtherRenewable), 52.0);
        Ok(())
    }

    #[test]
    fn unknown_sheet_is_reported() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("mix.xlsx");
        let mut wb = Workbook::new();
        fill_mix_sheet(wb.add_worksheet())?;
        wb.save(&path)?;

        let err = load_sheet(&path, Some("Nope")).unwrap_err();
        assert!(matches!(
            err,
            LoadError::SheetNotFound { ref sheet, ref available }
                if sheet == "Nope" && available == &vec!["Sheet1".to_string()]
        ));
        Ok(())
    }

    #[test]
    fn garbage_workbook_is_workbook_error() -> Result<()> {
        let mut tmp = Builder::new().suffix(".xlsx").tempfile()?;
        tmp.write_all(b"this is not a zip archive")?;
        let err = load(tmp.path()).unwrap_err();
        assert!(matches!(err, LoadError::Workbook { .. }));
        Ok(())
    }

    #[test]
    fn malformed_structure_is_reported() -> Result<()> {
        let tmp = write_csv("Name,2000\nCoal,1\n")?;
        let err = load(tmp.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingSeriesColumn));
        assert_eq!(err.to_string(), "no `SeriesName` column in header row");
        Ok(())
    }
}
