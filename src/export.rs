// src/export.rs

use arrow::{error::ArrowError, record_batch::RecordBatch};
use parquet::{
    arrow::ArrowWriter, basic::Compression, errors::ParquetError,
    file::properties::WriterProperties,
};
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::table::SourceTable;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O on {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("building record batch: {0}")]
    Arrow(#[from] ArrowError),
    #[error("writing parquet: {0}")]
    Parquet(#[from] ParquetError),
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ExportError {
    let path = path.to_path_buf();
    move |source| ExportError::Io { path, source }
}

/// Write the table as a single-row-group Parquet file at `path`.
///
/// The file is written next to `path` with a `.tmp` extension first and renamed
/// into place once closed.
#[tracing::instrument(level = "info", skip(table, path), fields(path = %path.as_ref().display()))]
pub fn write_parquet<P: AsRef<Path>>(table: &SourceTable, path: P) -> Result<(), ExportError> {
    let out_path = path.as_ref();
    let temp_path = out_path.with_extension("tmp");

    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }

    let batch = table.to_record_batch()?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let file = File::create(&temp_path).map_err(io_err(&temp_path))?;
    let written = write_and_rename(file, &batch, props, &temp_path, out_path);
    if let Err(e) = written {
        // only a successful write is moved into place
        if let Err(rm) = fs::remove_file(&temp_path) {
            warn!(temp = %temp_path.display(), "failed to remove temp file: {}", rm);
        }
        return Err(e);
    }
    info!(rows = batch.num_rows(), "exported source table");
    Ok(())
}

fn write_and_rename(
    file: File,
    batch: &RecordBatch,
    props: WriterProperties,
    temp_path: &Path,
    out_path: &Path,
) -> Result<(), ExportError> {
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;
    debug!(rows = batch.num_rows(), temp = %temp_path.display(), "wrote rows");

    fs::rename(temp_path, out_path).map_err(io_err(out_path))
}
