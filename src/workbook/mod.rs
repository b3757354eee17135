//! Spreadsheet → row records.
//!
//! The first worksheet is read; its first row names the columns and every
//! following row, up to the last used one, becomes one record. Format detection (xlsx, xlsm,
//! xlsb, xls, ods) is done on content, so the input file needs no extension.

pub mod header;
pub mod value;

use std::io::{self, Cursor};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use serde_json::{Map, Value};
use thiserror::Error;

pub use header::column_names;
pub use value::cell_value;

/// One data row: column name → cell value, in header order.
pub type Row = Map<String, Value>;

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Spreadsheet(#[from] calamine::Error),

    #[error("workbook contains no worksheets")]
    NoWorksheet,
}

/// Read the spreadsheet stored at `path`.
pub fn read_records(path: &Path) -> Result<Vec<Row>, WorkbookError> {
    let bytes = std::fs::read(path)?;
    records_from_bytes(bytes)
}

pub fn records_from_bytes(bytes: Vec<u8>) -> Result<Vec<Row>, WorkbookError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(WorkbookError::NoWorksheet)??;
    Ok(records_from_range(&range))
}

/// Convert a cell range whose first row is the header.
///
/// Rows and columns are taken from absolute position `(0, 0)`, so leading
/// blank columns and blank rows between records are kept as nulls.
pub fn records_from_range(range: &Range<Data>) -> Vec<Row> {
    let Some((last_row, last_col)) = range.end() else {
        return Vec::new();
    };

    let header: Vec<Data> = (0..=last_col)
        .map(|col| range.get_value((0, col)).cloned().unwrap_or(Data::Empty))
        .collect();
    let columns = column_names(&header);

    (1..=last_row)
        .map(|row| {
            columns
                .iter()
                .zip(0u32..)
                .map(|(name, col)| {
                    let value = range.get_value((row, col)).map(cell_value).unwrap_or(Value::Null);
                    (name.clone(), value)
                })
                .collect()
        })
        .collect()
}
