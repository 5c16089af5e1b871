//! Source reader: loads the first sheet of an Excel workbook into a [`Table`].
//!
//! The whole sheet is read into memory at once; only the write side of the
//! pipeline is chunked.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook, Reader, Xlsx};
use log::info;

use crate::error_handling::ReadError;
use crate::table::{Cell, Table};

/// Reads the first sheet of the workbook at `path`.
///
/// The first row becomes the column set; every following row becomes a data
/// row. Cell types are taken from the sheet (text, numeric, boolean,
/// date/time) as calamine infers them.
pub fn read_table(path: &Path) -> Result<Table, ReadError> {
    let mut workbook: Xlsx<BufReader<File>> = open_workbook(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ReadError::NoSheet)?;

    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| ReadError::EmptySheet(sheet_name.clone()))?;
    let columns: Vec<String> = header.iter().map(|cell| cell.to_string()).collect();

    let data: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(Cell::from).collect())
        .collect();

    info!(
        "Read {} rows ({} columns) from sheet {:?}",
        data.len(),
        columns.len(),
        sheet_name
    );

    Ok(Table::new(columns, data))
}
