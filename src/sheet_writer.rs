use std::path::Path;

use csv::WriterBuilder;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::error::SheetError;
use crate::model::Cell;

fn write_csv(
    path: &Path,
    headers: &[String],
    rows: &[Vec<Cell>],
    delimiter: u8,
) -> Result<(), SheetError> {
    let mut writer = WriterBuilder::new().delimiter(delimiter).from_path(path)?;
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row.iter().map(ToString::to_string))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_cell(worksheet: &mut Worksheet, row: u32, column: u16, cell: &Cell) -> Result<(), XlsxError> {
    match cell {
        Cell::Empty => {}
        Cell::Text(text) => {
            worksheet.write_string(row, column, text)?;
        }
        Cell::Number(value) => {
            worksheet.write_number(row, column, *value)?;
        }
        Cell::Bool(value) => {
            worksheet.write_boolean(row, column, *value)?;
        }
    }
    Ok(())
}

fn write_xlsx(path: &Path, headers: &[String], rows: &[Vec<Cell>]) -> Result<(), SheetError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (column, header) in headers.iter().enumerate() {
        let column = u16::try_from(column).map_err(|_| too_large("columns", column))?;
        worksheet.write_string(0, column, header)?;
    }

    for (row_index, row) in rows.iter().enumerate() {
        let row_number = u32::try_from(row_index + 1).map_err(|_| too_large("rows", row_index))?;
        for (column, cell) in row.iter().enumerate() {
            let column = u16::try_from(column).map_err(|_| too_large("columns", column))?;
            write_cell(worksheet, row_number, column, cell)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn too_large(what: &str, count: usize) -> SheetError {
    SheetError::InvalidOption(format!("too many {what} for a worksheet: {count}"))
}

fn output_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|extension| extension == "csv" || extension == "xlsx")
}

pub(crate) fn ensure_writable_format(path: &Path) -> Result<(), SheetError> {
    output_extension(path)
        .map(|_| ())
        .ok_or_else(|| SheetError::UnsupportedFormat(path.to_path_buf()))
}

/// Writes a header row followed by `rows`; `.csv` goes through the CSV writer, `.xlsx` through
/// the workbook writer.
pub fn write_table(
    path: &Path,
    headers: &[String],
    rows: &[Vec<Cell>],
    delimiter: u8,
) -> Result<(), SheetError> {
    match output_extension(path).as_deref() {
        Some("csv") => write_csv(path, headers, rows, delimiter),
        Some(_) => write_xlsx(path, headers, rows),
        None => Err(SheetError::UnsupportedFormat(path.to_path_buf())),
    }
}
