use std::fs;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use csv::ReaderBuilder;
use encoding_rs::Encoding;

use crate::error::SheetError;
use crate::model::{Cell, Sheet};
use crate::options::{CsvSettings, SheetFormat};

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(text) => Cell::Text(text.clone()),
        Data::Float(value) => Cell::Number(*value),
        #[allow(clippy::cast_precision_loss)]
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Bool(value) => Cell::Bool(*value),
        Data::DateTime(value) => Cell::Number(value.as_f64()),
        other => Cell::Text(other.to_string()),
    }
}

fn read_workbook(path: &Path) -> Result<Sheet, SheetError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SheetError::EmptyWorkbook(path.to_path_buf()))??;

    // The used range may start past column A; re-anchor so column indices are absolute.
    let column_offset = range.start().map_or(0, |(_, column)| column as usize);
    let rows = range
        .rows()
        .map(|row| {
            let mut cells = vec![Cell::Empty; column_offset];
            cells.extend(row.iter().map(cell_from_data));
            cells
        })
        .collect::<Vec<_>>();

    Ok(Sheet::new(rows))
}

pub(crate) fn decode_text(bytes: &[u8], label: &str) -> Result<String, SheetError> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| SheetError::UnknownEncoding(label.to_string()))?;
    let (text, _, _) = encoding.decode(bytes);
    Ok(text.into_owned())
}

fn read_csv(path: &Path, settings: CsvSettings<'_>) -> Result<Sheet, SheetError> {
    let bytes = fs::read(path)?;
    let text = decode_text(&bytes, settings.encoding)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(settings.delimiter)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Cell::from).collect::<Vec<_>>());
    }

    Ok(Sheet::new(rows))
}

/// Reads the first worksheet of `path`, choosing the reader from its extension.
pub fn read_sheet(path: &Path, settings: CsvSettings<'_>) -> Result<Sheet, SheetError> {
    match SheetFormat::from_path(path) {
        Some(SheetFormat::Csv) => read_csv(path, settings),
        Some(SheetFormat::Workbook) => read_workbook(path),
        None => Err(SheetError::UnsupportedFormat(path.to_path_buf())),
    }
}
