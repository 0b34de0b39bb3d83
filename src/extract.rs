use tracing::{info, warn};

use crate::model::{Cell, ColumnStatus, ExtractedColumn, InputFile, Sheet};
use crate::options::CombineOptions;
use crate::sheet_reader::read_sheet;
use crate::warning::{SheetWarning, WarningCode};

pub const COLUMN_HEADER_PREFIX: &str = "Pathway_Names_";

#[must_use]
pub fn no_data_sentinel(file: &InputFile) -> String {
    format!("No data - {}", file.file_name())
}

#[must_use]
pub fn read_error_sentinel(file: &InputFile) -> String {
    format!("Error - {}", file.file_name())
}

fn sentinel_column(file: &InputFile, status: ColumnStatus, value: String) -> ExtractedColumn {
    ExtractedColumn {
        header: format!("{COLUMN_HEADER_PREFIX}{}", file.file_stem()),
        source: file.clone(),
        status,
        cells: vec![Cell::Text(value)],
    }
}

pub(crate) fn column_from_sheet(
    file: &InputFile,
    sheet: &Sheet,
    options: &CombineOptions,
    warnings: &mut Vec<SheetWarning>,
) -> ExtractedColumn {
    if sheet.width() <= options.column {
        warn!(
            file = %file.file_name(),
            columns = sheet.width(),
            "column {} not found; recording placeholder",
            options.column + 1
        );
        warnings.push(
            SheetWarning::new(
                WarningCode::MissingColumn,
                format!(
                    "file has {} column(s); column {} not found",
                    sheet.width(),
                    options.column + 1
                ),
            )
            .with_file(file.file_name()),
        );
        return sentinel_column(file, ColumnStatus::MissingColumn, no_data_sentinel(file));
    }

    let cells = sheet
        .rows
        .iter()
        .skip(options.header_mode.skipped_rows())
        .map(|row| row[options.column].clone())
        .collect::<Vec<_>>();
    info!(file = %file.file_name(), rows = cells.len(), "extracted pathway names");

    ExtractedColumn {
        header: format!("{COLUMN_HEADER_PREFIX}{}", file.file_stem()),
        source: file.clone(),
        status: ColumnStatus::Extracted,
        cells,
    }
}

/// Pulls the configured column out of one input file. Unreadable files and files without the
/// column become a one-row placeholder column instead of failing the run.
pub fn extract_column(
    file: &InputFile,
    options: &CombineOptions,
    warnings: &mut Vec<SheetWarning>,
) -> ExtractedColumn {
    match read_sheet(&file.path, options.csv_settings()) {
        Ok(sheet) => column_from_sheet(file, &sheet, options, warnings),
        Err(error) => {
            warn!(file = %file.file_name(), %error, "failed to read input file");
            warnings.push(
                SheetWarning::new(WarningCode::ReadFailed, error.to_string())
                    .with_file(file.file_name()),
            );
            sentinel_column(file, ColumnStatus::ReadFailed, read_error_sentinel(file))
        }
    }
}

/// Every present value of every extracted column, in file order then row order. Placeholder
/// columns contribute nothing.
#[must_use]
pub fn collect_values(columns: &[ExtractedColumn]) -> Vec<Cell> {
    columns
        .iter()
        .filter(|column| column.status == ColumnStatus::Extracted)
        .flat_map(|column| column.cells.iter().filter(|cell| cell.is_present()).cloned())
        .collect()
}
