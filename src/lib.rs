mod align;
mod discover;
mod error;
mod extract;
mod frequency;
mod model;
mod options;
mod sheet_reader;
mod sheet_writer;
mod translate;
mod warning;

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use crate::align::align_columns;
use crate::discover::describe_pattern;
use crate::extract::{collect_values, extract_column};
use crate::sheet_writer::ensure_writable_format;
use crate::translate::records_from_sheet;

pub use discover::discover_input_files;
pub use error::SheetError;
pub use extract::{COLUMN_HEADER_PREFIX, no_data_sentinel, read_error_sentinel};
pub use frequency::{FrequencySummary, FrequencyTable, RANKING_HEADERS, RankedValue};
pub use model::{Cell, ColumnStatus, CombinedTable, InputFile, Sheet};
pub use options::{
    CombineOptions, CsvSettings, HeaderMode, IndexRange, SheetFormat, TranslateOptions,
};
pub use sheet_reader::read_sheet;
pub use sheet_writer::write_table;
pub use translate::{
    IdentifierRecord, OUTPUT_HEADERS as TRANSLATION_HEADERS, Translation, TranslationEntry,
    TranslationMap,
};
pub use warning::{SheetWarning, WarningCode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub index: u32,
    pub file: String,
    pub status: ColumnStatus,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombineReport {
    pub combined_output: PathBuf,
    pub ranking_output: Option<PathBuf>,
    pub file_count: usize,
    pub row_count: usize,
    pub column_count: usize,
    pub headers: Vec<String>,
    pub preview: Vec<Vec<Cell>>,
    pub files: Vec<FileOutcome>,
    pub summary: Option<FrequencySummary>,
    pub top: Vec<RankedValue>,
    pub warnings: Vec<SheetWarning>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationReport {
    pub record_count: usize,
    pub skipped_rows: usize,
    pub output: Option<PathBuf>,
    pub map: TranslationMap,
    pub warnings: Vec<SheetWarning>,
}

const PREVIEW_ROWS: usize = 5;

fn to_headers(headers: &[&str]) -> Vec<String> {
    headers.iter().map(|header| (*header).to_string()).collect()
}

/// Collects the pathway column of every numbered input file into one aligned table, then ranks
/// all collected pathway names by frequency.
///
/// Writes `combined_output`, and `ranking_output` when at least one value was collected. Fails
/// without writing anything when no input file exists or none of them has the column.
pub fn combine_pathway_names(options: &CombineOptions) -> Result<CombineReport, SheetError> {
    if options.indices.is_empty() {
        return Err(SheetError::InvalidOption(
            "index range must contain at least one index".to_string(),
        ));
    }
    ensure_writable_format(&options.combined_output)?;
    ensure_writable_format(&options.ranking_output)?;

    let files = discover_input_files(options);
    if files.is_empty() {
        return Err(SheetError::NoInputFiles {
            pattern: describe_pattern(options),
        });
    }
    info!(
        count = files.len(),
        files = ?files.iter().map(InputFile::file_name).collect::<Vec<_>>(),
        "found input files"
    );

    let mut warnings = Vec::new();
    let columns = files
        .iter()
        .map(|file| extract_column(file, options, &mut warnings))
        .collect::<Vec<_>>();

    if !columns
        .iter()
        .any(|column| column.status == ColumnStatus::Extracted)
    {
        return Err(SheetError::NoUsableInput {
            file_count: files.len(),
        });
    }

    let table = align_columns(&columns);
    write_table(
        &options.combined_output,
        &table.headers,
        &table.rows,
        options.delimiter,
    )?;
    info!(
        output = %options.combined_output.display(),
        columns = table.column_count,
        rows = table.row_count,
        "wrote combined pathway table"
    );

    let files = columns
        .iter()
        .map(|column| FileOutcome {
            index: column.source.index,
            file: column.source.file_name(),
            status: column.status,
            rows: column.cells.len(),
        })
        .collect::<Vec<_>>();

    let values = collect_values(&columns);
    let (ranking_output, summary, top) = match FrequencyTable::from_values(&values) {
        Ok(frequencies) => {
            write_table(
                &options.ranking_output,
                &to_headers(&RANKING_HEADERS),
                &frequencies.to_rows(),
                options.delimiter,
            )?;
            let summary = frequencies.summary();
            info!(
                output = %options.ranking_output.display(),
                total = summary.total,
                distinct = summary.distinct,
                "wrote pathway frequency ranking"
            );
            (
                Some(options.ranking_output.clone()),
                Some(summary),
                frequencies.top(options.top).to_vec(),
            )
        }
        Err(SheetError::EmptyValueSet) => {
            warn!("no pathway names collected; skipping frequency analysis");
            warnings.push(SheetWarning::new(
                WarningCode::EmptyValueSet,
                "no pathway names were collected; frequency ranking not written",
            ));
            (None, None, Vec::new())
        }
        Err(error) => return Err(error),
    };

    Ok(CombineReport {
        combined_output: options.combined_output.clone(),
        ranking_output,
        file_count: files.len(),
        row_count: table.row_count,
        column_count: table.column_count,
        preview: table.rows.iter().take(PREVIEW_ROWS).cloned().collect(),
        headers: table.headers,
        files,
        summary,
        top,
        warnings,
    })
}

/// Reads the four-column identifier table and maps each primary identifier to its preferred
/// alternate identifier.
pub fn translate_identifiers(options: &TranslateOptions) -> Result<TranslationReport, SheetError> {
    if let Some(output) = &options.output {
        ensure_writable_format(output)?;
    }

    let sheet = read_sheet(&options.input, options.csv_settings())?;
    let mut warnings = Vec::new();
    let records = records_from_sheet(&options.input, &sheet, options.header_mode, &mut warnings)?;
    let record_count = records.len();
    let skipped_rows = warnings
        .iter()
        .filter(|warning| warning.code == WarningCode::MissingPrimaryId)
        .count();
    let map = records.into_iter().collect::<TranslationMap>();
    info!(
        input = %options.input.display(),
        records = record_count,
        entries = map.len(),
        "built translation map"
    );

    if let Some(output) = &options.output {
        write_table(
            output,
            &to_headers(&TRANSLATION_HEADERS),
            &map.to_rows(),
            options.delimiter,
        )?;
        info!(output = %output.display(), "wrote translation map");
    }

    Ok(TranslationReport {
        record_count,
        skipped_rows,
        output: options.output.clone(),
        map,
        warnings,
    })
}
