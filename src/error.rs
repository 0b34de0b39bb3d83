use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("failed to write workbook: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("unsupported spreadsheet format: '{}'", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("workbook '{}' has no worksheets", .0.display())]
    EmptyWorkbook(PathBuf),

    #[error("unknown text encoding: '{0}'")]
    UnknownEncoding(String),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("'{}' has {found} column(s), expected at least {expected}", path.display())]
    TooFewColumns {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("no input files found matching '{pattern}'")]
    NoInputFiles { pattern: String },

    #[error("none of the {file_count} input file(s) yielded a usable column")]
    NoUsableInput { file_count: usize },

    #[error("no values available for frequency analysis")]
    EmptyValueSet,
}
