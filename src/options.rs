use std::ops::Range;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
    HasHeader,
    NoHeader,
}

impl HeaderMode {
    #[must_use]
    pub fn skipped_rows(self) -> usize {
        match self {
            Self::HasHeader => 1,
            Self::NoHeader => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Workbook,
}

impl SheetFormat {
    /// Picks the reader/writer from the file extension, case-insensitively.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Workbook),
            _ => None,
        }
    }
}

/// Half-open range of file indices, written `START..END`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRange {
    start: u32,
    end: u32,
}

impl IndexRange {
    #[must_use]
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    #[must_use]
    pub fn indices(&self) -> Range<u32> {
        self.start..self.end
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Default for IndexRange {
    fn default() -> Self {
        Self::new(0, 30)
    }
}

impl FromStr for IndexRange {
    type Err = String;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let (start, end) = spec
            .split_once("..")
            .ok_or_else(|| format!("invalid index range '{spec}', expected START..END"))?;
        let start: u32 = start
            .trim()
            .parse()
            .map_err(|_| format!("invalid range start: '{start}'"))?;
        let end: u32 = end
            .trim()
            .parse()
            .map_err(|_| format!("invalid range end: '{end}'"))?;
        if end < start {
            return Err(format!(
                "invalid range '{spec}': end is smaller than start"
            ));
        }
        Ok(Self { start, end })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CombineOptions {
    pub input_dir: PathBuf,
    pub prefix: String,
    pub extension: String,
    pub indices: IndexRange,
    pub column: usize,
    pub header_mode: HeaderMode,
    pub combined_output: PathBuf,
    pub ranking_output: PathBuf,
    pub top: usize,
    pub delimiter: u8,
    pub encoding: String,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            prefix: "data".to_string(),
            extension: "xlsx".to_string(),
            indices: IndexRange::default(),
            column: 2,
            header_mode: HeaderMode::HasHeader,
            combined_output: PathBuf::from("combined_pathway_names.xlsx"),
            ranking_output: PathBuf::from("most_common_pathways.xlsx"),
            top: 20,
            delimiter: b',',
            encoding: "utf-8".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslateOptions {
    pub input: PathBuf,
    pub header_mode: HeaderMode,
    pub output: Option<PathBuf>,
    pub delimiter: u8,
    pub encoding: String,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from("reactionnames.xlsx"),
            header_mode: HeaderMode::NoHeader,
            output: None,
            delimiter: b',',
            encoding: "utf-8".to_string(),
        }
    }
}

/// Delimiter and text encoding used when a CSV file is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvSettings<'a> {
    pub delimiter: u8,
    pub encoding: &'a str,
}

impl CombineOptions {
    #[must_use]
    pub fn csv_settings(&self) -> CsvSettings<'_> {
        CsvSettings {
            delimiter: self.delimiter,
            encoding: &self.encoding,
        }
    }
}

impl TranslateOptions {
    #[must_use]
    pub fn csv_settings(&self) -> CsvSettings<'_> {
        CsvSettings {
            delimiter: self.delimiter,
            encoding: &self.encoding,
        }
    }
}
