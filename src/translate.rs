use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::path::Path;

use serde::{Serialize, Serializer};
use tracing::warn;

use crate::error::SheetError;
use crate::model::{Cell, Sheet};
use crate::options::HeaderMode;
use crate::warning::{SheetWarning, WarningCode};

pub const RECORD_COLUMNS: usize = 4;
pub const OUTPUT_HEADERS: [&str; 2] = ["Primary", "Translation"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    Mapped(Cell),
    NoMapping,
}

impl Display for Translation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mapped(cell) => write!(f, "{cell}"),
            Self::NoMapping => f.write_str("None"),
        }
    }
}

impl Serialize for Translation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Mapped(cell) => cell.serialize(serializer),
            Self::NoMapping => serializer.serialize_none(),
        }
    }
}

/// One row of the mapping table: the primary identifier followed by three alternates, in column
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierRecord {
    pub primary: Cell,
    pub alt_a: Cell,
    pub alt_b: Cell,
    pub alt_c: Cell,
}

impl IdentifierRecord {
    #[must_use]
    pub fn from_row(row: &[Cell]) -> Option<Self> {
        match row {
            [primary, alt_a, alt_b, alt_c, ..] => Some(Self {
                primary: primary.clone(),
                alt_a: alt_a.clone(),
                alt_b: alt_b.clone(),
                alt_c: alt_c.clone(),
            }),
            _ => None,
        }
    }

    /// First present alternate in the fixed order B, C, A.
    #[must_use]
    pub fn resolve(&self) -> Translation {
        [&self.alt_b, &self.alt_c, &self.alt_a]
            .into_iter()
            .find(|cell| cell.is_present())
            .map_or(Translation::NoMapping, |cell| {
                Translation::Mapped(cell.clone())
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationEntry {
    pub primary: Cell,
    pub translation: Translation,
}

/// Primary identifier to chosen alternate. A repeated primary keeps its first position but takes
/// the later row's translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationMap {
    entries: Vec<TranslationEntry>,
    positions: HashMap<Cell, usize>,
}

impl TranslationMap {
    pub fn insert(&mut self, primary: Cell, translation: Translation) {
        if let Some(&position) = self.positions.get(&primary) {
            self.entries[position].translation = translation;
            return;
        }
        self.positions.insert(primary.clone(), self.entries.len());
        self.entries.push(TranslationEntry {
            primary,
            translation,
        });
    }

    #[must_use]
    pub fn get(&self, primary: &Cell) -> Option<&Translation> {
        self.positions
            .get(primary)
            .map(|&position| &self.entries[position].translation)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranslationEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.entries
            .iter()
            .map(|entry| {
                let translation = match &entry.translation {
                    Translation::Mapped(cell) => cell.clone(),
                    Translation::NoMapping => Cell::Empty,
                };
                vec![entry.primary.clone(), translation]
            })
            .collect()
    }
}

impl Serialize for TranslationMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl FromIterator<IdentifierRecord> for TranslationMap {
    fn from_iter<I: IntoIterator<Item = IdentifierRecord>>(records: I) -> Self {
        let mut map = Self::default();
        for record in records {
            let translation = record.resolve();
            map.insert(record.primary, translation);
        }
        map
    }
}

/// Turns the mapping sheet into records. Rows without a primary identifier are skipped with a
/// warning; row numbers in warnings are 1-based sheet rows.
pub(crate) fn records_from_sheet(
    path: &Path,
    sheet: &Sheet,
    header_mode: HeaderMode,
    warnings: &mut Vec<SheetWarning>,
) -> Result<Vec<IdentifierRecord>, SheetError> {
    if sheet.height() > 0 && sheet.width() < RECORD_COLUMNS {
        return Err(SheetError::TooFewColumns {
            path: path.to_path_buf(),
            expected: RECORD_COLUMNS,
            found: sheet.width(),
        });
    }

    let skipped = header_mode.skipped_rows();
    let mut records = Vec::new();
    for (index, row) in sheet.rows.iter().enumerate().skip(skipped) {
        let Some(record) = IdentifierRecord::from_row(row) else {
            continue;
        };
        if !record.primary.is_present() {
            warn!(row = index + 1, "skipping row without a primary identifier");
            warnings.push(
                SheetWarning::new(
                    WarningCode::MissingPrimaryId,
                    "row has no primary identifier",
                )
                .with_row(index + 1),
            );
            continue;
        }
        records.push(record);
    }

    Ok(records)
}
