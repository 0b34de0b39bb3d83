use std::collections::HashMap;

use serde::Serialize;

use crate::error::SheetError;
use crate::model::Cell;

pub const RANKING_HEADERS: [&str; 3] = ["Rank", "Pathway_Name", "Count"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedValue {
    pub rank: usize,
    pub value: Cell,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencySummary {
    pub total: usize,
    pub distinct: usize,
    pub average: f64,
    pub singletons: usize,
    pub repeated: usize,
}

/// Occurrence counts of distinct values, ranked by descending count. Equal counts keep the order
/// in which the values were first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    ranked: Vec<RankedValue>,
    total: usize,
}

impl FrequencyTable {
    pub fn from_values(values: &[Cell]) -> Result<Self, SheetError> {
        if values.is_empty() {
            return Err(SheetError::EmptyValueSet);
        }

        let mut positions: HashMap<&Cell, usize> = HashMap::new();
        let mut counted: Vec<(&Cell, usize)> = Vec::new();
        for value in values {
            if let Some(&position) = positions.get(value) {
                counted[position].1 += 1;
            } else {
                positions.insert(value, counted.len());
                counted.push((value, 1));
            }
        }

        // stable: ties stay in first-seen order
        counted.sort_by(|left, right| right.1.cmp(&left.1));

        let ranked = counted
            .into_iter()
            .enumerate()
            .map(|(index, (value, count))| RankedValue {
                rank: index + 1,
                value: value.clone(),
                count,
            })
            .collect();

        Ok(Self {
            ranked,
            total: values.len(),
        })
    }

    #[must_use]
    pub fn ranked(&self) -> &[RankedValue] {
        &self.ranked
    }

    #[must_use]
    pub fn top(&self, n: usize) -> &[RankedValue] {
        &self.ranked[..n.min(self.ranked.len())]
    }

    #[must_use]
    pub fn summary(&self) -> FrequencySummary {
        let distinct = self.ranked.len();
        let singletons = self.ranked.iter().filter(|entry| entry.count == 1).count();
        #[allow(clippy::cast_precision_loss)]
        let average = self.total as f64 / distinct as f64;

        FrequencySummary {
            total: self.total,
            distinct,
            average,
            singletons,
            repeated: distinct - singletons,
        }
    }

    /// Rows for the ranking output: rank, value, count.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.ranked
            .iter()
            .map(|entry| {
                vec![
                    Cell::Number(entry.rank as f64),
                    entry.value.clone(),
                    Cell::Number(entry.count as f64),
                ]
            })
            .collect()
    }
}
