use crate::model::{Cell, CombinedTable, ExtractedColumn};

/// Lays the extracted columns side by side, padding every short column with empty cells up to
/// the longest one.
pub(crate) fn align_columns(columns: &[ExtractedColumn]) -> CombinedTable {
    let row_count = columns
        .iter()
        .map(|column| column.cells.len())
        .max()
        .unwrap_or(0);

    let headers = columns
        .iter()
        .map(|column| column.header.clone())
        .collect::<Vec<_>>();

    let rows = (0..row_count)
        .map(|row_index| {
            columns
                .iter()
                .map(|column| column.cells.get(row_index).cloned().unwrap_or(Cell::Empty))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    CombinedTable {
        column_count: headers.len(),
        headers,
        rows,
        row_count,
    }
}
