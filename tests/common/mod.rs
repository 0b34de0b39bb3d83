#![allow(dead_code)]

use std::path::Path;

use rust_xlsxwriter::Workbook;

pub fn create_test_xlsx<S: AsRef<str>>(
    path: &Path,
    rows: &[Vec<S>],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (row_index, row) in rows.iter().enumerate() {
        for (column_index, value) in row.iter().enumerate() {
            let value = value.as_ref();
            if value.is_empty() {
                continue;
            }
            worksheet.write_string(
                u32::try_from(row_index)?,
                u16::try_from(column_index)?,
                value,
            )?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// A sheet shaped like the pathway enrichment exports: a header row, then one pathway per row in
/// the third column.
pub fn pathway_rows(pathways: &[&str]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Gene".to_string(),
        "Score".to_string(),
        "Pathway Name".to_string(),
    ]];
    rows.extend(pathways.iter().enumerate().map(|(index, pathway)| {
        vec![
            format!("GENE{index}"),
            format!("0.{index}"),
            (*pathway).to_string(),
        ]
    }));
    rows
}
