mod common;

use std::path::Path;
use std::process::Command;

use pathway_sheets::{
    Cell, ColumnStatus, CombineOptions, CsvSettings, IndexRange, SheetError, WarningCode,
    combine_pathway_names, read_sheet,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

const UTF8: CsvSettings<'static> = CsvSettings {
    delimiter: b',',
    encoding: "utf-8",
};

fn options_for(dir: &Path, extension: &str) -> CombineOptions {
    CombineOptions {
        input_dir: dir.to_path_buf(),
        extension: extension.to_string(),
        combined_output: dir.join("combined.xlsx"),
        ranking_output: dir.join("ranking.csv"),
        ..CombineOptions::default()
    }
}

#[test]
fn combines_workbooks_and_ranks_pathways() {
    let dir = tempdir().expect("tempdir should be created");
    common::create_test_xlsx(
        &dir.path().join("data0.xlsx"),
        &common::pathway_rows(&["Apoptosis", "Glycolysis", "Apoptosis"]),
    )
    .expect("xlsx fixture should be created");
    common::create_test_xlsx(
        &dir.path().join("data1.xlsx"),
        &common::pathway_rows(&["Cell cycle"]),
    )
    .expect("xlsx fixture should be created");
    common::create_test_xlsx(
        &dir.path().join("data2.xlsx"),
        &[vec!["Gene", "Score"], vec!["TP53", "0.1"]],
    )
    .expect("xlsx fixture should be created");

    let options = options_for(dir.path(), "xlsx");
    let report = combine_pathway_names(&options).expect("combine should succeed");

    assert_eq!(report.file_count, 3);
    assert_eq!(report.column_count, 3);
    assert_eq!(report.row_count, 3);
    assert_eq!(report.files[2].status, ColumnStatus::MissingColumn);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].code, WarningCode::MissingColumn);
    assert_eq!(
        report.headers,
        vec!["Pathway_Names_data0", "Pathway_Names_data1", "Pathway_Names_data2"]
    );
    assert_eq!(report.preview.len(), 3);
    assert_eq!(report.preview[1], vec![Cell::text("Glycolysis"), Cell::Empty, Cell::Empty]);

    let combined = read_sheet(&options.combined_output, UTF8).expect("combined output readable");
    assert_eq!(
        combined.rows,
        vec![
            vec![
                Cell::text("Pathway_Names_data0"),
                Cell::text("Pathway_Names_data1"),
                Cell::text("Pathway_Names_data2"),
            ],
            vec![
                Cell::text("Apoptosis"),
                Cell::text("Cell cycle"),
                Cell::text("No data - data2.xlsx"),
            ],
            vec![Cell::text("Glycolysis"), Cell::Empty, Cell::Empty],
            vec![Cell::text("Apoptosis"), Cell::Empty, Cell::Empty],
        ]
    );

    let ranking = std::fs::read_to_string(&options.ranking_output).expect("ranking readable");
    assert_eq!(
        ranking,
        "Rank,Pathway_Name,Count\n1,Apoptosis,2\n2,Glycolysis,1\n3,Cell cycle,1\n"
    );

    let summary = report.summary.expect("summary should be present");
    assert_eq!(summary.total, 4);
    assert_eq!(summary.distinct, 3);
    assert_eq!(summary.singletons, 2);
    assert_eq!(summary.repeated, 1);
}

#[test]
fn ties_follow_file_then_row_order() {
    let dir = tempdir().expect("tempdir should be created");
    std::fs::write(
        dir.path().join("data0.csv"),
        "g,s,Pathway Name\n1,1,B\n2,2,A\n",
    )
    .expect("fixture should be written");
    std::fs::write(
        dir.path().join("data1.csv"),
        "g,s,Pathway Name\n1,1,A\n2,2,B\n3,3,C\n4,4,C\n",
    )
    .expect("fixture should be written");

    let report = combine_pathway_names(&options_for(dir.path(), "csv"))
        .expect("combine should succeed");

    let order = report
        .top
        .iter()
        .map(|entry| (entry.value.to_string(), entry.count))
        .collect::<Vec<_>>();
    assert_eq!(
        order,
        vec![
            ("B".to_string(), 2),
            ("A".to_string(), 2),
            ("C".to_string(), 2),
        ]
    );
}

#[test]
fn unreadable_file_is_recorded_and_run_continues() {
    let dir = tempdir().expect("tempdir should be created");
    common::create_test_xlsx(
        &dir.path().join("data0.xlsx"),
        &common::pathway_rows(&["Apoptosis"]),
    )
    .expect("xlsx fixture should be created");
    std::fs::write(dir.path().join("data1.xlsx"), "not a workbook")
        .expect("fixture should be written");

    let options = options_for(dir.path(), "xlsx");
    let report = combine_pathway_names(&options).expect("combine should succeed");

    assert_eq!(report.files[1].status, ColumnStatus::ReadFailed);
    assert_eq!(report.warnings[0].code, WarningCode::ReadFailed);

    let combined = read_sheet(&options.combined_output, UTF8).expect("combined output readable");
    assert_eq!(combined.rows[1][1], Cell::text("Error - data1.xlsx"));

    let summary = report.summary.expect("summary should be present");
    assert_eq!(summary.total, 1);
}

#[test]
fn fails_without_output_when_no_files_exist() {
    let dir = tempdir().expect("tempdir should be created");
    let options = options_for(dir.path(), "xlsx");

    let err = combine_pathway_names(&options).expect_err("combine should fail");

    assert!(matches!(err, SheetError::NoInputFiles { .. }));
    assert!(!options.combined_output.exists());
    assert!(!options.ranking_output.exists());
}

#[test]
fn fails_without_output_when_no_file_has_the_column() {
    let dir = tempdir().expect("tempdir should be created");
    std::fs::write(dir.path().join("data0.csv"), "a,b\n1,2\n").expect("fixture should be written");
    std::fs::write(dir.path().join("data1.csv"), "").expect("fixture should be written");

    let options = options_for(dir.path(), "csv");
    let err = combine_pathway_names(&options).expect_err("combine should fail");

    assert!(matches!(err, SheetError::NoUsableInput { file_count: 2 }));
    assert!(!options.combined_output.exists());
}

#[test]
fn empty_value_set_keeps_combined_output() {
    let dir = tempdir().expect("tempdir should be created");
    std::fs::write(dir.path().join("data0.csv"), "g,s,Pathway Name\n1,2,\n")
        .expect("fixture should be written");

    let options = options_for(dir.path(), "csv");
    let report = combine_pathway_names(&options).expect("combine should succeed");

    assert!(options.combined_output.exists());
    assert!(!options.ranking_output.exists());
    assert!(report.summary.is_none());
    assert_eq!(report.ranking_output, None);
    assert_eq!(report.row_count, 1);
    assert!(
        report
            .warnings
            .iter()
            .any(|warning| warning.code == WarningCode::EmptyValueSet)
    );
}

#[test]
fn rejects_unwritable_output_before_reading_inputs() {
    let dir = tempdir().expect("tempdir should be created");
    let options = CombineOptions {
        ranking_output: dir.path().join("ranking.txt"),
        ..options_for(dir.path(), "xlsx")
    };

    let err = combine_pathway_names(&options).expect_err("combine should fail");
    assert!(matches!(err, SheetError::UnsupportedFormat(_)));
}

#[test]
fn cli_reports_top_pathways() {
    let dir = tempdir().expect("tempdir should be created");
    std::fs::write(
        dir.path().join("data3.csv"),
        "g,s,Pathway Name\n1,1,Apoptosis\n2,2,Apoptosis\n",
    )
    .expect("fixture should be written");

    let output = Command::new(env!("CARGO_BIN_EXE_pathway-sheets"))
        .args([
            "combine",
            "-d",
            &dir.path().to_string_lossy(),
            "--extension",
            "csv",
            "-o",
            &dir.path().join("combined.csv").to_string_lossy(),
            "--ranking",
            &dir.path().join("ranking.csv").to_string_lossy(),
        ])
        .output()
        .expect("CLI should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Most common pathways"), "stdout: {stdout}");
    assert!(stdout.contains("Apoptosis"), "stdout: {stdout}");
    assert!(stdout.contains("First 2 row(s):"), "stdout: {stdout}");
    assert!(stdout.contains("Pathway_Names_data3"), "stdout: {stdout}");
    assert!(dir.path().join("combined.csv").exists());
}

#[test]
fn cli_exits_with_code_1_when_no_files() {
    let dir = tempdir().expect("tempdir should be created");
    let combined = dir.path().join("combined.xlsx");

    let status = Command::new(env!("CARGO_BIN_EXE_pathway-sheets"))
        .args([
            "combine",
            "-d",
            &dir.path().to_string_lossy(),
            "-o",
            &combined.to_string_lossy(),
            "--ranking",
            &dir.path().join("ranking.xlsx").to_string_lossy(),
        ])
        .status()
        .expect("CLI should run");

    assert_eq!(status.code(), Some(1));
    assert!(!combined.exists());
}

#[test]
fn cli_succeeds_when_no_pathways_collected() {
    let dir = tempdir().expect("tempdir should be created");
    std::fs::write(dir.path().join("data0.csv"), "g,s,Pathway Name\n1,2,\n")
        .expect("fixture should be written");
    let combined = dir.path().join("combined.csv");
    let ranking = dir.path().join("ranking.csv");

    let output = Command::new(env!("CARGO_BIN_EXE_pathway-sheets"))
        .args([
            "combine",
            "-d",
            &dir.path().to_string_lossy(),
            "--extension",
            "csv",
            "-o",
            &combined.to_string_lossy(),
            "--ranking",
            &ranking.to_string_lossy(),
        ])
        .output()
        .expect("CLI should run");

    assert_eq!(output.status.code(), Some(0));
    assert!(combined.exists());
    assert!(!ranking.exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("frequency analysis skipped"), "stdout: {stdout}");
}

#[test]
fn rejects_empty_index_range() {
    let dir = tempdir().expect("tempdir should be created");
    std::fs::write(dir.path().join("data5.csv"), "g,s,Pathway Name\n1,1,A\n")
        .expect("fixture should be written");
    let options = CombineOptions {
        indices: IndexRange::new(5, 5),
        ..options_for(dir.path(), "csv")
    };

    let err = combine_pathway_names(&options).expect_err("empty range should fail");

    assert!(matches!(err, SheetError::InvalidOption(_)));
    assert!(!options.combined_output.exists());
}
