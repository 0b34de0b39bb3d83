use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use pathway_sheets::{
    CombineOptions, CombineReport, HeaderMode, IndexRange, SheetWarning, TranslateOptions,
    TranslationReport, combine_pathway_names, translate_identifiers,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "pathway-sheets",
    version,
    about = "Combine pathway columns from numbered spreadsheets and translate reaction identifiers"
)]
struct Cli {
    /// Enable debug logging and detailed warning output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Combine one column of every numbered input file and rank its values by frequency.
    Combine(CombineArgs),
    /// Map primary identifiers to the preferred alternate identifier.
    Translate(TranslateArgs),
}

#[derive(Debug, Args)]
struct CombineArgs {
    /// Directory containing the numbered input files.
    #[arg(short = 'd', long, default_value = ".")]
    input_dir: PathBuf,

    /// File name prefix before the index.
    #[arg(long, default_value = "data")]
    prefix: String,

    /// File extension after the index (xlsx, xls, ods, csv).
    #[arg(long, default_value = "xlsx")]
    extension: String,

    /// Index range to scan, START..END with END exclusive.
    #[arg(long, default_value = "0..30")]
    range: String,

    /// 1-based column to extract.
    #[arg(long, default_value_t = 3)]
    column: usize,

    /// Treat the first row of every input as data instead of a header.
    #[arg(long)]
    no_header: bool,

    /// Combined table output path (.xlsx or .csv).
    #[arg(short, long, default_value = "combined_pathway_names.xlsx")]
    output: PathBuf,

    /// Frequency ranking output path (.xlsx or .csv).
    #[arg(long, default_value = "most_common_pathways.xlsx")]
    ranking: PathBuf,

    /// Number of ranked entries to print.
    #[arg(long, default_value_t = 20)]
    top: usize,

    #[command(flatten)]
    csv: CsvArgs,

    /// Print the run report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct TranslateArgs {
    /// Identifier table with primary, alternate A, alternate B and alternate C columns.
    #[arg(short, long)]
    input: PathBuf,

    /// Skip the first row as a header.
    #[arg(long)]
    has_header: bool,

    /// Also write the mapping to this path (.xlsx or .csv).
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    csv: CsvArgs,

    /// Print the mapping as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct CsvArgs {
    /// Field delimiter for CSV input and output.
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Text encoding of CSV input (e.g. utf-8, windows-1254).
    #[arg(long, default_value = "utf-8")]
    encoding: String,
}

fn parse_delimiter(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        anyhow::bail!("delimiter must be a single ASCII character");
    }
    Ok(delimiter as u8)
}

fn parse_combine_options(args: &CombineArgs) -> Result<CombineOptions> {
    let indices = IndexRange::from_str(&args.range)
        .map_err(|error| anyhow!("invalid index range: {error}"))
        .context("failed to parse --range")?;

    let column = args
        .column
        .checked_sub(1)
        .ok_or_else(|| anyhow!("--column is 1-based and must be at least 1"))?;

    let extension = args.extension.trim_start_matches('.').to_string();
    if extension.is_empty() {
        anyhow::bail!("--extension cannot be empty");
    }

    Ok(CombineOptions {
        input_dir: args.input_dir.clone(),
        prefix: args.prefix.clone(),
        extension,
        indices,
        column,
        header_mode: if args.no_header {
            HeaderMode::NoHeader
        } else {
            HeaderMode::HasHeader
        },
        combined_output: args.output.clone(),
        ranking_output: args.ranking.clone(),
        top: args.top,
        delimiter: parse_delimiter(args.csv.delimiter)?,
        encoding: args.csv.encoding.clone(),
    })
}

fn parse_translate_options(args: &TranslateArgs) -> Result<TranslateOptions> {
    Ok(TranslateOptions {
        input: args.input.clone(),
        header_mode: if args.has_header {
            HeaderMode::HasHeader
        } else {
            HeaderMode::NoHeader
        },
        output: args.output.clone(),
        delimiter: parse_delimiter(args.csv.delimiter)?,
        encoding: args.csv.encoding.clone(),
    })
}

fn log_warnings(warnings: &[SheetWarning], verbose: bool) {
    if warnings.is_empty() {
        return;
    }

    eprintln!("warning: {} issue(s) detected", warnings.len());
    if verbose {
        for warning in warnings {
            eprintln!(
                "  - {:?} file={:?} row={:?}: {}",
                warning.code, warning.file, warning.row, warning.message
            );
        }
    }
}

fn print_combine_report(report: &CombineReport) {
    println!(
        "Combined {} file(s) into '{}'",
        report.file_count,
        report.combined_output.display()
    );
    println!("Each column has {} row(s)", report.row_count);

    println!();
    println!("First {} row(s):", report.preview.len());
    println!("{}", report.headers.join(" | "));
    for row in &report.preview {
        let cells = row.iter().map(ToString::to_string).collect::<Vec<_>>();
        println!("{}", cells.join(" | "));
    }

    let Some(summary) = &report.summary else {
        println!("No pathway names collected; frequency analysis skipped");
        return;
    };

    println!();
    println!("Pathway statistics:");
    println!("  total occurrences:        {}", summary.total);
    println!("  distinct pathways:        {}", summary.distinct);
    println!("  average occurrences:      {:.2}", summary.average);
    println!("  pathways seen once:       {}", summary.singletons);
    println!("  pathways seen repeatedly: {}", summary.repeated);

    println!();
    println!("Most common pathways (top {}):", report.top.len());
    println!("{}", "=".repeat(80));
    println!("{:<4} {:<15} {:<60}", "Rank", "Count", "Pathway");
    println!("{}", "=".repeat(80));
    for entry in &report.top {
        println!(
            "{:<4} {:<15} {:<60}",
            entry.rank,
            entry.count,
            entry.value.to_string()
        );
    }

    if let Some(ranking) = &report.ranking_output {
        println!();
        println!("Full ranking written to '{}'", ranking.display());
    }
}

fn print_translation_report(report: &TranslationReport) {
    for entry in report.map.iter() {
        println!("{} -> {}", entry.primary, entry.translation);
    }
    if report.skipped_rows > 0 {
        eprintln!(
            "skipped {} row(s) without a primary identifier",
            report.skipped_rows
        );
    }
}

fn run_combine(args: &CombineArgs, verbose: bool) -> Result<ExitCode> {
    let options = parse_combine_options(args)?;
    let report = combine_pathway_names(&options).with_context(|| {
        format!(
            "failed to combine pathway names from '{}'",
            options.input_dir.display()
        )
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_combine_report(&report);
    }
    log_warnings(&report.warnings, verbose);

    Ok(ExitCode::SUCCESS)
}

fn run_translate(args: &TranslateArgs, verbose: bool) -> Result<ExitCode> {
    let options = parse_translate_options(args)?;
    let report = translate_identifiers(&options).with_context(|| {
        format!(
            "failed to translate identifiers from '{}'",
            options.input.display()
        )
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_translation_report(&report);
    }
    log_warnings(&report.warnings, verbose);

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_directive = if cli.verbose {
        "pathway_sheets=debug"
    } else {
        "pathway_sheets=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let outcome = match &cli.command {
        Commands::Combine(args) => run_combine(args, cli.verbose),
        Commands::Translate(args) => run_translate(args, cli.verbose),
    };

    match outcome {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}
