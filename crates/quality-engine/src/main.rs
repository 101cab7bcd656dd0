//! CLI entry point for the data quality engine.

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use quality_engine::{
    CleaningOperation, DataCleaner, Dataset, EngineConfig, FillStrategy, ReportGenerator,
    TransformSummary, Visualizer,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// CLI-compatible cleaning operation enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOperation {
    /// Fill missing cells (see --strategy)
    FillMissing,
    /// Drop rows with any missing cell
    DropMissing,
    /// Keep the first occurrence of each duplicate row
    RemoveDuplicates,
    /// Drop rows outside the 1.5 x IQR fences
    RemoveOutliers,
    /// Min-max scale numeric columns to [0, 1]
    Normalize,
    /// Z-score scale numeric columns
    Standardize,
}

/// CLI-compatible fill strategy enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFillStrategy {
    /// Column mean (numeric), mode otherwise
    Mean,
    /// Column median (numeric), mode otherwise
    Median,
    /// Most frequent value
    Mode,
}

impl From<CliFillStrategy> for FillStrategy {
    fn from(cli: CliFillStrategy) -> Self {
        match cli {
            CliFillStrategy::Mean => FillStrategy::Mean,
            CliFillStrategy::Median => FillStrategy::Median,
            CliFillStrategy::Mode => FillStrategy::Mode,
        }
    }
}

impl CliOperation {
    fn into_operation(self, strategy: CliFillStrategy) -> CleaningOperation {
        match self {
            CliOperation::FillMissing => CleaningOperation::FillMissing {
                strategy: strategy.into(),
            },
            CliOperation::DropMissing => CleaningOperation::DropMissing,
            CliOperation::RemoveDuplicates => CleaningOperation::RemoveDuplicates,
            CliOperation::RemoveOutliers => CleaningOperation::RemoveOutliers,
            CliOperation::Normalize => CleaningOperation::Normalize,
            CliOperation::Standardize => CleaningOperation::Standardize,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Data quality profiling and cleaning",
    long_about = "Profile a CSV dataset, apply one cleaning operation at a time, \
                  and export chart-ready aggregates.\n\n\
                  EXAMPLES:\n  \
                  quality-engine profile -i data.csv\n\n  \
                  quality-engine profile -i data.csv --json | jq .quality\n\n  \
                  quality-engine clean -i data.csv --op fill-missing --strategy median -o clean.csv\n\n  \
                  quality-engine charts -i clean.csv --original data.csv"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// JSON file with chart limits (histogram_bins, heatmap_rows, ...)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Profile a dataset and print its quality report
    Profile(ProfileArgs),
    /// Apply one cleaning operation and write the result
    Clean(CleanArgs),
    /// Print every chart payload as JSON
    Charts(ChartsArgs),
}

#[derive(Args, Debug)]
struct ProfileArgs {
    /// Path to the CSV file to profile
    #[arg(short, long)]
    input: String,

    /// Output JSON to stdout instead of the text report
    ///
    /// Disables all logs; only the JSON report is written.
    #[arg(long)]
    json: bool,

    /// Write the JSON report to this directory as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CleanArgs {
    /// Path to the CSV file to clean
    #[arg(short, long)]
    input: String,

    /// Operation to apply
    #[arg(long, value_enum)]
    op: CliOperation,

    /// Fill strategy for fill-missing
    #[arg(long, value_enum, default_value = "mean")]
    strategy: CliFillStrategy,

    /// Path of the cleaned CSV
    #[arg(short, long)]
    output: PathBuf,

    /// Output the transformation summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ChartsArgs {
    /// Current (possibly cleaned) dataset
    #[arg(short, long)]
    input: String,

    /// Original dataset for the heatmap and before/after charts
    ///
    /// Defaults to the input itself.
    #[arg(long)]
    original: Option<String>,
}

impl Command {
    /// Whether stdout must carry nothing but JSON.
    fn json_output(&self) -> bool {
        match self {
            Command::Profile(args) => args.json,
            Command::Clean(args) => args.json,
            Command::Charts(_) => true,
        }
    }
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled so stdout only carries JSON.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.quiet, cli.command.json_output());

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Profile(args) => run_profile(&args, &config),
        Command::Clean(args) => run_clean(&args),
        Command::Charts(args) => run_charts(&args, config),
    }
}

/// Read an `EngineConfig` from JSON, or use the defaults.
fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: EngineConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    config.validate()?;

    debug!("Loaded config: {:?}", config);
    Ok(config)
}

fn run_profile(args: &ProfileArgs, config: &EngineConfig) -> Result<()> {
    let dataset = load_dataset(&args.input)?;
    let report = ReportGenerator::build_summary(&dataset, config);

    if let Some(ref dir) = args.emit_report {
        let stem = extract_file_stem(&args.input);
        let path = ReportGenerator::write_report_to_file(&report, dir, &stem)?;
        info!("Report written to: {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", ReportGenerator::render_text(&report));
    }

    Ok(())
}

fn run_clean(args: &CleanArgs) -> Result<()> {
    let dataset = load_dataset(&args.input)?;
    let op = args.op.into_operation(args.strategy);

    info!("Applying {}", op);
    let outcome = DataCleaner::apply(&dataset, op);

    write_dataset(&outcome.dataset, &args.output)?;
    info!("Cleaned dataset saved: {}", args.output.display());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.summary)?);
    } else {
        print_transform_summary(&outcome.summary, &args.output);
    }

    Ok(())
}

fn run_charts(args: &ChartsArgs, config: EngineConfig) -> Result<()> {
    let current = load_dataset(&args.input)?;
    let original = match args.original {
        Some(ref path) => load_dataset(path)?,
        None => current.clone(),
    };

    let bundle = Visualizer::new(config).bundle(&original, &current);
    println!("{}", serde_json::to_string_pretty(&bundle)?);

    Ok(())
}

/// Print a human-readable summary of one transformation.
fn print_transform_summary(summary: &TransformSummary, output: &Path) {
    println!();
    println!("{}", "=".repeat(60));
    println!("{}", summary.message);
    println!("{}", "=".repeat(60));
    println!(
        "  Rows: {} -> {} ({} removed)",
        summary.before.rows,
        summary.after.rows,
        summary.rows_removed()
    );
    println!("  Columns: {}", summary.after.columns);

    let metrics = [
        ("Missing values", summary.before.missing, summary.after.missing),
        ("Duplicate rows", summary.before.duplicates, summary.after.duplicates),
        ("Outliers", summary.before.outliers, summary.after.outliers),
    ];
    for (label, before, after) in metrics {
        if let (Some(before), Some(after)) = (before, after) {
            println!("  {}: {} -> {}", label, before, after);
        }
    }

    println!("  Output: {}", output.display());
    println!("{}", "=".repeat(60));
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

fn load_dataset(path: &str) -> Result<Dataset> {
    if !Path::new(path).exists() {
        return Err(anyhow!("Input file not found: {}", path));
    }

    info!("Loading dataset from: {}", path);
    let df = load_csv_with_fallbacks(path)?;
    info!("Dataset loaded successfully: {:?}", df.shape());

    Dataset::try_from(&df).with_context(|| format!("Unsupported dataset: {}", path))
}

/// Load CSV, retrying without date parsing when typed parsing fails.
fn load_csv_with_fallbacks(path: &str) -> Result<DataFrame> {
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_try_parse_dates(true),
        )
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Typed loading failed: {}", e);
        }
    }

    CsvReadOptions::default()
        .with_infer_schema_length(None)
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
        .map_err(|e| anyhow!("Failed to read {}: {}", path, e))
}

fn write_dataset(dataset: &Dataset, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut df = dataset.to_dataframe()?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut df)?;

    Ok(())
}
