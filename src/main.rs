use anyhow::Context;
use clap::{Parser, ValueEnum};
use neardup_core::{DedupConfig, EmptyCorpusPolicy, DEFAULT_THRESHOLD};
use neardup_report::{render_json, render_text, ReportDriver};
use neardup_storage::{load_dataset, save_dataset};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Find and remove near-duplicate records in an instruction dataset
#[derive(Parser, Debug)]
#[command(name = "neardup")]
#[command(about = "Find near-duplicate records in a JSON dataset", long_about = None)]
struct Args {
    /// Dataset file (JSON array, or JSON Lines for .jsonl/.ndjson)
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the filtered dataset
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Similarity cutoff; pairs must score strictly above it
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Drop the later record of each input/output duplicate pair
    #[arg(long)]
    remove_duplicates: bool,

    /// Keep the dataset when a field has no text at all, instead of emptying it
    #[arg(long)]
    keep_on_empty_field: bool,

    /// Fields to analyze, in order (default: all fields of the first record)
    #[arg(short, long = "field")]
    fields: Vec<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if args.output.is_some() && !args.remove_duplicates {
        info!("--output without --remove-duplicates writes the dataset unchanged");
    }

    let policy = if args.keep_on_empty_field {
        EmptyCorpusPolicy::KeepDataset
    } else {
        EmptyCorpusPolicy::Discard
    };
    let config = DedupConfig::default()
        .with_threshold(args.threshold)
        .with_remove_duplicates(args.remove_duplicates)
        .with_empty_corpus_policy(policy);
    config.validate()?;

    let dataset = load_dataset(&args.input)?;
    info!("Loaded {} records from {:?}", dataset.len(), args.input);

    let driver = ReportDriver::new(config).with_fields(args.fields);
    let report = driver.run(dataset)?;

    match args.format {
        ReportFormat::Text => print!("{}", render_text(&report)),
        ReportFormat::Json => println!("{}", render_json(&report)?),
    }

    if let Some(path) = &args.output {
        save_dataset(path, &report.dataset)
            .with_context(|| format!("Failed to save filtered dataset to {:?}", path))?;
        info!("Wrote {} records to {:?}", report.dataset.len(), path);
    }

    Ok(())
}
