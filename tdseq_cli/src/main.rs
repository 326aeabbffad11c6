use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use tdseq_core::{AnalysisResult, Analyzer, TdConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod loader;

#[derive(Parser)]
#[command(name = "tdseq", about = "TD Sequential setup/countdown markers for OHLC CSV files")]
struct Cli {
    /// CSV file, or a directory of CSV files.
    #[arg(long, short)]
    input: PathBuf,

    /// JSON file with analysis parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Emit every setup count as it forms (overrides the config file).
    #[arg(long)]
    emit_partial: Option<bool>,

    /// Keep only finished or still-open countdowns (overrides the config file).
    #[arg(long)]
    only_complete: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Full analysis result
    Json,
    /// Chart overlay records
    Overlay,
    /// One marker per line
    Table,
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: String,
    #[serde(flatten)]
    result: &'a AnalysisResult,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let analyzer = Analyzer::new(load_config(&cli)?);

    for path in loader::collect_inputs(&cli.input)? {
        process_file(&analyzer, &path, cli.format)?;
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<TdConfig> {
    let mut conf: HashMap<String, Value> = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => HashMap::new(),
    };
    if let Some(v) = cli.emit_partial {
        conf.insert("setup_emit_partial".to_string(), Value::from(v));
    }
    if let Some(v) = cli.only_complete {
        conf.insert("countdown_only_complete".to_string(), Value::from(v));
    }
    Ok(TdConfig::new(Some(conf))?)
}

fn process_file(analyzer: &Analyzer, path: &Path, format: OutputFormat) -> Result<()> {
    info!(path = %path.display(), "processing file");
    let bars = loader::load_csv_file(path, &analyzer.required_fields())?;
    let (first, last) = match (bars.bars().first(), bars.last()) {
        (Some(first), Some(last)) => (first.time, last.time),
        _ => return Ok(()),
    };
    let n_bars = bars.len();
    let result = analyzer
        .run_checked(bars)
        .with_context(|| format!("analyzing {}", path.display()))?;
    info!(
        bars = n_bars,
        first = %first,
        last = %last,
        markers = result.markers.len(),
        setups = result.completed_setups.len(),
        "analysis completed"
    );

    match format {
        OutputFormat::Json => {
            let report = FileReport {
                file: path.display().to_string(),
                result: &result,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Overlay => {
            println!("{}", serde_json::to_string_pretty(&analyzer.overlay(&result))?);
        }
        OutputFormat::Table => {
            println!("# {}", path.display());
            for m in &result.markers {
                let flag = if m.perfected { " P" } else { "" };
                let end = if m.is_terminal { " *" } else { "" };
                println!("{}\t{:<15}\t{:>2}{}{}", m.time, m.kind.to_string(), m.label, end, flag);
            }
            for sig in &result.exhaustion {
                let dir = sig.direction.to_string();
                println!("{}\texhaustion-{:<4}\t{:.4}", sig.time, dir, sig.price);
            }
        }
    }
    Ok(())
}
