//! drift-check
//!
//! Pipeline entry point: compares a baseline CSV with the latest CSV (or a
//! folder of CSVs), writes `avg_ks.txt` and a `DRIFT` marker into the output
//! directory, and prints the per-column drift report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use drift_guard::drift::{DriftConfig, DriftDetector};
use drift_guard::formatters::{FormatterConfig, HumanFormatter, JsonFormatter, ReportFormatter};
use drift_guard::logging::{init_logging, LogFormat, LoggingConfig};
use drift_guard::signal::DriftSignal;
use drift_guard::sources::CsvSource;
use tracing::{info, warn, Level};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    Json,
    Human,
}

#[derive(Debug, Parser)]
#[command(name = "drift-check", version, about = "Detect feature drift between two CSV datasets")]
struct Args {
    /// Baseline (reference) CSV file, folder or glob
    #[arg(long)]
    baseline: String,

    /// Latest (current) CSV file, folder or glob
    #[arg(long, alias = "latest-folder")]
    latest: String,

    /// Average KS statistic at or above which the DRIFT marker is written
    #[arg(long)]
    threshold: f64,

    /// Output directory for avg_ks.txt and DRIFT
    #[arg(long)]
    out: PathBuf,

    /// Comma-separated feature columns (default: all numeric baseline columns)
    #[arg(long, value_delimiter = ',')]
    features: Vec<String>,

    /// JSON file with drift thresholds
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-column PSI threshold (overrides --config)
    #[arg(long)]
    psi_threshold: Option<f64>,

    /// Per-column KS p-value threshold (overrides --config)
    #[arg(long)]
    ks_pvalue_threshold: Option<f64>,

    /// Write the per-column report to this file instead of stdout
    #[arg(long)]
    report: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "json")]
    format: ReportFormat,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: LogFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn drift_config(&self) -> Result<DriftConfig> {
        let mut config = match &self.config {
            Some(path) => DriftConfig::from_file(path)?,
            None => DriftConfig::default(),
        };
        if let Some(psi) = self.psi_threshold {
            config = config.with_psi_threshold(psi);
        }
        if let Some(pvalue) = self.ks_pvalue_threshold {
            config = config.with_ks_pvalue_threshold(pvalue);
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging = LoggingConfig::default().with_format(args.log_format);
    if args.verbose {
        logging = logging.with_drift_level(Level::DEBUG);
    }
    init_logging(logging).map_err(|e| anyhow::anyhow!(e))?;

    let config = args.drift_config()?;

    let baseline = CsvSource::new(&args.baseline)
        .with_context(|| format!("cannot open baseline '{}'", args.baseline))?
        .load()
        .await
        .context("cannot load baseline")?
        .with_name("baseline");
    let current = CsvSource::new(&args.latest)
        .with_context(|| format!("cannot open latest '{}'", args.latest))?
        .load()
        .await
        .context("cannot load latest")?
        .with_name("current");

    info!(
        baseline.rows = baseline.num_rows(),
        current.rows = current.num_rows(),
        "Datasets loaded"
    );

    let signal = DriftSignal::compute(&baseline, &current, args.threshold)?;
    signal
        .write_outputs(&args.out)
        .with_context(|| format!("cannot write outputs to {}", args.out.display()))?;
    println!("AVG_KS={:.4}", signal.avg_ks);

    let detector = DriftDetector::new(config)?;
    let report = detector.check_features(&baseline, &current, args.features.as_slice())?;

    let rendered = match args.format {
        ReportFormat::Json => JsonFormatter::new().format(&report)?,
        ReportFormat::Human => {
            HumanFormatter::with_config(FormatterConfig::default()).format(&report)?
        }
    };
    match &args.report {
        Some(path) => std::fs::write(path, &rendered)
            .with_context(|| format!("cannot write report to {}", path.display()))?,
        None => println!("{rendered}"),
    }

    if report.has_drift() {
        warn!(alerts = ?report.alerts(), "DRIFT ALERT");
    }
    if signal.is_drift() {
        warn!(avg_ks = signal.avg_ks, threshold = signal.threshold, "Drift signal raised");
    }

    Ok(())
}
