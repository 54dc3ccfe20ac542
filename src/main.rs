//! firehose: fetch every configured release feed, enrich it from the CNCF
//! landscape, and write one JSON dataset.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use firehose::output::{OutputData, Performance, RunSummary};
use firehose::source::HttpTransport;
use firehose::{fetch_all, CatalogIndex, FeedConfig};

const LANDSCAPE_URL: &str = "https://raw.githubusercontent.com/cncf/landscape/master/landscape.yml";

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Aggregate project release feeds into a single newest-first dataset.
#[derive(Parser)]
#[command(name = "firehose", version, about, long_about = None)]
struct Cli {
    /// YAML file listing the feeds to fetch.
    #[arg(long, env = "FIREHOSE_FEEDS", default_value = "config/feeds.yaml")]
    feeds: PathBuf,

    /// Catalog document: an http(s) URL or a local file path.
    #[arg(long, env = "FIREHOSE_CATALOG", default_value = LANDSCAPE_URL)]
    catalog: String,

    /// Where to write the JSON dataset.
    #[arg(short, long, env = "FIREHOSE_OUTPUT", default_value = "data/releases.json")]
    output: PathBuf,

    /// Per-request HTTP timeout, in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Fail the run unless more than this fraction of feeds succeed.
    #[arg(long, default_value_t = 0.5)]
    min_success_rate: f64,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Debug, clap::ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match cli.verbose {
        0 => "firehose=info",
        1 => "firehose=debug",
        _ => "firehose=trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // stdout is reserved for the run summary.
    match cli.log_format {
        LogFormat::Text => fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn load_catalog(location: &str, transport: &HttpTransport) -> Result<CatalogIndex> {
    let bytes = if location.starts_with("http://") || location.starts_with("https://") {
        transport
            .get_bytes(location)
            .with_context(|| format!("failed to fetch catalog from {location}"))?
    } else {
        std::fs::read(Path::new(location))
            .with_context(|| format!("failed to read catalog {location}"))?
    };
    Ok(CatalogIndex::from_yaml(&bytes)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let started = Instant::now();
    info!(version = env!("CARGO_PKG_VERSION"), "starting firehose");

    let transport = HttpTransport::new(Duration::from_secs(cli.timeout_secs))?;

    // -- catalog -------------------------------------------------------------
    let catalog_started = Instant::now();
    let catalog = load_catalog(&cli.catalog, &transport)?;
    let catalog_fetch_duration = catalog_started.elapsed();
    info!(
        projects = catalog.len(),
        elapsed = ?catalog_fetch_duration,
        "loaded catalog"
    );

    // -- feeds ---------------------------------------------------------------
    let config = FeedConfig::load(&cli.feeds)
        .with_context(|| format!("failed to load feeds from {}", cli.feeds.display()))?;
    info!(feeds = config.feeds.len(), "loaded feed config");

    let feeds_started = Instant::now();
    let result = fetch_all(&config.feeds, &catalog, &transport);
    let feeds_fetch_duration = feeds_started.elapsed();

    info!(
        successful = result.successful(),
        failed = result.failed(),
        releases = result.total_entries(),
        elapsed = ?feeds_fetch_duration,
        "fetched feeds"
    );

    if !result.meets_threshold(cli.min_success_rate) {
        bail!(
            "catastrophic failure: only {:.1}% of feeds succeeded (threshold: more than {:.1}%)",
            result.success_rate() * 100.0,
            cli.min_success_rate * 100.0
        );
    }

    // -- output --------------------------------------------------------------
    let performance = Performance {
        catalog_fetch_duration,
        feeds_fetch_duration,
    };
    let output = OutputData::new(result, catalog.len(), performance, started.elapsed());
    output.write_json(&cli.output)?;

    let duration = started.elapsed();
    info!(output = %cli.output.display(), elapsed = ?duration, "pipeline complete");

    let summary = RunSummary::new(&output.metadata.stats, duration);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
