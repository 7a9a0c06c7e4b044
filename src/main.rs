//! Magpie main entry point
//!
//! Command-line interface for the domain-scoped file-harvesting crawler.

use anyhow::Context;
use clap::Parser;
use magpie::config::{load_config_with_hash, Config};
use magpie::events::ConsoleSink;
use magpie::storage::FsStorage;
use magpie::{CancelFlag, Coordinator, CrawlSummary, CrawlTarget, Mode, TargetSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Magpie: a domain-scoped file-harvesting crawler
///
/// Crawls a single website breadth-first from the given URL and downloads
/// every file matching the selected extensions into category folders
/// (pdf, docs, ppt, xls, zip, images, others) under the download root.
#[derive(Parser, Debug)]
#[command(name = "magpie")]
#[command(version)]
#[command(about = "A domain-scoped file-harvesting crawler", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from (https:// is assumed if omitted)
    #[arg(value_name = "URL")]
    url: String,

    /// Which bundle of file types to harvest: pdf, documents or everything
    #[arg(short, long, default_value = "everything")]
    mode: Mode,

    /// Explicit extensions to harvest (e.g. --ext pdf --ext .docx); overrides --mode
    #[arg(short, long = "ext", value_name = "EXT")]
    ext: Vec<String>,

    /// Directory the category folders are created under
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Show what would be crawled without fetching anything
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration, or fall back to defaults when none was given.
    let mut config = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            tracing::info!("Configuration loaded from {} (hash: {})", path.display(), hash);
            config
        }
        None => Config::default(),
    };

    if let Some(output) = &cli.output {
        config.output.download_root = output.display().to_string();
    }

    // A bare hostname is accepted the way a browser would take it.
    let seed = normalize_seed(&cli.url);

    let targets = if cli.ext.is_empty() {
        cli.mode.target_set()
    } else {
        TargetSet::from_extensions(&cli.ext)
    };
    anyhow::ensure!(!targets.is_empty(), "no usable target extensions given");

    let target = CrawlTarget::new(&seed, targets)?;

    if cli.dry_run {
        print_plan(&target, &config);
        return Ok(());
    }

    let storage = Arc::new(FsStorage::new(Path::new(&config.output.download_root))?);
    tracing::info!("Saving files under {}", storage.root().display());

    // Ctrl-C requests a cooperative stop; the loop observes it at the next
    // iteration boundary and lets in-flight downloads finish.
    let cancel = CancelFlag::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupt received, finishing in-flight work...");
                cancel.cancel();
            }
        });
    }

    let mut coordinator =
        Coordinator::new(target, config, storage, Arc::new(ConsoleSink), cancel)?;
    let summary = coordinator.run().await?;

    print_summary(&summary);
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("magpie=info,warn"),
            1 => EnvFilter::new("magpie=debug,info"),
            2 => EnvFilter::new("magpie=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Prepends https:// when the seed has no scheme
fn normalize_seed(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Handles --dry-run: shows the resolved plan without crawling
fn print_plan(target: &CrawlTarget, config: &Config) {
    println!("=== Magpie Dry Run ===\n");
    println!("Seed URL:  {}", target.base_url());
    println!("Domain:    {}", target.domain());
    println!("Targets:   {}", target.targets().extensions().join(", "));
    println!();
    println!("Download root:        {}", config.output.download_root);
    println!("Retry attempts:       {}", config.crawler.retry_attempts);
    println!("Retry backoff:        {}ms", config.crawler.retry_backoff_ms);
    println!("Concurrent downloads: {}", config.crawler.max_concurrent_downloads);
    println!("Page timeout:         {}s", config.http.page_timeout_secs);
    println!("File timeout:         {}s", config.http.file_timeout_secs);
    println!("\n✓ Configuration is valid");
}

fn print_summary(summary: &CrawlSummary) {
    println!("\nScan complete{}", if summary.cancelled { " (cancelled)" } else { "" });
    println!("  Pages visited:    {}", summary.pages_visited);
    println!("  Pages failed:     {}", summary.pages_failed);
    println!("  Files downloaded: {}", summary.files_downloaded);
    println!("  Duplicates:       {}", summary.files_skipped);
    println!("  Failed downloads: {}", summary.downloads_failed);
    if let Some(duration) = summary.duration() {
        println!("  Elapsed:          {}s", duration.num_seconds());
    }
}
