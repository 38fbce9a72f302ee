//! Site-Sounder main entry point
//!
//! This is the command-line interface for the Site-Sounder site crawler.

use clap::Parser;
use site_sounder::config::{coerce_seed_scheme, validate, CrawlConfig};
use site_sounder::crawler::{crawl, CancelToken};
use site_sounder::output::write_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Sounder: a depth-bounded single-site crawler
///
/// Site-Sounder crawls one website breadth-first from a seed URL, records
/// the HTTP outcome of every same-domain page it visits, and writes a
/// markdown report of what it found.
#[derive(Parser, Debug)]
#[command(name = "site-sounder")]
#[command(version = "1.0.0")]
#[command(about = "A depth-bounded single-site crawler", long_about = None)]
struct Cli {
    /// Seed URL to crawl (https:// is assumed when no scheme is given)
    #[arg(value_name = "URL")]
    url: String,

    /// Maximum depth to crawl from the seed
    #[arg(long, default_value_t = 3)]
    max_depth: u32,

    /// Delay between consecutive requests, in seconds
    #[arg(long, default_value_t = 1.0)]
    delay: f64,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

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

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = CrawlConfig {
        url: coerce_seed_scheme(&cli.url),
        max_depth: cli.max_depth,
        delay: cli.delay,
        output: cli.output,
    };

    if let Err(e) = validate(&config) {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    // Ctrl-C flips the token; the crawl loop observes it at its iteration
    // boundaries and exits with whatever it has collected so far.
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing current page...");
            handler_token.cancel();
        }
    });

    let report = match crawl(&config, cancel).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed to start: {}", e);
            return Err(e.into());
        }
    };

    if report.partial {
        tracing::warn!("Crawl was interrupted; the report is partial");
    }

    write_report(&report, config.output.as_deref())?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_sounder=info,warn"),
            1 => EnvFilter::new("site_sounder=debug,info"),
            2 => EnvFilter::new("site_sounder=trace,debug"),
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
