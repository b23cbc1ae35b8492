//! Sitescribe main entry point
//!
//! This is the command-line interface for the Sitescribe site transcriber.

use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use sitescribe::config::{
    load_config_with_hash, validate, OutputFormat, PageLayout, Settings,
};
use sitescribe::output::print_statistics;
use sitescribe::url::NormalizationPolicy;
use tracing_subscriber::EnvFilter;

/// Sitescribe: a bounded site-to-document transcriber
///
/// Sitescribe follows links depth-first from a single seed address, within
/// a depth limit and a page budget, and writes the visible text of every
/// page it reaches into one document.
#[derive(Parser, Debug)]
#[command(name = "sitescribe")]
#[command(version)]
#[command(about = "Transcribe a website into a single document", long_about = None)]
struct Cli {
    /// Seed URL (prompted for on stdin when omitted)
    #[arg(value_name = "SEED")]
    seed: Option<String>,

    /// Output document path [default: output.pdf]
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum link hops from the seed
    #[arg(long)]
    max_depth: Option<u32>,

    /// Maximum number of pages to fetch
    #[arg(long)]
    max_pages: Option<u32>,

    /// Follow links to other origins
    #[arg(long)]
    allow_cross_origin: bool,

    /// URL normalization policy (exact, strip-fragment, canonical)
    #[arg(long, value_name = "POLICY")]
    normalization: Option<NormalizationPolicy>,

    /// Per-page navigation timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Output format (pdf, markdown, text); inferred from OUTPUT by default
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Page layout (continuous, page-per-entry)
    #[arg(long)]
    layout: Option<PageLayout>,

    /// Validate settings and show what would be crawled without crawling
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

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut settings = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((settings, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    settings
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Settings::default(),
    };

    apply_overrides(&mut settings, &cli);
    validate(&settings).context("Invalid settings")?;

    let seed = match cli.seed.clone() {
        Some(seed) => seed,
        None => prompt_for_seed().context("Failed to read seed URL from stdin")?,
    };

    if cli.dry_run {
        handle_dry_run(&settings, &seed);
        return Ok(());
    }

    handle_crawl(&settings, &seed, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitescribe=info,warn"),
            1 => EnvFilter::new("sitescribe=debug,info"),
            2 => EnvFilter::new("sitescribe=trace,debug"),
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

/// Command-line flags win over the configuration file
fn apply_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(max_depth) = cli.max_depth {
        settings.crawler.max_depth = max_depth;
    }
    if let Some(max_pages) = cli.max_pages {
        settings.crawler.max_pages = max_pages;
    }
    if cli.allow_cross_origin {
        settings.crawler.same_origin = false;
    }
    if let Some(policy) = cli.normalization {
        settings.crawler.normalization = policy;
    }
    if let Some(timeout) = cli.timeout {
        settings.crawler.navigation_timeout_secs = timeout;
    }
    if let Some(output) = &cli.output {
        settings.output.path = output.clone();
    }
    if let Some(format) = cli.format {
        settings.output.format = Some(format);
    }
    if let Some(layout) = cli.layout {
        settings.output.layout = layout;
    }
}

fn prompt_for_seed() -> io::Result<String> {
    print!("Please enter the URL to scrape: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Handles the --dry-run mode: shows the effective settings
fn handle_dry_run(settings: &Settings, seed: &str) {
    println!("=== Sitescribe Dry Run ===\n");

    println!("Seed: {}", seed);

    println!("\nCrawler:");
    println!("  Max depth: {}", settings.crawler.max_depth);
    println!("  Max pages: {}", settings.crawler.max_pages);
    println!("  Same origin: {}", settings.crawler.same_origin);
    println!("  Normalization: {}", settings.crawler.normalization);
    println!(
        "  Navigation timeout: {}s",
        settings.crawler.navigation_timeout_secs
    );

    println!("\nSession:");
    println!("  User agent: {}", settings.session.user_agent);
    println!("  Max redirects: {}", settings.session.max_redirects);

    println!("\nOutput:");
    println!("  Path: {}", settings.output.path.display());
    println!("  Format: {:?}", settings.output.resolved_format());
    println!("  Layout: {:?}", settings.output.layout);
    println!(
        "  Blocked extensions: {}",
        settings.filter.blocked_extensions.len()
    );

    match sitescribe::validate_seed(seed) {
        Ok(url) => println!("\n✓ Would start transcribing at {}", url),
        Err(e) => println!("\n✗ Seed is not usable: {}", e),
    }
}

/// Handles the main transcription run
async fn handle_crawl(settings: &Settings, seed: &str, quiet: bool) -> anyhow::Result<()> {
    match sitescribe::run(settings, seed).await {
        Ok(stats) => {
            tracing::info!(
                "Transcript of {} pages written to {}",
                stats.pages_fetched,
                settings.output.path.display()
            );
            if !quiet {
                println!();
                print_statistics(&stats);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Transcription failed: {}", e);
            Err(e.into())
        }
    }
}
