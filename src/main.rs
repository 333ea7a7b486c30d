//! Sitesentry main entry point
//!
//! This is the command-line interface for the Sitesentry check runner.

use clap::Parser;
use sitesentry::check::load_definition;
use sitesentry::{run_check, CheckOutcome, CheckSpec, ContentCondition};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitesentry: a website check runner
///
/// Sitesentry executes one check definition against a live site: probe a
/// single page, validate every sitemap entry, or crawl a whole site
/// section. A failed check prints its report and exits non-zero, which
/// makes the runner usable from cron or CI.
#[derive(Parser, Debug)]
#[command(name = "sitesentry")]
#[command(version = "1.0.0")]
#[command(about = "A website check runner", long_about = None)]
struct Cli {
    /// Path to TOML check definition file
    #[arg(value_name = "DEFINITION")]
    definition: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the definition and show what would run, without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading check definition from: {}", cli.definition.display());
    let spec = match load_definition(&cli.definition) {
        Ok(spec) => {
            tracing::info!("Loaded {} check against {}", spec.kind, spec.url);
            spec
        }
        Err(e) => {
            tracing::error!("Failed to load check definition: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&spec);
        return Ok(());
    }

    match run_check(&spec).await {
        CheckOutcome::Success => {
            println!("OK: {}", spec.url);
            Ok(())
        }
        CheckOutcome::Failure(report) => {
            println!("{}", report);
            std::process::exit(1);
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitesentry=info,warn"),
            1 => EnvFilter::new("sitesentry=debug,info"),
            2 => EnvFilter::new("sitesentry=trace,debug"),
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

/// Handles the --dry-run mode: validates the definition and shows what would run
fn handle_dry_run(spec: &CheckSpec) {
    println!("=== Sitesentry Dry Run ===\n");

    println!("Check:");
    println!("  Kind: {}", spec.kind);
    println!("  URL: {}", spec.url);
    println!("  Method: {}", spec.method);
    println!("  Expected status: {}", spec.expected_status);

    println!("\nTimeouts:");
    println!("  Socket: {}ms", spec.socket_timeout_ms);
    println!("  Connection: {}ms", spec.connection_timeout_ms);

    match &spec.condition {
        ContentCondition::None => {}
        ContentCondition::Contains(text) => {
            println!("\nCondition:");
            println!("  Body must contain: {}", text);
        }
        ContentCondition::DoesntContain(text) => {
            println!("\nCondition:");
            println!("  Body must not contain: {}", text);
        }
    }

    println!("\nBroken links:");
    println!("  Scan: {}", spec.check_broken_links);
    println!("  Probe outbound: {}", spec.probes_outbound_links());

    if !spec.do_not_follow.trim().is_empty() {
        println!("\nDo-not-follow patterns:");
        for pattern in spec.do_not_follow.lines().filter(|l| !l.trim().is_empty()) {
            println!("  - {}", pattern.trim());
        }
    }

    if !spec.excluded_urls.trim().is_empty() {
        println!("\nExcluded URL patterns:");
        for pattern in spec.excluded_urls.lines().filter(|l| !l.trim().is_empty()) {
            println!("  - {}", pattern.trim());
        }
    }

    if let Some(proxy) = &spec.proxy {
        println!("\nProxy:");
        println!("  Host: {}", proxy.host);
        println!("  Port: {}", proxy.port);
        println!("  Authenticated: {}", proxy.username.is_some());
    }

    if spec.credentials.is_some() {
        println!("\nCredentials: set");
    }

    println!("\n✓ Definition is valid");
    println!("✓ Would run a {} check against {}", spec.kind, spec.url);
}
