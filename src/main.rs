// src/main.rs
use cable_prices::dashboard::{Dashboard, StatsOutcome, TextReport};
use cable_prices::utils::{self, AppError};
use cable_prices::{PriceCatalog, Selection};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Command Line Interface for the cable price dashboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON document whose "text" field holds the price listing
    #[arg(short, long, env = "CABLE_PRICES_INPUT", default_value = "onlycable.json")]
    input: PathBuf,

    /// Years to show, comma separated (default: all years)
    #[arg(short, long, value_delimiter = ',')]
    years: Vec<u32>,

    /// Cable sizes to show, comma separated, e.g. 2.5SQ,4SQ (default: first five sizes)
    #[arg(short, long, value_delimiter = ',')]
    sizes: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Debug mode - debug-level logs plus a line-by-line trace of the listing scan on stderr
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.debug);
    tracing::info!("Starting with args: {:?}", args);

    // 3. Load the record set once
    let catalog = PriceCatalog::new(&args.input);
    let records = catalog.records()?;
    if records.is_empty() {
        tracing::warn!("No price records found in {}", catalog.path().display());
    }

    if args.debug {
        let notes = catalog.scan_trace()?;
        eprint!("{}", utils::scan_debug::render_scan_trace(&notes));
    }

    // 4. Resolve the selection, falling back to defaults for anything not given
    let defaults = Selection::default_for(&records);
    let selection = Selection {
        years: if args.years.is_empty() {
            defaults.years
        } else {
            args.years.iter().copied().collect()
        },
        sizes: if args.sizes.is_empty() {
            defaults.sizes
        } else {
            args.sizes.iter().cloned().collect()
        },
    };

    let (unknown_years, unknown_sizes) = selection.unknown_in(&records);
    if !unknown_years.is_empty() {
        tracing::warn!("Selected years not in the listing: {:?}", unknown_years);
    }
    if !unknown_sizes.is_empty() {
        tracing::warn!("Selected sizes not in the listing: {:?}", unknown_sizes);
    }

    // 5. Build and print the dashboard
    let dashboard = Dashboard::build(&records, &selection);
    let failed = dashboard
        .summaries
        .iter()
        .filter(|s| matches!(s.outcome, StatsOutcome::Failed { .. }))
        .count();
    if failed > 0 {
        tracing::warn!("Change rates could not be computed for {} sizes", failed);
    }

    match args.format {
        OutputFormat::Text => print!("{}", TextReport(&dashboard)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dashboard)?),
    }

    tracing::info!(
        "Finished. {} of {} records shown",
        dashboard.records.len(),
        records.len()
    );
    Ok(())
}
