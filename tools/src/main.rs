mod stats;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use huoguo_core::{Corpus, SuggestionEngine};
use tracing_subscriber::EnvFilter;

use stats::CorpusStats;

/// Validate a JSON word list and write the bincode snapshot the search box
/// loads at startup.
#[derive(Parser)]
#[command(name = "huoguo-convert", version)]
struct Args {
    /// Corpus in search_data.json format
    #[arg(long)]
    input: PathBuf,

    #[arg(long, default_value = "search_data.bincode")]
    output: PathBuf,

    /// Print corpus statistics as JSON instead of only a summary line
    #[arg(long)]
    stats: bool,

    /// Validate and report without writing the snapshot
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let corpus = Corpus::load_json(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    // Building the index once catches anything the engine would reject.
    let started = Instant::now();
    let engine = SuggestionEngine::new(corpus);
    tracing::info!(elapsed = ?started.elapsed(), "index check passed");

    if args.stats {
        let stats = CorpusStats::collect(engine.corpus());
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }

    if !args.dry_run {
        engine
            .corpus()
            .save_bincode(&args.output)
            .with_context(|| format!("writing {}", args.output.display()))?;
        let reloaded = Corpus::load_bincode(&args.output)
            .with_context(|| format!("re-reading {}", args.output.display()))?;
        anyhow::ensure!(
            reloaded.entries() == engine.corpus().entries(),
            "snapshot {} does not match the input",
            args.output.display()
        );
        println!("Wrote {} entries to {}", reloaded.len(), args.output.display());
    } else {
        println!("{} entries OK", engine.len());
    }
    Ok(())
}
