use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use huoguo::{pinyinize, Mode, SearchBox, SearchBoxConfig, SuggestionEngine};

/// Time between replayed keystrokes; well inside the debounce window.
const KEYSTROKE_GAP: Duration = Duration::from_millis(30);

#[derive(Parser, Debug)]
#[command(name = "huoguo", version, about = "Search-as-you-type Chinese dictionary lookup")]
struct Args {
    /// Corpus file (.json or .bincode)
    #[arg(long, default_value = "data/search_data.json")]
    corpus: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debounce quiet period in milliseconds
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Character set for word pages
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Maximum number of suggestions
    #[arg(long)]
    max_results: Option<usize>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<SearchBoxConfig> {
    let mut config = match &args.config {
        Some(path) => SearchBoxConfig::load_toml(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SearchBoxConfig::default(),
    };
    if let Some(ms) = args.debounce_ms {
        config.debounce_ms = ms;
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(n) = args.max_results {
        config.base_mut().max_results = n;
    }
    Ok(config)
}

fn render(sb: &SearchBox) {
    if !sb.is_dropdown_visible() {
        println!("  → (no suggestions)");
        return;
    }
    for (i, s) in sb.results().iter().enumerate() {
        let Some(entry) = sb.engine().entry(s.id) else {
            continue;
        };
        println!(
            "  {}. {}  {}  {}  ({:.2}, {:?})",
            i + 1,
            s.text,
            pinyinize(&entry.toneless_pinyin),
            entry.short_definition,
            s.score.as_f32(),
            s.field
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    let engine = SuggestionEngine::load(&args.corpus, config.base().clone())
        .with_context(|| format!("loading corpus {}", args.corpus.display()))?;
    let mut sb = SearchBox::new(Arc::new(engine), &config);

    println!("huoguo - {} words loaded", sb.engine().len());
    println!("Type pinyin, characters or English and press Enter.");
    println!("A number opens that suggestion; :mode [simplified|traditional] switches script,");
    println!(":clear-cache drops remembered results.");
    println!();

    let mut clock = Instant::now();
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let input = line.trim();

        if let Some(rest) = input.strip_prefix(":mode") {
            let rest = rest.trim();
            let mode = if rest.is_empty() {
                Ok(sb.mode().other())
            } else {
                rest.parse::<Mode>()
            };
            match mode {
                Ok(mode) => {
                    sb.set_mode(mode);
                    println!("  mode: {mode}");
                }
                Err(e) => println!("  {e}"),
            }
            continue;
        }

        if input == ":clear-cache" {
            sb.clear_cache();
            println!("  cache cleared");
            continue;
        }

        if let Ok(n) = input.parse::<usize>() {
            if sb.is_dropdown_visible() {
                match n.checked_sub(1).and_then(|i| sb.choose(i)) {
                    Some(route) => {
                        println!("  → {route}");
                        if let Some(entry) = sb.engine().lookup(&route.headword) {
                            println!(
                                "    {} [{}] {}",
                                entry.simplified,
                                pinyinize(&entry.toneless_pinyin),
                                entry.short_definition
                            );
                        }
                    }
                    None => println!("  → no suggestion {n}"),
                }
                continue;
            }
        }

        // Replay the line as keystrokes, then let the quiet period pass.
        sb.clear();
        for ch in input.chars() {
            sb.type_char(ch, clock);
            clock += KEYSTROKE_GAP;
        }
        if let Some(deadline) = sb.next_deadline() {
            clock = clock.max(deadline);
            sb.tick(clock);
        }

        if input.is_empty() {
            continue;
        }
        render(&sb);
        println!("  [{} searches, {} cached]", sb.searches_run(), sb.cache_hits());
        println!();
        io::stdout().flush().ok();
    }

    Ok(())
}
