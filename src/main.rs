use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use texsuggest::{Error, FileStore, OverrideManager, Strategy, SuggestConfig, Suggestion};
use texsuggest_core::trigger::trigger_query;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Fuzzy autocompletion for TeX/MathJax symbols
#[derive(Parser, Debug)]
#[command(name = "texsuggest")]
#[command(about = "Fuzzy autocompletion for TeX/MathJax symbols", long_about = None)]
struct Args {
    /// Path to the override document (defaults to the config's override_file)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Path to a JSON settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Ranking strategy
    #[arg(short, long, global = true, value_enum)]
    strategy: Option<StrategyArg>,

    /// Maximum number of suggestions; 0 prints none (defaults to max_suggestions)
    #[arg(short, long, global = true)]
    limit: Option<usize>,

    /// Log level
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank symbols against a partial command such as `\alp`
    Search { query: String },
    /// Suggest for the text before the cursor, applying the trigger settings
    Complete { text: String },
    /// Show the effective entry for a symbol
    Show { name: String },
    /// Override the snippet of a symbol and save the document
    SetSnippet { name: String, snippet: String },
    /// Remove the override of a symbol and save the document
    Unset { name: String },
    /// Write the starter override document
    Init,
    /// Validate the override document
    Check,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    /// Damerau-Levenshtein similarity
    Edit,
    /// Longest common subsequence
    Subsequence,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Edit => Strategy::EditDistance,
            StrategyArg::Subsequence => Strategy::Subsequence,
        }
    }
}

#[derive(Serialize)]
struct ScoredSuggestion {
    score: f64,
    #[serde(flatten)]
    suggestion: Suggestion,
}

fn load_config(args: &Args) -> anyhow::Result<SuggestConfig> {
    let mut config = match &args.config {
        Some(path) => SuggestConfig::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => SuggestConfig::default(),
    };

    if let Some(file) = &args.file {
        config.override_file = file.clone();
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy.into();
    }
    config.validate()?;
    Ok(config)
}

/// Result count for `search`/`complete`. Unlike `max_suggestions`, an
/// explicit limit may be 0.
fn effective_limit(args: &Args, config: &SuggestConfig) -> usize {
    args.limit.unwrap_or(config.max_suggestions)
}

fn print_suggestions(suggestions: &[ScoredSuggestion], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(suggestions)?);
        return Ok(());
    }

    for scored in suggestions {
        let suggestion = &scored.suggestion;
        let marker = if suggestion.overridden { "*" } else { " " };
        println!(
            "{:.3} {}{:<24} {}",
            scored.score,
            marker,
            suggestion.name,
            suggestion.description.first().unwrap_or_default()
        );
        if let Some(preview) = &suggestion.preview {
            println!("        e.g. {}", preview);
        }
    }
    Ok(())
}

fn search(
    manager: &OverrideManager<FileStore>,
    query: &str,
    limit: usize,
) -> anyhow::Result<Vec<ScoredSuggestion>> {
    manager
        .search(query, limit)
        .iter()
        .map(|result| {
            Ok(ScoredSuggestion {
                score: result.score,
                suggestion: result.suggestion(manager.config())?,
            })
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let log_level = if config.debug {
        log_level.max(Level::DEBUG)
    } else {
        log_level
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let limit = effective_limit(&args, &config);
    info!("texsuggest v{}", env!("CARGO_PKG_VERSION"));
    info!("Override document: {:?}", config.override_file);
    info!("Strategy: {}", config.strategy);

    let store = FileStore::new(&config.override_file);
    let manager = OverrideManager::new(store, config)?;

    if let Command::Init = args.command {
        let count = manager.init_document()?;
        println!(
            "Wrote {} with {} overrides",
            manager.store().path().display(),
            count
        );
        return Ok(());
    }

    match manager.try_reload() {
        Ok(count) => info!("Loaded {} overrides", count),
        Err(Error::DocumentNotFound(path)) => {
            if let Command::Check = args.command {
                bail!("No override document at {}", path);
            }
            warn!("No override document at {}, using builtin symbols only", path);
        }
        Err(e) => {
            // Never save over a table that failed to parse
            let writes = matches!(
                args.command,
                Command::SetSnippet { .. } | Command::Unset { .. }
            );
            if writes || matches!(args.command, Command::Check) {
                return Err(e.into());
            }
            warn!("Ignoring override document: {}", e);
        }
    }

    match &args.command {
        Command::Search { query } => {
            print_suggestions(&search(&manager, query, limit)?, args.json)?;
        }
        Command::Complete { text } => {
            let suggestions = match trigger_query(text, manager.config()) {
                Some(query) => search(&manager, query, limit)?,
                None => Vec::new(),
            };
            print_suggestions(&suggestions, args.json)?;
        }
        Command::Show { name } => {
            let Some(entry) = manager.lookup(name) else {
                bail!("Unknown symbol {}", name);
            };
            let entry = entry?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&entry)?);
            } else {
                println!("name:        {}", entry.name);
                println!("description: {}", entry.description.lines().join(" / "));
                println!("examples:    {}", entry.examples.lines().join(" / "));
                println!("see also:    {}", entry.see_also.join(", "));
                println!("snippet:     {}", entry.snippet);
            }
        }
        Command::SetSnippet { name, snippet } => {
            manager.set_snippet(name, snippet)?;
            println!("Set snippet for {}", name);
        }
        Command::Unset { name } => {
            if manager.remove_override(name)? {
                println!("Removed override for {}", name);
            } else {
                println!("No override for {}", name);
            }
        }
        Command::Check => {
            let registry = manager.registry();
            println!(
                "{}: {} overrides, {} symbols",
                manager.store().path().display(),
                registry.override_count(),
                registry.len()
            );
        }
        Command::Init => {}
    }

    Ok(())
}
