//! Moodline entry point
//!
//! Run with: cargo run -- serve
//!
//! # Commands
//!
//! - `serve` (default) - start the dashboard API server
//! - `log <MOOD> [--note ...]` - append one mood entry from the terminal
//! - `summary [--start --end]` - print the metrics for a date range
//! - `init-config` - write a commented default config file
//!
//! # Configuration
//!
//! `--config <path>`, else `$XDG_CONFIG_HOME/moodline/config.toml`, else
//! `./config.toml`, else built-in defaults; `MOODLINE_*` environment
//! variables override (see `config.toml` template). `--memory` swaps the
//! sheet store for a volatile in-process one.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moodline::api::{self, AppState};
use moodline::config::{generate_default_config, Config, LoggingConfig};
use moodline::pipeline::{filter_range, summarize, DateRange, MoodLog};
use moodline::store::{EntryStore, MemoryStore, SheetConfig, SheetStore};

#[derive(Parser)]
#[command(name = "moodline", version, about = "Mood-of-the-queue dashboard service")]
struct Cli {
    /// Path to a config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the volatile in-process store instead of the hosted sheet
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the dashboard API server (default)
    Serve,
    /// Append one mood entry
    Log {
        /// Mood label, e.g. "Happy"
        mood: String,
        /// Optional free-text note
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Print summary metrics for a date range
    Summary {
        /// Start date (inclusive), defaults to the earliest entry
        #[arg(long)]
        start: Option<NaiveDate>,
        /// End date (inclusive), defaults to the latest entry
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Write a commented default config file
    InitConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut cli = Cli::parse();

    // init-config runs before config loading: its target file does not exist yet
    if matches!(cli.command, Some(Command::InitConfig)) {
        return init_config(&cli);
    }

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_tracing(&config.logging);

    match cli.command.take().unwrap_or(Command::Serve) {
        Command::Serve => serve(&cli, &config).await,
        Command::Log { mood, note } => log_mood(&cli, &config, &mood, &note).await,
        Command::Summary { start, end } => print_summary(&cli, &config, start, end).await,
        Command::InitConfig => unreachable!("handled above"),
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "moodline={},tower_http=debug",
            logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Build the store handle once from configuration; everything downstream
/// receives it explicitly.
fn build_store(cli: &Cli, config: &Config) -> anyhow::Result<Arc<dyn EntryStore>> {
    if cli.memory || config.store.backend == "memory" {
        tracing::info!("Using in-process store (entries are volatile)");
        return Ok(Arc::new(MemoryStore::new()));
    }

    if config.store.spreadsheet_id.is_empty() {
        tracing::warn!("No spreadsheet_id configured; store requests will fail until one is set");
    }

    let store = SheetStore::new(SheetConfig {
        base_url: config.store.base_url.clone(),
        spreadsheet_id: config.store.spreadsheet_id.clone(),
        sheet_name: config.store.sheet_name.clone(),
        api_token: config.store.api_token.clone(),
        request_timeout_ms: config.store.request_timeout_ms,
    })?;

    Ok(Arc::new(store))
}

async fn serve(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    tracing::info!("Starting Moodline v{}", env!("CARGO_PKG_VERSION"));

    let store = build_store(cli, config)?;
    let api_config = api::ApiConfig {
        host: config.api.host.clone(),
        port: config.api.port,
        ..Default::default()
    };

    let state = AppState::new(store, api_config.clone());
    api::serve(state, &api_config).await?;

    tracing::info!("Moodline stopped");
    Ok(())
}

async fn log_mood(cli: &Cli, config: &Config, mood: &str, note: &str) -> anyhow::Result<()> {
    anyhow::ensure!(!mood.trim().is_empty(), "mood cannot be empty");

    let log = MoodLog::new(build_store(cli, config)?);
    let entry = log.log(mood, note).await.context("failed to log mood")?;

    println!("Logged {} at {}", entry.mood, entry.timestamp);
    Ok(())
}

async fn print_summary(
    cli: &Cli,
    config: &Config,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let log = MoodLog::new(build_store(cli, config)?);

    let loaded = log.load().await;
    if let Some(e) = &loaded.error {
        eprintln!("Warning: {e}; showing an empty entry set");
    }

    let span = DateRange::spanning(&loaded.entries);
    let today = chrono::Local::now().date_naive();
    let start = start.or(span.map(|r| r.start())).unwrap_or(today);
    let end = end.or(span.map(|r| r.end())).unwrap_or(today);
    let range = DateRange::new(start, end)?;

    let windowed = filter_range(&loaded.entries, &range);
    if windowed.is_empty() {
        println!("No entries in that date range.");
        return Ok(());
    }

    let summary = summarize(&windowed);
    println!("Mood Summary: {} → {}", range.start(), range.end());
    println!("  Total Logs:       {}", summary.total_count);
    println!("  Most Common Mood: {}", summary.most_common_mood);
    println!("  Days Logged:      {}", summary.distinct_days);
    println!("Mood Counts:");
    for (mood, count) in &summary.mood_counts {
        println!("  {mood:<12} {count}");
    }
    println!("Daily Trend:");
    for daily in &summary.daily_counts {
        println!("  {}  {}", daily.date, daily.count);
    }

    Ok(())
}

fn init_config(cli: &Cli) -> anyhow::Result<()> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("./config.toml"));

    anyhow::ensure!(!path.exists(), "config file {path:?} already exists");

    std::fs::write(&path, generate_default_config())
        .with_context(|| format!("failed to write {path:?}"))?;

    println!("Wrote default config to {}", path.display());
    Ok(())
}
