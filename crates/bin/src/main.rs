//! Dalal CLI binary.
//!
//! Provides the command-line interface for the Indian equity screener.

mod logging;
mod render;

use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use dalal::universe::{IndianUniverse, ReferenceData};
use dalal::{
    AggregatorConfig, MarketBoard, QuoteAggregator, ScreenerConfig, Universe, spawn_auto_refresh,
    spawn_price_simulation,
};
use dalal_data::{AlphaVantageConfig, AlphaVantageSource, YahooChartSource};
use dalal_screen::{ExportFormat, Exporter, ScreeningCriteria, screen};
use indicatif::{ProgressBar, ProgressStyle};
use logging::{LogConfig, init_logging};
use rand::SeedableRng;
use rand::rngs::StdRng;
use render::{PriceUpdate, Report, UniverseTable};
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "dalal")]
#[command(about = "Dalal: Indian equity screener", long_about = None)]
#[command(version)]
struct Cli {
    /// Log filter directive; RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch quotes once and print a screening report
    Screen {
        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Keep quotes fresh and re-screen on every refresh until Ctrl-C
    Watch {
        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        source: SourceArgs,

        /// Seconds between full refreshes
        #[arg(long, default_value_t = dalal::config::DEFAULT_REFRESH_SECS)]
        refresh_secs: u64,

        /// Seconds between simulated price moves
        #[arg(long, default_value_t = dalal::config::DEFAULT_TICK_SECS)]
        tick_secs: u64,
    },

    /// List the universe with resolved names and sectors
    Universe,
}

/// Screening filters. Values are parsed leniently: blank or unknown
/// labels mean "all" and unparsable numbers fall back to their defaults.
#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Exchange: NSE, BSE or all
    #[arg(long, default_value = "all")]
    exchange: String,

    /// Sector label, or all
    #[arg(long, default_value = "all")]
    sector: String,

    /// Cap tier: large, mid, small or all
    #[arg(long, default_value = "all")]
    cap: String,

    /// Minimum P/E
    #[arg(long, default_value = "")]
    min_pe: String,

    /// Maximum P/E
    #[arg(long, default_value = "")]
    max_pe: String,

    /// Minimum ROE (%)
    #[arg(long, default_value = "")]
    min_roe: String,
}

impl FilterArgs {
    fn criteria(&self) -> ScreeningCriteria {
        ScreeningCriteria::lenient(
            &self.exchange,
            &self.sector,
            &self.cap,
            &self.min_pe,
            &self.max_pe,
            &self.min_roe,
        )
    }
}

#[derive(Args, Debug, Clone)]
struct SourceArgs {
    /// Skip live sources and use the fallback dataset
    #[arg(long)]
    offline: bool,

    /// Seed for synthesized metrics and price jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum concurrent requests per source
    #[arg(long)]
    concurrency: Option<usize>,

    /// Alpha Vantage API key for the secondary source
    #[arg(long, env = "ALPHA_VANTAGE_API_KEY", hide_env_values = true)]
    alpha_vantage_key: Option<String>,
}

impl SourceArgs {
    fn config(&self) -> ScreenerConfig {
        ScreenerConfig {
            offline: self.offline,
            alpha_vantage_key: self.alpha_vantage_key.clone(),
            aggregator: AggregatorConfig {
                concurrency: self.concurrency,
                seed: self.seed,
            },
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&LogConfig::new(&cli.log_level, cli.log_json))?;

    match cli.command {
        Commands::Screen {
            filters,
            source,
            format,
        } => {
            run_screen(&filters, &source.config(), format).await?;
        }
        Commands::Watch {
            filters,
            source,
            refresh_secs,
            tick_secs,
        } => {
            let config = ScreenerConfig {
                refresh_secs,
                tick_secs,
                ..source.config()
            };
            run_watch(&filters, config).await?;
        }
        Commands::Universe => list_universe(),
    }

    Ok(())
}

fn build_aggregator(config: &ScreenerConfig) -> dalal::Result<QuoteAggregator> {
    config.validate()?;

    let mut builder = QuoteAggregator::builder()
        .reference(ReferenceData::indian_equities())
        .config(config.aggregator.clone());

    if !config.offline {
        builder = builder
            .source(YahooChartSource::new()?)
            .source(AlphaVantageSource::new(AlphaVantageConfig {
                api_key: config.alpha_vantage_key.clone(),
                ..Default::default()
            })?);
    }

    builder.build()
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    pb
}

async fn run_screen(
    filters: &FilterArgs,
    config: &ScreenerConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let aggregator = build_aggregator(config)?;
    let universe = IndianUniverse::new();

    let pb = spinner("Fetching market data...");
    let acquisition = aggregator.acquire(universe.tickers()).await;
    pb.finish_and_clear();

    let result = screen(&acquisition.quotes, &filters.criteria());

    match format {
        OutputFormat::Text => {
            println!(
                "{}",
                Report {
                    result: &result,
                    status: acquisition.status(),
                    origin: Some(acquisition.origin),
                }
            );
        }
        OutputFormat::Json => println!("{}", result.export_to_string(ExportFormat::PrettyJson)?),
        OutputFormat::Csv => print!("{}", result.export_to_string(ExportFormat::Csv)?),
    }

    Ok(())
}

async fn print_board(board: &MarketBoard, criteria: &ScreeningCriteria) {
    let snapshot = board.snapshot().await;
    let result = screen(&snapshot, criteria);
    println!(
        "{}",
        Report {
            result: &result,
            status: board.status().await,
            origin: board.origin().await,
        }
    );
    if let Some(at) = board.last_refresh().await {
        println!("Last refresh: {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
}

async fn print_ticks(board: &MarketBoard, criteria: &ScreeningCriteria) {
    let snapshot = board.snapshot().await;
    let result = screen(&snapshot, criteria);
    if result.is_empty() {
        return;
    }
    println!(
        "{}",
        PriceUpdate {
            quotes: &result.matches,
            at: Utc::now(),
        }
    );
}

async fn run_watch(
    filters: &FilterArgs,
    config: ScreenerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let aggregator = Arc::new(build_aggregator(&config)?);
    let universe = Arc::new(IndianUniverse::new().symbols());
    let board = Arc::new(MarketBoard::new());
    let criteria = filters.criteria();

    let pb = spinner("Fetching market data...");
    board.refresh(&aggregator, universe.as_slice()).await;
    pb.finish_and_clear();

    let mut refreshed = board.subscribe();
    let mut ticked = board.subscribe_ticks();
    print_board(&board, &criteria).await;

    let rng = match config.aggregator.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_os_rng(),
    };
    let ticks = spawn_price_simulation(Arc::clone(&board), config.tick_interval(), rng);
    let refreshes = spawn_auto_refresh(
        Arc::clone(&board),
        Arc::clone(&aggregator),
        Arc::clone(&universe),
        config.refresh_interval(),
    );
    info!(
        refresh_secs = config.refresh_secs,
        tick_secs = config.tick_secs,
        "Watching market board"
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = refreshed.changed() => {
                if changed.is_err() {
                    break;
                }
                print_board(&board, &criteria).await;
            }
            changed = ticked.changed() => {
                if changed.is_err() {
                    break;
                }
                print_ticks(&board, &criteria).await;
            }
        }
    }

    ticks.abort();
    refreshes.abort();
    info!("Stopped watching");
    Ok(())
}

fn list_universe() {
    let universe = IndianUniverse::new();
    let reference = ReferenceData::indian_equities();
    println!(
        "{}",
        UniverseTable {
            universe: &universe,
            reference: &reference,
        }
    );
}
