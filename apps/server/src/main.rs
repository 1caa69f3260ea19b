//! Pair Ratio Bot
//!
//! Polls two DEX pair prices, reports their ratio over Telegram whenever
//! either price moves, and alerts when the ratio exceeds a threshold.

mod config;
mod monitor;

use clap::Parser;
use config::AppConfig;
use monitor::RatioMonitor;
use ratio_alerts::{AlertSink, LogSink, PriceStore, TelegramConfig, TelegramNotifier};
use ratio_feeds::DexScreenerClient;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Pair Ratio Bot CLI
#[derive(Parser, Debug)]
#[command(name = "ratio-bot")]
#[command(about = "DEX pair price ratio notifier", long_about = None)]
struct Args {
    /// Configuration file path (optional; defaults apply if missing)
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long)]
    log_level: Option<String>,

    /// Seconds between polls
    #[arg(short, long)]
    interval: Option<u64>,

    /// Ratio above which an alert is sent
    #[arg(short, long)]
    threshold: Option<Decimal>,

    /// File holding the last notified prices
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    /// Run a single cycle and exit
    #[arg(long, default_value_t = false)]
    once: bool,

    /// Log notifications instead of sending them
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

impl Args {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(interval) = self.interval {
            config.poll_interval_secs = interval;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(path) = &self.data_file {
            config.data_file = path.clone();
        }
    }
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn init_logging(level: &str) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(level))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

fn build_sink(config: &AppConfig, dry_run: bool) -> Arc<dyn AlertSink> {
    if dry_run {
        info!("  Notifications: dry run (logged only)");
        return Arc::new(LogSink);
    }

    let Some(telegram) = TelegramConfig::from_env() else {
        warn!(
            "  Notifications: disabled ({} or {} not set), logging only",
            TelegramConfig::TOKEN_VAR,
            TelegramConfig::CHAT_ID_VAR
        );
        return Arc::new(LogSink);
    };

    match TelegramNotifier::with_api_url(
        telegram,
        config.telegram_api_url.clone(),
        config.request_timeout(),
    ) {
        Ok(notifier) => {
            let prefix: String = notifier.chat_id().chars().take(6).collect();
            info!("  Notifications: Telegram (chat_id: {}...)", prefix);
            Arc::new(notifier)
        }
        Err(e) => {
            error!(error = %e, "Failed to create Telegram client, logging only");
            Arc::new(LogSink)
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let mut config = match AppConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    args.apply(&mut config);

    init_logging(&config.log_level);

    if let Err(e) = config.validate() {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    info!("🚀 Pair Ratio Bot starting...");
    info!(
        "  {}: {} {}",
        config.first.label, config.first.chain, config.first.address
    );
    info!(
        "  {}: {} {}",
        config.second.label, config.second.chain, config.second.address
    );
    info!("  Threshold: {}", config.threshold);
    info!("  Interval: {}s", config.poll_interval_secs);
    info!("  Data file: {}", config.data_file.display());

    let store = PriceStore::new(config.data_file.clone());
    if let Err(e) = store.initialize() {
        error!("Failed to initialize price file: {}", e);
        return ExitCode::FAILURE;
    }

    let source = match DexScreenerClient::with_base_url(
        config.dexscreener_url.clone(),
        config.request_timeout(),
    ) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to create price client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let sink = build_sink(&config, args.dry_run);

    let monitor = RatioMonitor::new(
        config.first.clone(),
        config.second.clone(),
        config.threshold,
        config.poll_interval(),
        source,
        sink,
        store,
    );

    if args.once {
        let outcome = monitor.run_cycle().await;
        info!(?outcome, "Single cycle complete");
        return ExitCode::SUCCESS;
    }

    info!("Press Ctrl+C to stop...");
    monitor
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
            warn!("Shutdown signal received");
        })
        .await;

    info!("👋 Pair Ratio Bot stopped");
    ExitCode::SUCCESS
}
