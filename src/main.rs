mod client;
mod config;
mod engine;
mod models;
mod normalizer;
mod reconcile;
mod storage;
mod types;

use std::io::{stderr, stdout, BufWriter};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::client::HttpActivityClient;
use crate::config::{Cli, Command, ExportArgs, PageArgs};
use crate::engine::{write_csv, ActivityAggregator, ActivityExporter, PageOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    let client = Arc::new(HttpActivityClient::new(&cli.api_url, Duration::from_secs(cli.timeout_secs))?);

    match cli.command {
        Command::Page(args) => print_page(client, &args).await,
        Command::Export(args) => export(client, &args).await
    }
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the CSV, so logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

async fn print_page(client: Arc<HttpActivityClient>, args: &PageArgs) -> Result<()> {
    let mut aggregator = args.buffered.iter()
        .fold(ActivityAggregator::new(client), |aggregator, feed| aggregator.with_buffered(*feed));

    if let Some(buffer_limit) = args.buffer_limit {
        aggregator = aggregator.with_buffer_limit(buffer_limit);
    }

    let timer = Instant::now();
    let outcome = aggregator.load_page(&args.user, &args.query()).await;
    let duration = timer.elapsed();

    let PageOutcome::Current(page) = outcome else {
        warn!("Page load for player [{}] was superseded, nothing to print", args.user);
        return Ok(());
    };

    let summary = &page.summary;
    info!(
        "Page {}/{} in {duration:?}: {} records in total, wagered {}, won {}, net {}",
        page.page, page.pages, summary.total_count, summary.total_wagered, summary.total_won, summary.net_result
    );

    for feed in &page.failed_feeds {
        warn!("Feed [{feed}] could not be loaded and is missing from this page");
    }

    write_csv(BufWriter::new(stdout().lock()), &page.transactions)?;

    Ok(())
}

async fn export(client: Arc<HttpActivityClient>, args: &ExportArgs) -> Result<()> {
    let exporter = ActivityExporter::new(client).with_config(args.export_config());

    let timer = Instant::now();
    let report = exporter.export_to_dir(&args.user, &args.output).await?;
    let duration = timer.elapsed();

    info!("Exported {} records in {} batches in: {duration:?}", report.rows, report.batches);

    if !report.complete {
        warn!("Export for player [{}] is partial", args.user);
    }

    println!("{}", report.path.display());

    Ok(())
}
