use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::engine::ExportConfig;
use crate::models::{ActivityFeed, ActivityQuery, DEFAULT_PAGE_SIZE};

/// Unified player activity viewer and exporter.
#[derive(Parser, Debug)]
#[command(name = "player-activity", version, about = "Merge, reconcile and export a player's activity feeds")]
pub struct Cli {
    /// Base URL of the platform API
    #[arg(long, global = true, env = "PLAYER_ACTIVITY_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// One of error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "error")]
    pub log_level: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print one page of the unified activity view as CSV
    Page(PageArgs),
    /// Write the player's full wager history to a CSV file
    Export(ExportArgs)
}

#[derive(Args, Debug)]
pub struct PageArgs {
    #[arg(short, long)]
    pub user: String,

    #[arg(long, default_value = "")]
    pub status: String,

    #[arg(long = "type", default_value = "")]
    pub transaction_type: String,

    #[arg(long, default_value = "")]
    pub search: String,

    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Feeds loaded in one request and paged locally (repeatable)
    #[arg(long, value_parser = parse_feed)]
    pub buffered: Vec<ActivityFeed>,

    /// Records fetched for each buffered feed
    #[arg(long)]
    pub buffer_limit: Option<u32>
}

impl PageArgs {
    pub fn query(&self) -> ActivityQuery {
        ActivityQuery::default()
            .with_status(self.status.as_str())
            .with_transaction_type(self.transaction_type.as_str())
            .with_search(self.search.as_str())
            .with_page(self.page)
            .with_page_size(self.page_size)
    }
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[arg(short, long)]
    pub user: String,

    /// Directory the export file is written into
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    #[arg(long)]
    pub batch_size: Option<u32>,

    /// Stop after this many batches even if the feed keeps returning records
    #[arg(long)]
    pub max_batches: Option<u32>
}

impl ExportArgs {
    pub fn export_config(&self) -> ExportConfig {
        let defaults = ExportConfig::default();

        ExportConfig {
            batch_size: self.batch_size.unwrap_or(defaults.batch_size),
            max_batches: self.max_batches.unwrap_or(defaults.max_batches)
        }
    }
}

fn parse_feed(value: &str) -> Result<ActivityFeed, String> {
    ActivityFeed::ALL.into_iter()
        .find(|feed| feed.as_str().eq_ignore_ascii_case(value.trim()))
        .ok_or_else(|| {
            let known: Vec<&str> = ActivityFeed::ALL.iter().map(ActivityFeed::as_str).collect();
            format!("unknown feed '{value}', expected one of: {}", known.join(", "))
        })
}
