//! Mission console server.
//!
//! Loads the persisted configuration, starts the mission clock, and serves
//! the dashboard API. Collaborator endpoints are optional: without them the
//! briefing degrades to its fallback sentence and the news ticker stays
//! empty, which is the designed behavior, not an error.

use anyhow::Context;
use clap::Parser;
use console::briefing::BriefingClient;
use console::news::NewsClient;
use console::server::{self, AppState};
use console::video::FeedRemote;
use mission::clock::MissionClock;
use mission::config::MissionConfig;
use shared::config_storage::ConfigStorage;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

const DEFAULT_BRIEFING_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

#[derive(Parser, Debug)]
#[command(author, version, about = "Mission control dashboard backend")]
struct Args {
    #[arg(long, default_value = "8080")]
    port: u16,

    #[arg(
        long,
        help = "Override the configuration directory (defaults to ~/.mission_console)"
    )]
    config_root: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_BRIEFING_ENDPOINT)]
    briefing_endpoint: String,

    #[arg(long, help = "API key for the briefing service")]
    briefing_api_key: Option<String>,

    #[arg(long, help = "News collaborator endpoint; omit to disable the ticker")]
    news_endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let storage = match &args.config_root {
        Some(root) => ConfigStorage::with_path(root.clone()),
        None => ConfigStorage::new().context("failed to locate configuration directory")?,
    };
    let config = MissionConfig::load(&storage);
    info!("launch epoch: {}", config.launch_epoch);
    info!(
        "{} video feeds configured, primary {}",
        config.feed_ids.len(),
        config.primary_feed()
    );

    let clock = MissionClock::spawn(&config);

    let mut briefing = BriefingClient::new(args.briefing_endpoint);
    if let Some(key) = args.briefing_api_key {
        briefing = briefing.with_api_key(key);
    }

    let news = match args.news_endpoint {
        Some(endpoint) => NewsClient::new(endpoint),
        None => NewsClient::disabled(),
    };

    let (feeds, mut feed_rx) = FeedRemote::channel();
    // Standalone server: no embedded player is attached, so feed commands
    // are logged and dropped. An embedding presentation layer would take
    // this receiver instead.
    tokio::spawn(async move {
        while let Some(command) = feed_rx.recv().await {
            debug!(
                "feed command for {}: {:?}",
                command.feed_id, command.command
            );
        }
    });

    let state = Arc::new(AppState {
        clock,
        config: Mutex::new(config),
        storage,
        briefing,
        news,
        feeds,
    });

    server::run(state, args.port).await
}
