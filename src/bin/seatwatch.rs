// ABOUTME: Server binary wiring the dialog engine and availability poller together
// ABOUTME: Loads environment configuration, starts logging, and runs both loops until shutdown
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Seatwatch Binary
//!
//! Starts the availability poller as a background task and drives the update
//! loop feeding the dialog engine until ctrl-c.

use anyhow::Result;
use clap::Parser;
use seatwatch::{
    channel::telegram::TelegramChannel,
    config::ServerConfig,
    dialog::DialogEngine,
    logging,
    poller::{Poller, PollerConfig},
    providers::alibaba::AlibabaClient,
    store::WatchStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "seatwatch")]
#[command(about = "Seat availability watcher for domestic train and flight bookings")]
struct Args {
    /// Override the trip-watch store path
    #[arg(long)]
    store_path: Option<PathBuf>,

    /// Override the polling interval in seconds
    #[arg(long)]
    poll_interval: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may be set directly
    let _ = dotenvy::dotenv();

    logging::init_from_env()?;

    let args = Args::parse();
    let mut config = ServerConfig::from_env()?;
    if let Some(store_path) = args.store_path {
        config.store_path = store_path;
    }
    if let Some(poll_interval) = args.poll_interval {
        config.poll_interval = Duration::from_secs(poll_interval.max(1));
    }
    info!("{}", config.summary());

    let store = Arc::new(WatchStore::new(&config.store_path));
    let channel = Arc::new(TelegramChannel::new(
        config.telegram_api_base.clone(),
        config.bot_token.clone(),
        config.broadcast_channel.clone(),
    ));
    let provider = Arc::new(AlibabaClient::new(config.alibaba_api_base.clone()));

    let poller = Poller::new(
        Arc::clone(&store),
        provider,
        channel.clone(),
        PollerConfig {
            tick_interval: config.poll_interval,
            check_pause: config.check_pause,
        },
    );
    tokio::spawn(poller.run());

    let mut dialog = DialogEngine::new(store, channel.clone());
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown requested");
                break;
            }
            events = channel.next_events() => match events {
                Ok(events) => {
                    for event in events {
                        dialog.handle(event).await;
                    }
                }
                Err(err) => {
                    warn!("update polling failed, backing off: {err}");
                    tokio::time::sleep(Duration::from_secs(5)).await;
                }
            },
        }
    }

    Ok(())
}
