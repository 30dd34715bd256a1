// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Resolves credentials, store location, and scheduling knobs from the process environment
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Environment-only runtime configuration.
//!
//! Everything the process needs is supplied through environment variables
//! (optionally loaded from a `.env` file by the binary before this module
//! runs). The only required settings are the bot credentials and the
//! broadcast destination; every other knob has a production default.

use crate::constants::{defaults, env_vars};
use crate::errors::{AppError, AppResult};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration resolved from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bot token for the messaging channel
    pub bot_token: String,
    /// Broadcast destination for ticket notifications (e.g. `@mychannel`)
    pub broadcast_channel: String,
    /// Path of the JSON trip-watch store file
    pub store_path: PathBuf,
    /// Wall-clock interval between polling ticks
    pub poll_interval: Duration,
    /// Pause between successive availability checks within a tick
    pub check_pause: Duration,
    /// Base URL of the booking provider API
    pub alibaba_api_base: String,
    /// Base URL of the Telegram Bot API
    pub telegram_api_base: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `TELEGRAM_BOT_TOKEN` or
    /// `CHANNEL_NAME` is unset; all other settings fall back to defaults.
    pub fn from_env() -> AppResult<Self> {
        let bot_token = env::var(env_vars::TELEGRAM_BOT_TOKEN)
            .map_err(|_| AppError::config("TELEGRAM_BOT_TOKEN is not set"))?;
        let broadcast_channel = env::var(env_vars::CHANNEL_NAME)
            .map_err(|_| AppError::config("CHANNEL_NAME is not set"))?;

        Ok(Self {
            bot_token,
            broadcast_channel,
            store_path: PathBuf::from(env_or(
                env_vars::WATCH_STORE_PATH,
                defaults::WATCH_STORE_PATH,
            )),
            // A zero interval would make the poller spin; clamp to one second
            poll_interval: Duration::from_secs(
                env_u64(env_vars::POLL_INTERVAL_SECS, defaults::POLL_INTERVAL_SECS).max(1),
            ),
            check_pause: Duration::from_secs(env_u64(
                env_vars::CHECK_PAUSE_SECS,
                defaults::CHECK_PAUSE_SECS,
            )),
            alibaba_api_base: env_or(env_vars::ALIBABA_API_BASE, defaults::ALIBABA_API_BASE),
            telegram_api_base: env_or(env_vars::TELEGRAM_API_BASE, defaults::TELEGRAM_API_BASE),
        })
    }

    /// One-line configuration summary for startup logs; never includes the
    /// bot token
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "store={} poll_interval={}s check_pause={}s provider={} broadcast={}",
            self.store_path.display(),
            self.poll_interval.as_secs(),
            self.check_pause.as_secs(),
            self.alibaba_api_base,
            self.broadcast_channel
        )
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
