// ABOUTME: Application constants and default values grouped by concern
// ABOUTME: Names every environment variable, default, and timeout in one place
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// Environment variable names understood by [`crate::config::ServerConfig`]
pub mod env_vars {
    /// Bot token for the messaging channel
    pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
    /// Broadcast destination for ticket notifications (e.g. `@mychannel`)
    pub const CHANNEL_NAME: &str = "CHANNEL_NAME";
    /// Path of the JSON trip-watch store file
    pub const WATCH_STORE_PATH: &str = "WATCH_STORE_PATH";
    /// Seconds between polling ticks
    pub const POLL_INTERVAL_SECS: &str = "POLL_INTERVAL_SECS";
    /// Seconds paused between successive availability checks within a tick
    pub const CHECK_PAUSE_SECS: &str = "CHECK_PAUSE_SECS";
    /// Base URL of the booking provider API
    pub const ALIBABA_API_BASE: &str = "ALIBABA_API_BASE";
    /// Base URL of the Telegram Bot API
    pub const TELEGRAM_API_BASE: &str = "TELEGRAM_API_BASE";
}

/// Default values applied when the environment leaves a knob unset
pub mod defaults {
    /// Trip-watch store file next to the working directory
    pub const WATCH_STORE_PATH: &str = "data.json";
    /// Poll every five minutes
    pub const POLL_INTERVAL_SECS: u64 = 300;
    /// Thirty-second pause between checks to respect upstream rate limits
    pub const CHECK_PAUSE_SECS: u64 = 30;
    /// Production booking provider API
    pub const ALIBABA_API_BASE: &str = "https://ws.alibaba.ir";
    /// Production Telegram Bot API
    pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
    /// Public booking site used for notification deep links
    pub const BOOKING_SITE_BASE: &str = "https://www.alibaba.ir";
}

/// HTTP client timeouts
pub mod http {
    /// Request timeout for regular API calls, in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Connect timeout, in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Server-side long-poll window for update fetching, in seconds
    pub const LONG_POLL_TIMEOUT_SECS: u64 = 60;
    /// Client-side timeout for long-poll requests; must exceed the
    /// server-side window or every idle poll errors out
    pub const LONG_POLL_CLIENT_TIMEOUT_SECS: u64 = 90;
}

/// Dialog menu layout
pub mod dialog {
    /// How many upcoming days the date menu offers
    pub const DATE_MENU_DAYS: u64 = 30;
    /// Location menu columns per keyboard row
    pub const MENU_COLUMNS: usize = 5;
}
