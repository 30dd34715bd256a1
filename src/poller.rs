// ABOUTME: Fixed-interval availability poller sweeping every persisted trip watch
// ABOUTME: Sequential throttled checks with notification broadcast on the first free seat
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Availability poller.
//!
//! Each tick loads the whole store and checks every watch against the
//! provider, strictly sequentially and in store order, with a fixed pause
//! between successive checks to throttle load on the upstream API. Nothing in
//! a tick is fatal: a store that fails to load counts as an empty batch, and
//! a failed check is logged before the sweep moves on. The next opportunity
//! for any watch is the following tick.

use crate::channel::Messenger;
use crate::constants::defaults;
use crate::models::{TicketNotification, TripWatch};
use crate::providers::SeatProvider;
use crate::store::WatchStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Scheduling policy for the availability poller
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Wall-clock interval between polling ticks
    pub tick_interval: Duration,
    /// Pause inserted between successive availability checks within a tick
    pub check_pause: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(defaults::POLL_INTERVAL_SECS),
            check_pause: Duration::from_secs(defaults::CHECK_PAUSE_SECS),
        }
    }
}

/// Fixed-interval availability poller
pub struct Poller {
    store: Arc<WatchStore>,
    provider: Arc<dyn SeatProvider>,
    messenger: Arc<dyn Messenger>,
    config: PollerConfig,
}

impl Poller {
    /// Create a poller over the shared store, provider, and channel
    pub fn new(
        store: Arc<WatchStore>,
        provider: Arc<dyn SeatProvider>,
        messenger: Arc<dyn Messenger>,
        config: PollerConfig,
    ) -> Self {
        Self {
            store,
            provider,
            messenger,
            config,
        }
    }

    /// Run the polling loop forever on the configured interval
    pub async fn run(self) {
        info!(
            interval_secs = self.config.tick_interval.as_secs(),
            pause_secs = self.config.check_pause.as_secs(),
            "availability poller started"
        );

        let mut interval = tokio::time::interval(self.config.tick_interval);
        loop {
            interval.tick().await;
            self.tick().await;
        }
    }

    /// Execute one polling pass over the whole store
    pub async fn tick(&self) {
        let watches = match self.store.load().await {
            Ok(watches) => watches,
            Err(err) => {
                warn!("failed to load trip watches, treating tick as empty: {err}");
                Vec::new()
            }
        };

        info!(watches = watches.len(), "availability sweep started");
        for (index, watch) in watches.iter().enumerate() {
            if index > 0 && !self.config.check_pause.is_zero() {
                tokio::time::sleep(self.config.check_pause).await;
            }
            self.check_watch(watch).await;
        }
    }

    async fn check_watch(&self, watch: &TripWatch) {
        match self.provider.check(watch).await {
            Ok(Some(found)) => {
                info!(
                    watch.id = %watch.id,
                    seats = found.seats,
                    departure = %found.departure,
                    "seats available"
                );
                self.notify(watch, &found.departure).await;
            }
            Ok(None) => {
                info!(
                    watch.id = %watch.id,
                    "no {} seats from {} to {} on {}",
                    watch.kind,
                    watch.origin,
                    watch.destination,
                    watch.date
                );
            }
            // Provider-down is not the same thing as sold-out
            Err(err) => {
                warn!(watch.id = %watch.id, "availability check failed: {err}");
            }
        }
    }

    async fn notify(&self, watch: &TripWatch, departure: &str) {
        let link = match self.provider.booking_link(watch) {
            Ok(link) => link,
            Err(err) => {
                error!(watch.id = %watch.id, "failed to build booking link: {err}");
                return;
            }
        };

        let notification = TicketNotification {
            message: format!(
                "{} ticket found from {} to {}, departing {departure}",
                watch.kind.label(),
                watch.origin,
                watch.destination
            ),
            link,
            watch_id: watch.id.clone(),
        };

        if let Err(err) = self.messenger.broadcast(&notification).await {
            error!(watch.id = %watch.id, "failed to broadcast notification: {err}");
        }
    }
}
