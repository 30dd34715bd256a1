// ABOUTME: Tests for the fixed-interval availability poller
// ABOUTME: Validates per-tick check ordering, failure isolation, and notification output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use async_trait::async_trait;
use seatwatch::channel::{ChatId, Keyboard, MessageRef, Messenger};
use seatwatch::errors::{AppError, AppResult};
use seatwatch::models::{FoundTrip, TicketNotification, TripKind, TripWatch};
use seatwatch::poller::{Poller, PollerConfig};
use seatwatch::providers::SeatProvider;
use seatwatch::store::WatchStore;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Provider fake replaying scripted outcomes and recording the call order
#[derive(Default)]
struct ScriptedProvider {
    calls: Mutex<Vec<String>>,
    available: HashMap<String, FoundTrip>,
    failing: HashSet<String>,
}

impl ScriptedProvider {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SeatProvider for ScriptedProvider {
    async fn check(&self, watch: &TripWatch) -> AppResult<Option<FoundTrip>> {
        self.calls.lock().unwrap().push(watch.id.clone());
        if self.failing.contains(&watch.id) {
            return Err(AppError::provider("availability endpoint unreachable"));
        }
        Ok(self.available.get(&watch.id).cloned())
    }

    fn booking_link(&self, watch: &TripWatch) -> AppResult<String> {
        Ok(format!("https://booking.example.test/{}", watch.id))
    }
}

/// Messenger fake recording broadcasts only
#[derive(Default)]
struct BroadcastRecorder {
    broadcasts: Mutex<Vec<TicketNotification>>,
}

impl BroadcastRecorder {
    fn broadcasts(&self) -> Vec<TicketNotification> {
        self.broadcasts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Messenger for BroadcastRecorder {
    async fn send_prompt(
        &self,
        chat: ChatId,
        _text: &str,
        _keyboard: &Keyboard,
    ) -> AppResult<MessageRef> {
        Ok(MessageRef {
            chat,
            message_id: 1,
        })
    }

    async fn edit_prompt(
        &self,
        _prompt: MessageRef,
        _text: &str,
        _keyboard: Option<&Keyboard>,
    ) -> AppResult<()> {
        Ok(())
    }

    async fn send_text(&self, _chat: ChatId, _text: &str) -> AppResult<()> {
        Ok(())
    }

    async fn broadcast(&self, notification: &TicketNotification) -> AppResult<()> {
        self.broadcasts.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

fn watch(id: &str, kind: TripKind) -> TripWatch {
    TripWatch {
        id: id.into(),
        origin: "THR".into(),
        destination: "MHD".into(),
        date: "2024-05-01".into(),
        kind,
    }
}

async fn seeded_store(dir: &tempfile::TempDir, watches: &[TripWatch]) -> Arc<WatchStore> {
    let store = Arc::new(WatchStore::new(dir.path().join("watches.json")));
    for entry in watches {
        store.append(entry.clone()).await.unwrap();
    }
    store
}

fn poller(
    store: Arc<WatchStore>,
    provider: Arc<ScriptedProvider>,
    messenger: Arc<BroadcastRecorder>,
) -> Poller {
    Poller::new(
        store,
        provider,
        messenger,
        PollerConfig {
            tick_interval: Duration::from_secs(300),
            // Zero pause keeps the sequential sweep instant under test
            check_pause: Duration::ZERO,
        },
    )
}

#[tokio::test]
async fn every_watch_is_checked_once_per_tick_in_store_order() {
    let dir = tempfile::tempdir().unwrap();
    let watches = [
        watch("w1", TripKind::Train),
        watch("w2", TripKind::Flight),
        watch("w3", TripKind::Train),
    ];
    let store = seeded_store(&dir, &watches).await;
    let provider = Arc::new(ScriptedProvider::default());
    let messenger = Arc::new(BroadcastRecorder::default());

    poller(store, provider.clone(), messenger.clone()).tick().await;

    assert_eq!(provider.calls(), vec!["w1", "w2", "w3"]);
    assert!(messenger.broadcasts().is_empty());
}

#[tokio::test]
async fn available_seats_produce_one_notification_with_deep_link() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir, &[watch("w1", TripKind::Train)]).await;
    let provider = Arc::new(ScriptedProvider {
        available: HashMap::from([(
            "w1".to_owned(),
            FoundTrip {
                seats: 2,
                departure: "2024-05-01T08:30:00".into(),
            },
        )]),
        ..ScriptedProvider::default()
    });
    let messenger = Arc::new(BroadcastRecorder::default());

    poller(store, provider, messenger.clone()).tick().await;

    let broadcasts = messenger.broadcasts();
    assert_eq!(broadcasts.len(), 1);
    let notification = &broadcasts[0];
    assert_eq!(
        notification.message,
        "Train ticket found from THR to MHD, departing 2024-05-01T08:30:00"
    );
    assert_eq!(notification.link, "https://booking.example.test/w1");
    assert_eq!(notification.watch_id, "w1");
}

#[tokio::test]
async fn provider_failure_does_not_abort_the_sweep() {
    let dir = tempfile::tempdir().unwrap();
    let watches = [watch("w1", TripKind::Train), watch("w2", TripKind::Flight)];
    let store = seeded_store(&dir, &watches).await;
    let provider = Arc::new(ScriptedProvider {
        failing: HashSet::from(["w1".to_owned()]),
        available: HashMap::from([(
            "w2".to_owned(),
            FoundTrip {
                seats: 1,
                departure: "2024-05-01T10:15:00".into(),
            },
        )]),
        ..ScriptedProvider::default()
    });
    let messenger = Arc::new(BroadcastRecorder::default());

    poller(store, provider.clone(), messenger.clone()).tick().await;

    // The failing watch is skipped, not fatal; the next one still notifies
    assert_eq!(provider.calls(), vec!["w1", "w2"]);
    let broadcasts = messenger.broadcasts();
    assert_eq!(broadcasts.len(), 1);
    assert_eq!(broadcasts[0].watch_id, "w2");
}

#[tokio::test]
async fn unchanged_store_with_no_availability_stays_silent_across_ticks() {
    let dir = tempfile::tempdir().unwrap();
    let watches = [watch("w1", TripKind::Train), watch("w2", TripKind::Flight)];
    let store = seeded_store(&dir, &watches).await;
    let provider = Arc::new(ScriptedProvider::default());
    let messenger = Arc::new(BroadcastRecorder::default());

    let poller = poller(store, provider.clone(), messenger.clone());
    poller.tick().await;
    poller.tick().await;

    assert_eq!(provider.calls().len(), 4);
    assert!(messenger.broadcasts().is_empty());
}

#[tokio::test]
async fn corrupt_store_is_an_empty_tick() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watches.json");
    tokio::fs::write(&path, b"{ this is not a json array ")
        .await
        .unwrap();
    let store = Arc::new(WatchStore::new(path));
    let provider = Arc::new(ScriptedProvider::default());
    let messenger = Arc::new(BroadcastRecorder::default());

    poller(store, provider.clone(), messenger.clone()).tick().await;

    assert!(provider.calls().is_empty());
    assert!(messenger.broadcasts().is_empty());
}
