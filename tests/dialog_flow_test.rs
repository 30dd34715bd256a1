// ABOUTME: Tests for the guided conversation flow registering trip watches
// ABOUTME: Validates step ordering, confirmation outcomes, and session lifecycle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use async_trait::async_trait;
use seatwatch::channel::{ChannelEvent, ChatId, Keyboard, MessageRef, Messenger};
use seatwatch::dialog::DialogEngine;
use seatwatch::errors::AppResult;
use seatwatch::models::{TicketNotification, TripKind};
use seatwatch::store::WatchStore;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

/// Messenger fake recording every outbound interaction
#[derive(Default)]
struct RecordingMessenger {
    next_message_id: AtomicI64,
    prompts: Mutex<Vec<String>>,
    edits: Mutex<Vec<String>>,
    replies: Mutex<Vec<String>>,
}

impl RecordingMessenger {
    fn edits(&self) -> Vec<String> {
        self.edits.lock().unwrap().clone()
    }

    fn replies(&self) -> Vec<String> {
        self.replies.lock().unwrap().clone()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_prompt(
        &self,
        chat: ChatId,
        text: &str,
        _keyboard: &Keyboard,
    ) -> AppResult<MessageRef> {
        self.prompts.lock().unwrap().push(text.to_owned());
        let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(MessageRef { chat, message_id })
    }

    async fn edit_prompt(
        &self,
        _prompt: MessageRef,
        text: &str,
        _keyboard: Option<&Keyboard>,
    ) -> AppResult<()> {
        self.edits.lock().unwrap().push(text.to_owned());
        Ok(())
    }

    async fn send_text(&self, _chat: ChatId, text: &str) -> AppResult<()> {
        self.replies.lock().unwrap().push(text.to_owned());
        Ok(())
    }

    async fn broadcast(&self, _notification: &TicketNotification) -> AppResult<()> {
        Ok(())
    }
}

struct Harness {
    engine: DialogEngine,
    messenger: Arc<RecordingMessenger>,
    store: Arc<WatchStore>,
    _dir: tempfile::TempDir,
}

fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(WatchStore::new(dir.path().join("watches.json")));
    let messenger = Arc::new(RecordingMessenger::default());
    let engine = DialogEngine::new(Arc::clone(&store), messenger.clone());
    Harness {
        engine,
        messenger,
        store,
        _dir: dir,
    }
}

fn command(user: i64, text: &str) -> ChannelEvent {
    ChannelEvent::Command {
        user,
        chat: user,
        text: text.into(),
    }
}

fn selection(user: i64, data: &str) -> ChannelEvent {
    ChannelEvent::Selection {
        user,
        chat: user,
        data: data.into(),
    }
}

#[tokio::test]
async fn full_flow_persists_exactly_one_watch() {
    let mut h = harness();

    h.engine.handle(command(7, "/start")).await;
    for data in [
        "origin_THR",
        "dest_MHD",
        "date_2024-05-01",
        "type_train",
        "confirmation_1",
    ] {
        h.engine.handle(selection(7, data)).await;
    }

    let watches = h.store.load().await.unwrap();
    assert_eq!(watches.len(), 1);
    let watch = &watches[0];
    assert_eq!(watch.origin, "THR");
    assert_eq!(watch.destination, "MHD");
    assert_eq!(watch.date, "2024-05-01");
    assert_eq!(watch.kind, TripKind::Train);
    assert!(!watch.id.is_empty());

    let edits = h.messenger.edits();
    assert_eq!(edits.len(), 5);
    assert_eq!(edits.last().unwrap(), "Your trip watch has been saved");
}

#[tokio::test]
async fn consecutive_watches_get_distinct_ids() {
    let mut h = harness();

    for _ in 0..2 {
        h.engine.handle(command(7, "/start")).await;
        for data in [
            "origin_THR",
            "dest_MHD",
            "date_2024-05-01",
            "type_flight",
            "confirmation_1",
        ] {
            h.engine.handle(selection(7, data)).await;
        }
    }

    let watches = h.store.load().await.unwrap();
    assert_eq!(watches.len(), 2);
    assert_ne!(watches[0].id, watches[1].id);
}

#[tokio::test]
async fn declining_confirmation_persists_nothing_and_ends_session() {
    let mut h = harness();

    h.engine.handle(command(7, "/start")).await;
    for data in [
        "origin_THR",
        "dest_MHD",
        "date_2024-05-01",
        "type_train",
        "confirmation_0",
    ] {
        h.engine.handle(selection(7, data)).await;
    }

    assert!(h.store.load().await.unwrap().is_empty());
    assert_eq!(
        h.messenger.edits().last().unwrap(),
        "Your trip watch was not saved"
    );

    // The session is gone: a late confirm changes nothing
    h.engine.handle(selection(7, "confirmation_1")).await;
    assert!(h.store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn out_of_order_step_is_dropped_without_mutation() {
    let mut h = harness();

    h.engine.handle(command(7, "/start")).await;
    h.engine.handle(selection(7, "date_2024-05-01")).await;

    // Dropped silently: no edit, no reply, session still awaits the origin
    assert!(h.messenger.edits().is_empty());
    assert!(h.messenger.replies().is_empty());

    h.engine.handle(selection(7, "origin_THR")).await;
    assert_eq!(h.messenger.edits().len(), 1);
    assert!(h.store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn selection_without_session_is_dropped() {
    let mut h = harness();

    h.engine.handle(selection(7, "origin_THR")).await;

    assert!(h.messenger.edits().is_empty());
    assert!(h.messenger.replies().is_empty());
    assert!(h.store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn restart_discards_the_unfinished_session() {
    let mut h = harness();

    h.engine.handle(command(7, "/start")).await;
    h.engine.handle(selection(7, "origin_THR")).await;

    // Restart: the fresh session expects an origin again
    h.engine.handle(command(7, "/start")).await;
    h.engine.handle(selection(7, "dest_MHD")).await;
    assert_eq!(h.messenger.edits().len(), 1, "stale step must be dropped");

    for data in [
        "origin_SYZ",
        "dest_MHD",
        "date_2024-06-01",
        "type_flight",
        "confirmation_1",
    ] {
        h.engine.handle(selection(7, data)).await;
    }

    let watches = h.store.load().await.unwrap();
    assert_eq!(watches.len(), 1);
    assert_eq!(watches[0].origin, "SYZ");
}

#[tokio::test]
async fn unrecognized_payloads_get_an_invalid_command_notice() {
    let mut h = harness();

    h.engine.handle(command(7, "/start")).await;
    h.engine.handle(selection(7, "bogus_value")).await;
    assert_eq!(h.messenger.replies(), vec!["Invalid command".to_owned()]);

    // Unparseable payload with no separator at all
    h.engine.handle(selection(7, "garbage")).await;
    assert_eq!(h.messenger.replies().len(), 2);

    // Neither touched the session: the origin step still works
    h.engine.handle(selection(7, "origin_THR")).await;
    assert_eq!(h.messenger.edits().len(), 1);
}

#[tokio::test]
async fn unknown_command_gets_a_notice() {
    let mut h = harness();

    h.engine.handle(command(7, "/frobnicate")).await;
    assert_eq!(h.messenger.replies(), vec!["Unknown command".to_owned()]);
}

#[tokio::test]
async fn removal_surfaces_are_acknowledged_but_inert() {
    let mut h = harness();

    h.engine.handle(command(7, "/delete")).await;
    h.engine.handle(command(7, "/complete")).await;
    h.engine.handle(selection(7, "complete|some-watch-id")).await;

    assert_eq!(h.messenger.replies().len(), 3);
    assert!(h
        .messenger
        .replies()
        .iter()
        .all(|reply| reply == "Removing trip watches is not supported yet"));
    assert!(h.store.load().await.unwrap().is_empty());
}
