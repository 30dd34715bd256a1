// ABOUTME: Guided conversation state machine for registering trip watches
// ABOUTME: Tracks per-user sessions, validates step order, and persists confirmed watches
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Dialog engine.
//!
//! One session per user walks the fixed step sequence
//! origin → destination → date → type → confirmation, editing a single prompt
//! message in place on every transition. Sessions live only in memory: a
//! `/start` discards any unfinished session for that user, a confirmation
//! (either answer) ends it.
//!
//! Selections are validated against the session's expected step: a recognized
//! step arriving out of order, or without a live session, is dropped without
//! mutation or reply; an unrecognized payload gets an explicit
//! "Invalid command" notice. Outbound edit failures are logged and never roll
//! back a transition that already happened.

use crate::channel::{ChannelEvent, ChatId, Choice, Keyboard, MessageRef, Messenger, UserId};
use crate::constants::dialog::{DATE_MENU_DAYS, MENU_COLUMNS};
use crate::jalali;
use crate::locations;
use crate::models::{DraftWatch, TripKind};
use crate::store::WatchStore;
use chrono::{Days, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Dialog step a selection is expected for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Origin,
    Destination,
    Date,
    Kind,
    Confirmation,
}

impl Step {
    /// Callback tag carried by selections for this step
    fn tag(self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::Destination => "dest",
            Self::Date => "date",
            Self::Kind => "type",
            Self::Confirmation => "confirmation",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "origin" => Some(Self::Origin),
            "dest" => Some(Self::Destination),
            "date" => Some(Self::Date),
            "type" => Some(Self::Kind),
            "confirmation" => Some(Self::Confirmation),
            _ => None,
        }
    }
}

/// One user's in-progress registration
#[derive(Debug)]
struct Session {
    draft: DraftWatch,
    expects: Step,
    prompt: MessageRef,
}

/// Guided conversation engine producing persisted trip watches
pub struct DialogEngine {
    store: Arc<WatchStore>,
    messenger: Arc<dyn Messenger>,
    sessions: HashMap<UserId, Session>,
}

impl DialogEngine {
    /// Create an engine over the shared store and channel
    pub fn new(store: Arc<WatchStore>, messenger: Arc<dyn Messenger>) -> Self {
        Self {
            store,
            messenger,
            sessions: HashMap::new(),
        }
    }

    /// Handle one inbound event; events are consumed one at a time in
    /// arrival order
    pub async fn handle(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::Command { user, chat, text } => {
                self.handle_command(user, chat, &text).await;
            }
            ChannelEvent::Selection { user, chat, data } => {
                self.handle_selection(user, chat, &data).await;
            }
        }
    }

    async fn handle_command(&mut self, user: UserId, chat: ChatId, text: &str) {
        // "/start@botname" arrives in group chats; the suffix is noise
        let command = text
            .strip_prefix('/')
            .map(|rest| rest.split('@').next().unwrap_or(rest));

        match command {
            Some("start") => self.start_session(user, chat).await,
            Some("delete" | "complete") => {
                self.reply(chat, "Removing trip watches is not supported yet")
                    .await;
            }
            _ => self.reply(chat, "Unknown command").await,
        }
    }

    async fn start_session(&mut self, user: UserId, chat: ChatId) {
        if self.sessions.remove(&user).is_some() {
            info!(user.id = user, "discarded unfinished session on restart");
        }

        let keyboard = location_menu(Step::Origin);
        match self
            .messenger
            .send_prompt(chat, "Please select the origin:", &keyboard)
            .await
        {
            Ok(prompt) => {
                self.sessions.insert(
                    user,
                    Session {
                        draft: DraftWatch::default(),
                        expects: Step::Origin,
                        prompt,
                    },
                );
            }
            Err(err) => warn!(user.id = user, "failed to open dialog prompt: {err}"),
        }
    }

    async fn handle_selection(&mut self, user: UserId, chat: ChatId, data: &str) {
        let Some((tag, value)) = split_payload(data) else {
            self.reply(chat, "Invalid command").await;
            return;
        };

        // Notification button; the removal flow is intentionally unimplemented
        if tag == "complete" {
            self.reply(chat, "Removing trip watches is not supported yet")
                .await;
            return;
        }

        let Some(step) = Step::from_tag(tag) else {
            self.reply(chat, "Invalid command").await;
            return;
        };

        let Some(mut session) = self.sessions.remove(&user) else {
            debug!(user.id = user, step = tag, "selection without an active session dropped");
            return;
        };
        if session.expects != step {
            debug!(
                user.id = user,
                expected = session.expects.tag(),
                got = tag,
                "out-of-order selection dropped"
            );
            self.sessions.insert(user, session);
            return;
        }

        match step {
            Step::Origin => {
                session.draft.origin = Some(value.to_owned());
                session.expects = Step::Destination;
                self.edit(
                    &session,
                    "Please select the destination:",
                    Some(location_menu(Step::Destination)),
                )
                .await;
                self.sessions.insert(user, session);
            }
            Step::Destination => {
                session.draft.destination = Some(value.to_owned());
                session.expects = Step::Date;
                self.edit(&session, "Please select the date:", Some(date_menu()))
                    .await;
                self.sessions.insert(user, session);
            }
            Step::Date => {
                session.draft.date = Some(value.to_owned());
                session.expects = Step::Kind;
                self.edit(&session, "Please select the trip type:", Some(kind_menu()))
                    .await;
                self.sessions.insert(user, session);
            }
            Step::Kind => {
                let Some(kind) = TripKind::parse(value) else {
                    self.sessions.insert(user, session);
                    self.reply(chat, "Invalid command").await;
                    return;
                };
                session.draft.kind = Some(kind);
                session.expects = Step::Confirmation;
                let summary = confirmation_text(&session.draft);
                self.edit(&session, &summary, Some(confirm_menu())).await;
                self.sessions.insert(user, session);
            }
            // Either answer ends the session; it is already out of the map
            Step::Confirmation => self.finish_session(user, &session, value).await,
        }
    }

    async fn finish_session(&self, user: UserId, session: &Session, answer: &str) {
        if answer != "1" {
            info!(user.id = user, "trip watch declined at confirmation");
            self.edit(session, "Your trip watch was not saved", None)
                .await;
            return;
        }

        let id = Uuid::new_v4().to_string();
        let Some(watch) = session.draft.clone().complete(id) else {
            // Unreachable through the step sequence, but never persist a
            // partial watch
            error!(user.id = user, "confirmation reached with an incomplete draft");
            self.edit(session, "Something went wrong, please start over", None)
                .await;
            return;
        };

        match self.store.append(watch).await {
            Ok(()) => {
                info!(user.id = user, "trip watch saved");
                self.edit(session, "Your trip watch has been saved", None)
                    .await;
            }
            Err(err) => {
                error!(user.id = user, "failed to persist trip watch: {err}");
                self.edit(
                    session,
                    "Saving your trip watch failed, please start over",
                    None,
                )
                .await;
            }
        }
    }

    async fn edit(&self, session: &Session, text: &str, keyboard: Option<Keyboard>) {
        if let Err(err) = self
            .messenger
            .edit_prompt(session.prompt, text, keyboard.as_ref())
            .await
        {
            warn!("failed to edit dialog prompt: {err}");
        }
    }

    async fn reply(&self, chat: ChatId, text: &str) {
        if let Err(err) = self.messenger.send_text(chat, text).await {
            warn!("failed to send reply: {err}");
        }
    }
}

fn split_payload(data: &str) -> Option<(&str, &str)> {
    data.split_once('_').or_else(|| data.split_once('|'))
}

fn location_menu(step: Step) -> Keyboard {
    let rows = locations::DIRECTORY
        .chunks(MENU_COLUMNS)
        .map(|chunk| {
            chunk
                .iter()
                .map(|location| {
                    Choice::callback(
                        location.name,
                        format!("{}_{}", step.tag(), location.code),
                    )
                })
                .collect()
        })
        .collect();
    Keyboard { rows }
}

fn date_menu() -> Keyboard {
    let today = Utc::now().date_naive();
    let mut rows = Vec::new();
    for offset in 0..DATE_MENU_DAYS {
        let Some(date) = today.checked_add_days(Days::new(offset)) else {
            continue;
        };
        let gregorian = date.format("%Y-%m-%d").to_string();
        // Label in the local calendar, canonical Gregorian date in the payload
        rows.push(vec![Choice::callback(
            jalali::localize(&gregorian),
            format!("date_{gregorian}"),
        )]);
    }
    Keyboard { rows }
}

fn kind_menu() -> Keyboard {
    Keyboard {
        rows: vec![
            vec![Choice::callback(TripKind::Train.label(), "type_train")],
            vec![Choice::callback(TripKind::Flight.label(), "type_flight")],
        ],
    }
}

fn confirm_menu() -> Keyboard {
    Keyboard {
        rows: vec![
            vec![Choice::callback("Yes", "confirmation_1")],
            vec![Choice::callback("No", "confirmation_0")],
        ],
    }
}

fn confirmation_text(draft: &DraftWatch) -> String {
    let origin = display_name(draft.origin.as_deref());
    let destination = display_name(draft.destination.as_deref());
    let date = draft.date.as_deref().unwrap_or_default();
    format!(
        "You want to save a trip from {origin} to {destination} on {}, do you confirm?",
        jalali::localize(date)
    )
}

fn display_name(code: Option<&str>) -> &str {
    let code = code.unwrap_or("?");
    locations::by_code(code).map_or(code, |location| location.name)
}
