// ABOUTME: Messaging channel abstraction shared by the dialog engine and the poller
// ABOUTME: Defines inbound events, transport-neutral keyboards, and the Messenger seam
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Channel seam.
//!
//! The dialog engine and the poller address the messaging side exclusively
//! through [`Messenger`] and the transport-neutral [`Keyboard`] model;
//! [`telegram::TelegramChannel`] is the production binding.

/// Telegram Bot API binding for the channel seam
pub mod telegram;

use crate::errors::AppResult;
use crate::models::TicketNotification;
use async_trait::async_trait;

/// Identifies a chat on the messaging side
pub type ChatId = i64;

/// Identifies a user on the messaging side
pub type UserId = i64;

/// Opaque reference to a previously sent prompt message, used for in-place
/// edits across dialog transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    /// Chat the prompt lives in
    pub chat: ChatId,
    /// Channel-assigned message identifier
    pub message_id: i64,
}

/// Action triggered when a keyboard choice is pressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceAction {
    /// Deliver the payload back as a [`ChannelEvent::Selection`]
    Callback(String),
    /// Open an external URL
    Url(String),
}

/// One selectable option on an inline keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Button label shown to the user
    pub label: String,
    /// What pressing the button does
    pub action: ChoiceAction,
}

impl Choice {
    /// Choice that posts a callback payload back to the dialog
    pub fn callback(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ChoiceAction::Callback(data.into()),
        }
    }

    /// Choice that opens an external URL
    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ChoiceAction::Url(url.into()),
        }
    }
}

/// Inline keyboard: rows of choices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    /// Choice rows, rendered top to bottom
    pub rows: Vec<Vec<Choice>>,
}

/// Inbound event delivered by the channel, consumed one at a time in
/// arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// A plain text command such as `/start`
    Command {
        /// Sending user
        user: UserId,
        /// Chat the command was issued in
        chat: ChatId,
        /// Raw command text including the leading slash
        text: String,
    },
    /// An inline-choice selection carrying its raw callback payload,
    /// encoded as `"<tag>_<value>"` or `"<tag>|<value>"`
    Selection {
        /// Selecting user
        user: UserId,
        /// Chat the selection originated from
        chat: ChatId,
        /// Raw callback payload
        data: String,
    },
}

/// Outbound messaging operations used by the dialog engine and the poller
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send a new prompt with an inline keyboard, returning a reference the
    /// dialog can edit on later transitions
    ///
    /// # Errors
    ///
    /// Returns a channel error if the transport rejects the send.
    async fn send_prompt(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: &Keyboard,
    ) -> AppResult<MessageRef>;

    /// Replace the text (and keyboard, when given) of a previously sent
    /// prompt in place; omitting the keyboard clears it
    ///
    /// # Errors
    ///
    /// Returns a channel error if the transport rejects the edit.
    async fn edit_prompt(
        &self,
        prompt: MessageRef,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> AppResult<()>;

    /// Send a plain reply with no keyboard
    ///
    /// # Errors
    ///
    /// Returns a channel error if the transport rejects the send.
    async fn send_text(&self, chat: ChatId, text: &str) -> AppResult<()>;

    /// Broadcast a ticket notification to the configured channel destination
    ///
    /// # Errors
    ///
    /// Returns a channel error if the transport rejects the broadcast.
    async fn broadcast(&self, notification: &TicketNotification) -> AppResult<()>;
}
