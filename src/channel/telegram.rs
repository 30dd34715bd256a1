// ABOUTME: Telegram Bot API integration implementing the Messenger seam
// ABOUTME: Long-polls updates, sends and edits inline-keyboard prompts, broadcasts notifications
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Telegram channel binding.
//!
//! Wraps the Bot HTTP API: `sendMessage` / `editMessageText` for the dialog
//! prompts and notification broadcasts, `getUpdates` long-polling for inbound
//! events. Updates are translated into [`ChannelEvent`]s; the confirmed
//! offset is tracked so each update is delivered once.

use super::{ChannelEvent, ChatId, Choice, ChoiceAction, Keyboard, MessageRef, Messenger};
use crate::constants::http;
use crate::errors::{AppError, AppResult};
use crate::http_client::{client_with_timeout, shared_client};
use crate::models::TicketNotification;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::info;

/// Telegram Bot API binding for the [`Messenger`] seam
pub struct TelegramChannel {
    client: Client,
    poll_client: Client,
    api_base: String,
    token: String,
    broadcast_chat: String,
    update_offset: Mutex<i64>,
}

impl TelegramChannel {
    /// Create a channel for the given bot token and broadcast destination
    pub fn new(
        api_base: impl Into<String>,
        token: impl Into<String>,
        broadcast_chat: impl Into<String>,
    ) -> Self {
        Self {
            client: shared_client().clone(),
            poll_client: client_with_timeout(
                http::LONG_POLL_CLIENT_TIMEOUT_SECS,
                http::CONNECT_TIMEOUT_SECS,
            ),
            api_base: api_base.into(),
            token: token.into(),
            broadcast_chat: broadcast_chat.into(),
            update_offset: Mutex::new(0),
        }
    }

    /// Long-poll the Bot API once and translate new updates into events,
    /// advancing the confirmed offset past everything returned
    ///
    /// # Errors
    ///
    /// Returns a channel error if the poll request fails; the offset is left
    /// untouched so no update is lost.
    pub async fn next_events(&self) -> AppResult<Vec<ChannelEvent>> {
        let offset = *self.update_offset.lock().await;
        let updates: Vec<UpdateDto> = self
            .invoke(
                &self.poll_client,
                "getUpdates",
                json!({
                    "offset": offset,
                    "timeout": http::LONG_POLL_TIMEOUT_SECS,
                }),
            )
            .await?;

        let mut next_offset = offset;
        let mut events = Vec::new();
        for update in updates {
            next_offset = next_offset.max(update.update_id + 1);
            if let Some(event) = update.into_event() {
                events.push(event);
            }
        }
        *self.update_offset.lock().await = next_offset;

        Ok(events)
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_base, self.token)
    }

    async fn invoke<T: DeserializeOwned>(
        &self,
        client: &Client,
        method: &str,
        payload: serde_json::Value,
    ) -> AppResult<T> {
        let reply: ApiReply<T> = client
            .post(self.method_url(method))
            .json(&payload)
            .send()
            .await?
            .json()
            .await?;

        if !reply.ok {
            return Err(AppError::channel(format!(
                "{method} failed: {}",
                reply.description.unwrap_or_else(|| "unknown error".into())
            )));
        }
        reply
            .result
            .ok_or_else(|| AppError::channel(format!("{method} returned an empty result")))
    }
}

#[async_trait]
impl Messenger for TelegramChannel {
    async fn send_prompt(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: &Keyboard,
    ) -> AppResult<MessageRef> {
        let payload = json!({
            "chat_id": chat,
            "text": text,
            "reply_markup": markup(keyboard),
        });
        let sent: SentMessage = self.invoke(&self.client, "sendMessage", payload).await?;
        Ok(MessageRef {
            chat,
            message_id: sent.message_id,
        })
    }

    async fn edit_prompt(
        &self,
        prompt: MessageRef,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> AppResult<()> {
        let mut payload = json!({
            "chat_id": prompt.chat,
            "message_id": prompt.message_id,
            "text": text,
        });
        if let Some(keyboard) = keyboard {
            payload["reply_markup"] = serde_json::to_value(markup(keyboard))?;
        }
        self.invoke::<serde_json::Value>(&self.client, "editMessageText", payload)
            .await?;
        Ok(())
    }

    async fn send_text(&self, chat: ChatId, text: &str) -> AppResult<()> {
        let payload = json!({ "chat_id": chat, "text": text });
        self.invoke::<serde_json::Value>(&self.client, "sendMessage", payload)
            .await?;
        Ok(())
    }

    async fn broadcast(&self, notification: &TicketNotification) -> AppResult<()> {
        let keyboard = Keyboard {
            rows: vec![vec![
                Choice::url("View Ticket", notification.link.clone()),
                Choice::callback("Complete", format!("complete|{}", notification.watch_id)),
            ]],
        };
        let payload = json!({
            "chat_id": self.broadcast_chat,
            "text": notification.message,
            "parse_mode": "HTML",
            "reply_markup": markup(&keyboard),
        });
        self.invoke::<SentMessage>(&self.client, "sendMessage", payload)
            .await?;
        info!(
            message = %notification.message,
            link = %notification.link,
            "ticket notification broadcast"
        );
        Ok(())
    }
}

fn markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: keyboard
            .rows
            .iter()
            .map(|row| row.iter().map(button).collect())
            .collect(),
    }
}

fn button(choice: &Choice) -> InlineButton {
    match &choice.action {
        ChoiceAction::Callback(data) => InlineButton {
            text: choice.label.clone(),
            url: None,
            callback_data: Some(data.clone()),
        },
        ChoiceAction::Url(url) => InlineButton {
            text: choice.label.clone(),
            url: Some(url.clone()),
            callback_data: None,
        },
    }
}

#[derive(Debug, Serialize)]
struct InlineKeyboardMarkup {
    inline_keyboard: Vec<Vec<InlineButton>>,
}

#[derive(Debug, Serialize)]
struct InlineButton {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiReply<T> {
    ok: bool,
    description: Option<String>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
}

#[derive(Debug, Deserialize)]
struct UpdateDto {
    update_id: i64,
    message: Option<IncomingMessage>,
    callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Deserialize)]
struct IncomingMessage {
    text: Option<String>,
    chat: ChatDto,
    from: Option<SenderDto>,
}

#[derive(Debug, Deserialize)]
struct ChatDto {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct SenderDto {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    data: Option<String>,
    from: SenderDto,
    message: Option<IncomingMessage>,
}

impl UpdateDto {
    // Callback selections take precedence; bare messages become commands.
    // Updates of any other shape are dropped.
    fn into_event(self) -> Option<ChannelEvent> {
        if let Some(callback) = self.callback_query {
            let chat = callback.message.as_ref().map(|message| message.chat.id)?;
            return Some(ChannelEvent::Selection {
                user: callback.from.id,
                chat,
                data: callback.data?,
            });
        }

        let message = self.message?;
        Some(ChannelEvent::Command {
            user: message.from?.id,
            chat: message.chat.id,
            text: message.text?,
        })
    }
}
