// ABOUTME: Unified error handling with typed application errors and a shared result alias
// ABOUTME: Maps transport, serialization, and domain failures into one AppError taxonomy
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Unified Error Handling
//!
//! Central error type for the application. Every fallible operation returns
//! [`AppResult`]; the variants follow the system's failure taxonomy: transient
//! provider/transport failures, store corruption, channel delivery failures,
//! and configuration problems. None of them are fatal to the process; the
//! two scheduled loops log and carry on.

use thiserror::Error;

/// Result alias used throughout the application
pub type AppResult<T> = Result<T, AppError>;

/// Unified error type for the application
#[derive(Debug, Error)]
pub enum AppError {
    /// Required configuration is missing or malformed
    #[error("configuration error: {0}")]
    Config(String),

    /// The trip-watch store could not be read, parsed, or written
    #[error("store error: {0}")]
    Store(String),

    /// The booking provider returned an unusable response
    #[error("provider error: {0}")]
    Provider(String),

    /// The messaging channel rejected a send, edit, or poll
    #[error("channel error: {0}")]
    Channel(String),

    /// Payload could not be serialized or deserialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport-level HTTP failure
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// File-system failure underneath the store
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Create a provider error
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    /// Create a channel error
    pub fn channel(message: impl Into<String>) -> Self {
        Self::Channel(message.into())
    }
}
