// ABOUTME: Main library entry point for the seatwatch availability watcher
// ABOUTME: Exposes the dialog engine, availability poller, and provider/channel bindings
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Seatwatch
//!
//! A seat-availability watcher for domestic train and flight bookings. Users
//! register trip watches through a guided inline-keyboard conversation on a
//! messaging channel; a background poller then checks the booking provider on
//! a fixed interval and broadcasts a notification the moment a watched trip
//! has free seats.
//!
//! ## Architecture
//!
//! Two subsystems cooperate inside one process and share only the persisted
//! trip-watch store:
//!
//! - **Dialog engine** (`dialog`): a per-user conversation state machine that
//!   collects origin, destination, date, and trip type step by step and
//!   persists the confirmed watch.
//! - **Availability poller** (`poller`): a fixed-interval loop that checks
//!   every persisted watch against the provider, strictly sequentially, and
//!   broadcasts a booking deep link when seats appear.
//!
//! External collaborators sit behind trait seams so both subsystems are
//! testable without network access:
//!
//! - `providers::SeatProvider`: the booking back end (`providers::alibaba`)
//! - `channel::Messenger`: the messaging transport (`channel::telegram`)

/// Messaging channel abstraction: events, keyboards, and the Telegram binding
pub mod channel;

/// Environment-driven runtime configuration
pub mod config;

/// Application constants and default values
pub mod constants;

/// Guided conversation flow for registering trip watches
pub mod dialog;

/// Unified error handling with typed application errors
pub mod errors;

/// Shared HTTP client utilities with pooling and timeouts
pub mod http_client;

/// Gregorian to Jalali calendar-date conversion
pub mod jalali;

/// Static directory of selectable trip origins and destinations
pub mod locations;

/// Structured logging configuration
pub mod logging;

/// Core data models for trip watches and notifications
pub mod models;

/// Fixed-interval availability poller
pub mod poller;

/// Booking provider clients and the availability-check seam
pub mod providers;

/// File-backed persistent trip-watch store
pub mod store;
