// ABOUTME: Booking provider abstraction for seat-availability checks
// ABOUTME: Defines the SeatProvider seam implemented by concrete provider clients
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Provider seam.
//!
//! The poller talks to the booking back end exclusively through
//! [`SeatProvider`], so scheduling behavior is testable with a scripted fake
//! while [`alibaba::AlibabaClient`] carries the real HTTP flow.

/// Availability client for the Alibaba domestic booking API
pub mod alibaba;

use crate::errors::AppResult;
use crate::models::{FoundTrip, TripWatch};
use async_trait::async_trait;

/// A booking back end that can report seat availability for a trip watch
#[async_trait]
pub trait SeatProvider: Send + Sync {
    /// Check the provider for the watched leg and return the first itinerary
    /// with free seats, in provider response order, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when either provider round trip (token request or
    /// itinerary fetch) fails or yields an unusable response. Callers treat
    /// this as "unknown this tick", distinct from a clean empty result.
    async fn check(&self, watch: &TripWatch) -> AppResult<Option<FoundTrip>>;

    /// Deep link into the provider's booking page for the watched leg
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be constructed.
    fn booking_link(&self, watch: &TripWatch) -> AppResult<String>;
}
