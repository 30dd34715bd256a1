// ABOUTME: Alibaba domestic booking API integration for seat-availability checks
// ABOUTME: Handles the token/itinerary round trip and booking deep-link construction
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Alibaba availability client.
//!
//! One polymorphic check covers both trip kinds; the kind selects the
//! endpoint family, the token payload shape, and the deep-link template:
//!
//! 1. `POST` the kind-specific availability endpoint with the leg and
//!    passenger defaults → `{result: {requestId}}`
//! 2. `GET` the same endpoint suffixed with the request id →
//!    `{result: {departing: [...]}}`
//! 3. First itinerary with `seat > 0`, in response order, wins.

use super::SeatProvider;
use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use crate::http_client::shared_client;
use crate::jalali;
use crate::models::{FoundTrip, TripKind, TripWatch};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::Url;

/// Client for the booking provider's domestic availability API
pub struct AlibabaClient {
    client: Client,
    api_base: String,
}

impl AlibabaClient {
    /// Create a client against the given API base URL
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: shared_client().clone(),
            api_base: api_base.into(),
        }
    }

    fn availability_endpoint(&self, kind: TripKind) -> String {
        match kind {
            TripKind::Train => format!("{}/api/v2/train/available", self.api_base),
            TripKind::Flight => format!("{}/api/v1/flights/domestic/available", self.api_base),
        }
    }

    fn token_payload(watch: &TripWatch) -> serde_json::Value {
        match watch.kind {
            TripKind::Train => json!({
                "departureDate": watch.date,
                "destination": watch.destination,
                "origin": watch.origin,
                "isExclusiveCompartment": false,
                "passengerCount": 1,
                "ticketType": "Family",
            }),
            TripKind::Flight => json!({
                "departureDate": watch.date,
                "destination": watch.destination,
                "origin": watch.origin,
                "adult": 1,
                "child": 0,
                "infant": 0,
            }),
        }
    }

    async fn request_token(&self, watch: &TripWatch) -> AppResult<String> {
        let response: TokenResponse = self
            .client
            .post(self.availability_endpoint(watch.kind))
            .json(&Self::token_payload(watch))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.result.request_id.is_empty() {
            return Err(AppError::provider(
                "availability endpoint returned an empty request id",
            ));
        }
        Ok(response.result.request_id)
    }

    async fn fetch_departures(&self, kind: TripKind, token: &str) -> AppResult<Vec<ItineraryDto>> {
        let url = format!("{}/{token}", self.availability_endpoint(kind));
        let response: DepartureResponse = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.result.departing)
    }
}

#[async_trait]
impl SeatProvider for AlibabaClient {
    async fn check(&self, watch: &TripWatch) -> AppResult<Option<FoundTrip>> {
        let token = self.request_token(watch).await?;
        let departing = self.fetch_departures(watch.kind, &token).await?;
        debug!(
            watch.id = %watch.id,
            kind = %watch.kind,
            itineraries = departing.len(),
            "departure board fetched"
        );

        Ok(first_available(&departing).map(|itinerary| FoundTrip {
            seats: itinerary.seat,
            departure: itinerary.departure_time.clone(),
        }))
    }

    fn booking_link(&self, watch: &TripWatch) -> AppResult<String> {
        let localized = jalali::localize(&watch.date);
        let mut url = Url::parse(defaults::BOOKING_SITE_BASE)
            .map_err(|err| AppError::provider(format!("invalid booking site base: {err}")))?;

        match watch.kind {
            TripKind::Train => {
                url.set_path(&format!("train/{}-{}", watch.origin, watch.destination));
                url.query_pairs_mut()
                    .append_pair("adult", "1")
                    .append_pair("child", "0")
                    .append_pair("ticketType", "Family")
                    .append_pair("isExclusive", "false")
                    .append_pair("infant", "0")
                    .append_pair("departing", &localized);
            }
            TripKind::Flight => {
                url.set_path(&format!("flights/{}-{}", watch.origin, watch.destination));
                url.query_pairs_mut()
                    .append_pair("adult", "1")
                    .append_pair("child", "0")
                    .append_pair("infant", "0")
                    .append_pair("departing", &localized);
            }
        }

        Ok(url.to_string())
    }
}

/// First-match selection: the earliest itinerary in response order with free
/// seats wins; seat count magnitude, price, and time are not considered
fn first_available(departing: &[ItineraryDto]) -> Option<&ItineraryDto> {
    departing.iter().find(|itinerary| itinerary.seat > 0)
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    result: TokenResult,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TokenResult {
    #[serde(rename = "requestId")]
    request_id: String,
}

#[derive(Debug, Deserialize)]
struct DepartureResponse {
    result: DepartureResult,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DepartureResult {
    departing: Vec<ItineraryDto>,
}

/// One offered departure option; trains report `departureDateTime`, flights
/// `leaveDateTime`
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ItineraryDto {
    seat: i64,
    #[serde(alias = "departureDateTime", alias = "leaveDateTime")]
    departure_time: String,
}
