// ABOUTME: Core data models for trip watches, availability results, and notifications
// ABOUTME: Defines TripWatch, TripKind, DraftWatch and the notification payload
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Data Models
//!
//! Shared domain types. `TripWatch` is the persisted entity; `DraftWatch` is
//! its in-progress form accumulated by the dialog engine; `FoundTrip` and
//! `TicketNotification` are transient values produced per poll.
//!
//! The serialized field names (`dest`, `type`) match the store's wire format
//! so existing store files stay readable.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Kind of trip a watch applies to
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripKind {
    /// Domestic rail trip
    Train,
    /// Domestic flight
    Flight,
}

impl TripKind {
    /// Canonical lowercase name, as persisted and as carried in callbacks
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Flight => "flight",
        }
    }

    /// Human-readable label for menus and notifications
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Train => "Train",
            Self::Flight => "Flight",
        }
    }

    /// Parse the canonical lowercase name
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "train" => Some(Self::Train),
            "flight" => Some(Self::Flight),
            _ => None,
        }
    }
}

impl Display for TripKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A persisted request to be notified when a matching ticket appears
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripWatch {
    /// Unique identifier, assigned when the watch is confirmed
    pub id: String,
    /// Origin location code
    pub origin: String,
    /// Destination location code
    #[serde(rename = "dest")]
    pub destination: String,
    /// Travel date as a Gregorian `YYYY-MM-DD` string
    pub date: String,
    /// Trip kind selecting the provider endpoints to query
    #[serde(rename = "type")]
    pub kind: TripKind,
}

/// In-progress trip watch accumulated across dialog steps
#[derive(Debug, Clone, Default)]
pub struct DraftWatch {
    /// Chosen origin code, if reached
    pub origin: Option<String>,
    /// Chosen destination code, if reached
    pub destination: Option<String>,
    /// Chosen Gregorian travel date, if reached
    pub date: Option<String>,
    /// Chosen trip kind, if reached
    pub kind: Option<TripKind>,
}

impl DraftWatch {
    /// Promote the draft into a persistable watch under the given id.
    /// Returns `None` unless every semantic field has been collected.
    #[must_use]
    pub fn complete(self, id: String) -> Option<TripWatch> {
        Some(TripWatch {
            id,
            origin: self.origin?,
            destination: self.destination?,
            date: self.date?,
            kind: self.kind?,
        })
    }
}

/// First itinerary with free seats, as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundTrip {
    /// Seats reported free on the matched itinerary
    pub seats: i64,
    /// Departure timestamp of the matched itinerary, verbatim from the provider
    pub departure: String,
}

/// Outbound notification announcing an available ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketNotification {
    /// Human-readable announcement naming origin, destination, and departure
    pub message: String,
    /// Deep link into the provider's booking page
    pub link: String,
    /// Identifier of the trip watch that matched
    pub watch_id: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn trip_watch_wire_format_uses_original_field_names() {
        let watch = TripWatch {
            id: "w1".into(),
            origin: "THR".into(),
            destination: "MHD".into(),
            date: "2024-05-01".into(),
            kind: TripKind::Train,
        };

        let json = serde_json::to_value(&watch).unwrap();
        assert_eq!(json["dest"], "MHD");
        assert_eq!(json["type"], "train");
        assert!(json.get("destination").is_none());
    }

    #[test]
    fn draft_completes_only_when_all_fields_set() {
        let draft = DraftWatch {
            origin: Some("THR".into()),
            destination: Some("MHD".into()),
            date: Some("2024-05-01".into()),
            kind: None,
        };
        assert!(draft.clone().complete("id".into()).is_none());

        let full = DraftWatch {
            kind: Some(TripKind::Flight),
            ..draft
        };
        let watch = full.complete("id".into()).unwrap();
        assert_eq!(watch.kind, TripKind::Flight);
        assert_eq!(watch.origin, "THR");
    }

    #[test]
    fn trip_kind_parse_round_trips() {
        assert_eq!(TripKind::parse("train"), Some(TripKind::Train));
        assert_eq!(TripKind::parse("flight"), Some(TripKind::Flight));
        assert_eq!(TripKind::parse("bus"), None);
        assert_eq!(TripKind::Train.as_str(), "train");
    }
}
