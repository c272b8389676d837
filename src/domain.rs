//! Data shapes exchanged with the external booking API.
//!
//! Wire dates stay as raw ISO-8601 strings; the availability core
//! performs its own day-level normalization, so a malformed date from
//! the server degrades to "blocks nothing" instead of a decode failure.

use crate::availability::Day;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reservation as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(rename = "dateFrom")]
    pub date_from: String,
    #[serde(rename = "dateTo")]
    pub date_to: String,
    pub guests: u32,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    /// Present only when bookings are fetched with venue expansion;
    /// used for display, never for availability math.
    #[serde(default)]
    pub venue: Option<Venue>,
}

impl Booking {
    /// Check-in calendar day, if the wire date parses.
    pub fn from_day(&self) -> Option<Day> {
        Day::parse_iso(&self.date_from)
    }

    /// Check-out calendar day, if the wire date parses.
    pub fn to_day(&self) -> Option<Day> {
        Day::parse_iso(&self.date_to)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(rename = "maxGuests")]
    pub max_guests: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub media: Vec<Media>,
    #[serde(default)]
    pub location: Option<Location>,
    /// Present only with owner expansion.
    #[serde(default)]
    pub owner: Option<Profile>,
    /// Present only with bookings expansion; input to the availability
    /// index.
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[serde(rename = "venueManager", default)]
    pub venue_manager: bool,
    #[serde(default)]
    pub avatar: Option<Media>,
}

/// Payload for creating a booking.
#[derive(Debug, Clone, Serialize)]
pub struct NewBooking {
    #[serde(rename = "dateFrom")]
    pub date_from: String,
    #[serde(rename = "dateTo")]
    pub date_to: String,
    pub guests: u32,
    #[serde(rename = "venueId")]
    pub venue_id: Uuid,
}

/// Payload for creating or replacing a venue listing.
#[derive(Debug, Clone, Serialize)]
pub struct VenueSubmission {
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(rename = "maxGuests")]
    pub max_guests: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}
