//! Domain types for the ticketing session.
//!
//! Events and artists are immutable records supplied by the catalog; the
//! types here never mutate them. Tickets are minted once per confirmed
//! purchase and are immutable afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for an event, assigned by the catalog
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(String);

impl EventId {
    /// Creates an event id from an opaque string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier for an artist, assigned by the catalog
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtistId(String);

impl ArtistId {
    /// Creates an artist id from an opaque string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArtistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an issued ticket
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketId(Uuid);

impl TicketId {
    /// Creates a new random `TicketId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `TicketId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TicketId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for one purchase attempt
///
/// Minted when a checkout begins and carried through to the issued ticket;
/// the ledger uses it to enforce at-most-once issuance per attempt.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PurchaseId(Uuid);

impl PurchaseId {
    /// Creates a new random `PurchaseId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `PurchaseId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for PurchaseId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PurchaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sales status of an event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Selling fast
    SellingFast,
    /// Tickets available
    Available,
    /// Sold out
    SoldOut,
}

/// Price band for an event, in integer currency units
///
/// `min <= max` by catalog contract. The core only ever adds these values;
/// no currency conversion happens anywhere.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Cheapest admission price
    pub min: i64,
    /// Most expensive admission price
    pub max: i64,
    /// Currency symbol, e.g. `"₹"`
    pub currency: String,
}

impl PriceRange {
    /// Creates a price band
    #[must_use]
    pub fn new(min: i64, max: i64, currency: impl Into<String>) -> Self {
        Self {
            min,
            max,
            currency: currency.into(),
        }
    }
}

/// A single scheduled performance
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier; the event's identity
    pub id: EventId,
    /// Performing artist
    pub artist_name: String,
    /// Venue name
    pub venue: String,
    /// City of the venue
    pub city: String,
    /// Display date, e.g. `"Sat, Nov 12"`
    pub date: String,
    /// Display time, e.g. `"8:00 PM"`
    pub time: String,
    /// Price band
    pub price: PriceRange,
    /// Opaque image reference; never interpreted
    pub image: String,
    /// Sales status
    pub status: EventStatus,
}

/// An artist profile with their upcoming shows
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    /// Unique identifier
    pub id: ArtistId,
    /// Artist name
    pub name: String,
    /// Opaque image reference
    pub image: String,
    /// Display listener count, e.g. `"2.4M"`
    pub listeners: String,
    /// Whether the artist is currently touring
    pub is_touring: bool,
    /// Upcoming shows, ordered by the catalog
    pub upcoming_shows: Vec<Event>,
}

/// Priced admission category chosen during checkout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    /// VIP pit, priced at the top of the band
    Vip,
    /// General admission
    GeneralAdmission,
    /// Upper balcony
    UpperBalcony,
}

impl Section {
    /// Price of this section within an event's price band
    ///
    /// VIP sells at the top of the band, everything else at the bottom.
    #[must_use]
    pub const fn price_for(self, price: &PriceRange) -> i64 {
        match self {
            Self::Vip => price.max,
            Self::GeneralAdmission | Self::UpperBalcony => price.min,
        }
    }

    /// Display label as shown on the seat map
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vip => "VIP PIT",
            Self::GeneralAdmission => "GENERAL ADMISSION",
            Self::UpperBalcony => "UPPER BALCONY",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Fixed fee schedule applied to every purchase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fees {
    /// Service fee
    pub service: i64,
    /// Platform booking fee
    pub platform: i64,
}

impl Fees {
    /// Standard service fee in currency units
    pub const SERVICE: i64 = 200;
    /// Standard platform booking fee in currency units
    pub const PLATFORM: i64 = 50;

    /// Combined fees added to every ticket
    #[must_use]
    pub const fn total(self) -> i64 {
        self.service + self.platform
    }
}

impl Default for Fees {
    fn default() -> Self {
        Self {
            service: Self::SERVICE,
            platform: Self::PLATFORM,
        }
    }
}

/// Seat label placeholder shown in the wallet
///
/// No real seat allocation exists; every ticket renders the same label.
pub const PLACEHOLDER_SEAT_LABEL: &str = "Row 4 · Seat 12";

/// Immutable proof of purchase, issued once per confirmed checkout
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique ticket identifier
    pub id: TicketId,
    /// Event this ticket admits to
    pub event_id: EventId,
    /// Purchase attempt that produced this ticket
    pub purchase_id: PurchaseId,
    /// Admission section
    pub section: Section,
    /// Display-only seat label
    pub seat_label: String,
    /// Opaque entry credential; rendered as a QR code, never parsed
    pub qr_payload: String,
    /// When the purchase was confirmed
    pub purchased_at: DateTime<Utc>,
}

impl Ticket {
    /// Issues a new ticket for a confirmed purchase
    #[must_use]
    pub fn issue(
        event_id: EventId,
        purchase_id: PurchaseId,
        section: Section,
        purchased_at: DateTime<Utc>,
    ) -> Self {
        let id = TicketId::new();
        let qr_payload = format!("sgp-{}", id.as_uuid().simple());
        Self {
            id,
            event_id,
            purchase_id,
            section,
            seat_label: PLACEHOLDER_SEAT_LABEL.to_string(),
            qr_payload,
            purchased_at,
        }
    }
}
