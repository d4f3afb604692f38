//! Shared record types for the scraping pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel stored when a field's markup node is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// Fields extracted from a single listing-page event card.
///
/// The roster and canonical instant are filled in later by the pipeline;
/// everything here comes from one pass over the card container.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EventSummary {
    pub title: String,
    /// Cleaned date text as displayed on the card, e.g. "Sat, Jun 14 , 7:00 PM EDT".
    pub raw_date_text: String,
    /// Relative event page path, e.g. "/event/ufc-319". Primary key in the store.
    pub event_url: String,
    /// Category tag derived from the URL path segment, truncated to 15 chars.
    pub event_type: String,
    pub venue: String,
    pub location: String,
}

/// A fully assembled event, ready for upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub title: String,
    pub raw_date_text: String,
    /// Timezone-aware instant parsed from `raw_date_text`; `None` keeps the
    /// record storable but excludes it from upcoming queries.
    pub canonical_instant: Option<DateTime<Utc>>,
    pub event_url: String,
    pub event_type: String,
    /// Pairings in document order, `"red_fighter vs blue_fighter"`.
    pub fighter_roster: Vec<String>,
    pub venue: String,
    pub location: String,
}

impl EventRecord {
    /// Assemble a record from its summary plus resolved roster and instant.
    pub fn assemble(
        summary: EventSummary,
        fighter_roster: Vec<String>,
        canonical_instant: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            title: summary.title,
            raw_date_text: summary.raw_date_text,
            canonical_instant,
            event_url: summary.event_url,
            event_type: summary.event_type,
            fighter_roster,
            venue: summary.venue,
            location: summary.location,
        }
    }
}

/// A row read back from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEvent {
    pub title: String,
    pub raw_date_text: String,
    pub canonical_instant: Option<DateTime<Utc>>,
    pub event_url: String,
    pub event_type: String,
    pub fighter_roster: Vec<String>,
    pub venue: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-run outcome counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Candidate cards found on the listing page.
    pub discovered: usize,
    /// Records successfully upserted.
    pub stored: usize,
    /// Records dropped by a per-record failure.
    pub failed: usize,
}
