//! HTML extraction for ufc.com listing and event-detail pages.

pub mod listing;
pub mod roster;

pub use listing::ListingParser;
pub use roster::RosterParser;

/// Base URL for ufc.com
pub const BASE_URL: &str = "https://www.ufc.com";

/// Listing cards processed per run, a deliberate cap.
pub const MAX_EVENTS_PER_RUN: usize = 8;

/// Build the absolute event page URL from the listing's relative href.
pub fn event_page_url(event_url: &str) -> String {
    format!("{}{}", BASE_URL, event_url)
}
