//! Run orchestration: listing fetch, per-record extraction, storage, query.
//!
//! One run is sequential per record so the politeness delay between detail
//! fetches is respected. A per-record failure is logged and counted; only a
//! listing-fetch or schema failure aborts the run.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::error::RunError;
use crate::fetch::Fetch;
use crate::normalize::normalize_date;
use crate::scrape::{event_page_url, ListingParser, RosterParser, MAX_EVENTS_PER_RUN};
use crate::storage::EventRepository;
use crate::types::{EventRecord, EventSummary, RunSummary};

/// Everything a run needs; owned by the caller, released when the run ends.
pub struct RunContext<'a, F: Fetch> {
    pub fetcher: &'a F,
    pub repo: &'a EventRepository,
    pub listing_url: &'a str,
    pub reference_timezone: Tz,
    pub roster_delay: Duration,
    /// Reference instant for year inference and the upcoming query.
    pub now: DateTime<Utc>,
}

/// Execute one scraping run.
pub async fn run<F: Fetch>(ctx: &RunContext<'_, F>) -> Result<RunSummary, RunError> {
    ctx.repo.ensure_schema()?;
    info!("schema ready");

    info!(url = ctx.listing_url, "fetching listing page");
    let listing_html = ctx.fetcher.fetch(ctx.listing_url).await?;
    info!(bytes = listing_html.len(), "listing page fetched");

    let summaries = ListingParser::parse(&listing_html);
    let mut summary = RunSummary {
        discovered: summaries.len(),
        ..Default::default()
    };
    info!(discovered = summary.discovered, "extracted listing cards");

    for event in summaries {
        let event_url = event.event_url.clone();
        match process_record(ctx, event).await {
            Ok(()) => summary.stored += 1,
            Err(e) => {
                error!(%event_url, "record failed: {e}");
                summary.failed += 1;
            }
        }
    }

    match ctx.repo.query_upcoming(ctx.now, MAX_EVENTS_PER_RUN) {
        Ok(upcoming) => {
            for event in &upcoming {
                info!(
                    event_url = %event.event_url,
                    date = %event.raw_date_text,
                    "upcoming: {}",
                    event.title
                );
            }
        }
        Err(e) => warn!("upcoming query failed: {e}"),
    }

    info!(
        discovered = summary.discovered,
        stored = summary.stored,
        failed = summary.failed,
        "run complete"
    );
    Ok(summary)
}

/// Resolve, normalize and store one listing card.
async fn process_record<F: Fetch>(
    ctx: &RunContext<'_, F>,
    event: EventSummary,
) -> Result<(), crate::error::StoreError> {
    let roster = resolve_roster(ctx, &event.event_url).await;

    let instant = match normalize_date(&event.raw_date_text, ctx.reference_timezone, ctx.now) {
        Ok(instant) => Some(instant),
        Err(e) => {
            // Still stored, just invisible to upcoming queries.
            warn!(event_url = %event.event_url, "{e}");
            None
        }
    };

    let record = EventRecord::assemble(event, roster, instant);
    ctx.repo.upsert(&record)?;
    info!(
        event_url = %record.event_url,
        fights = record.fighter_roster.len(),
        "stored event"
    );
    Ok(())
}

/// Fetch an event's detail page and extract its fight pairings.
///
/// A failed fetch degrades to an empty roster; the event is stored anyway.
async fn resolve_roster<F: Fetch>(ctx: &RunContext<'_, F>, event_url: &str) -> Vec<String> {
    // Politeness pause before hitting the origin again.
    tokio::time::sleep(ctx.roster_delay).await;

    let url = event_page_url(event_url);
    match ctx.fetcher.fetch(&url).await {
        Ok(html) => RosterParser::parse(&html),
        Err(e) => {
            warn!(event_url, "roster fetch failed, storing empty roster: {e}");
            Vec::new()
        }
    }
}
