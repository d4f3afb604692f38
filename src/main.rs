//! UFC events scraper.
//!
//! Fetches the upcoming-events listing from ufc.com, resolves each event's
//! fight roster, normalizes the date text, and upserts everything into a
//! local SQLite store. Runs once per invocation.

mod config;
mod error;
mod fetch;
mod normalize;
mod pipeline;
mod retry;
mod scrape;
mod storage;
mod types;

use anyhow::Context;
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::fetch::HttpFetcher;
use crate::pipeline::RunContext;
use crate::storage::EventRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ufc_events=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("configuration")?;
    tracing::info!(
        db = %config.db_path.display(),
        listing = %config.listing_url,
        timezone = %config.reference_timezone,
        "configuration loaded"
    );

    let fetcher = HttpFetcher::new(config.fetch_timeout).context("building HTTP client")?;
    let repo = EventRepository::open(&config.db_path).context("opening event store")?;

    let ctx = RunContext {
        fetcher: &fetcher,
        repo: &repo,
        listing_url: &config.listing_url,
        reference_timezone: config.reference_timezone,
        roster_delay: config.roster_delay,
        now: Utc::now(),
    };

    let summary = pipeline::run(&ctx).await?;
    tracing::info!(
        discovered = summary.discovered,
        stored = summary.stored,
        failed = summary.failed,
        total_events = repo.event_count().context("counting stored events")?,
        "scrape finished"
    );

    Ok(())
}
