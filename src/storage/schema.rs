//! SQLite schema for scraped events.
//!
//! One table, keyed by the event page URL. Creation is idempotent and never
//! drops existing rows; a run against an existing database only updates the
//! rows it re-scrapes.

use rusqlite::{Connection, Result};

/// Create the events table and its indexes if absent.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            event_url TEXT PRIMARY KEY,
            event_title TEXT NOT NULL,
            event_date TEXT NOT NULL,
            event_instant TEXT,
            event_type TEXT NOT NULL,
            event_all_fighters TEXT NOT NULL,
            event_venue TEXT NOT NULL,
            event_location TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_date ON events(event_date)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_type ON events(event_type)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_instant ON events(event_instant)",
        [],
    )?;

    Ok(())
}
