//! Repository for idempotent event upserts and time-bounded queries.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection};

use super::schema::create_tables;
use crate::error::StoreError;
use crate::types::{EventRecord, StoredEvent};

/// Event store handle, scoped to one run.
pub struct EventRepository {
    conn: Connection,
}

impl EventRepository {
    /// Open the database file, creating parent directories if needed.
    ///
    /// Does not touch the schema; call [`EventRepository::ensure_schema`]
    /// before writing.
    pub fn open(db_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(db_path)?;
        Ok(Self { conn })
    }

    /// Create an in-memory repository (for testing)
    #[cfg(test)]
    pub fn in_memory() -> Result<Self, StoreError> {
        let repo = Self {
            conn: Connection::open_in_memory()?,
        };
        repo.ensure_schema()?;
        Ok(repo)
    }

    /// Idempotent create-if-absent of the events table. Never drops data.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        create_tables(&self.conn)?;
        Ok(())
    }

    /// Insert the record or overwrite every non-key column of the existing
    /// row. `updated_at` is refreshed on every call; `created_at` is set on
    /// first insert only. A single statement, atomic per call.
    pub fn upsert(&self, record: &EventRecord) -> Result<(), StoreError> {
        let roster_json = serde_json::to_string(&record.fighter_roster)?;
        let instant = record.canonical_instant.map(format_instant);
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        self.conn.execute(
            r#"
            INSERT INTO events
            (event_url, event_title, event_date, event_instant, event_type,
             event_all_fighters, event_venue, event_location, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
            ON CONFLICT(event_url) DO UPDATE SET
                event_title = excluded.event_title,
                event_date = excluded.event_date,
                event_instant = excluded.event_instant,
                event_type = excluded.event_type,
                event_all_fighters = excluded.event_all_fighters,
                event_venue = excluded.event_venue,
                event_location = excluded.event_location,
                updated_at = excluded.updated_at
            "#,
            params![
                record.event_url,
                record.title,
                record.raw_date_text,
                instant,
                record.event_type,
                roster_json,
                record.venue,
                record.location,
                now,
            ],
        )?;
        Ok(())
    }

    /// Events with a parseable instant at or after `now`, earliest first,
    /// capped at `limit`. Ties order by `event_url` so one query call is
    /// stable.
    pub fn query_upcoming(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<StoredEvent>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT event_url, event_title, event_date, event_instant, event_type,
                   event_all_fighters, event_venue, event_location, created_at, updated_at
            FROM events
            WHERE event_instant IS NOT NULL AND event_instant >= ?1
            ORDER BY event_instant ASC, event_url ASC
            LIMIT ?2
            "#,
        )?;

        let rows = stmt
            .query_map(params![format_instant(now), limit as i64], row_to_event)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Look up one event by its URL key.
    pub fn get(&self, event_url: &str) -> Result<Option<StoredEvent>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT event_url, event_title, event_date, event_instant, event_type,
                   event_all_fighters, event_venue, event_location, created_at, updated_at
            FROM events
            WHERE event_url = ?1
            "#,
        )?;

        let mut rows = stmt
            .query_map([event_url], row_to_event)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows.pop())
    }

    /// Total stored events.
    pub fn event_count(&self) -> Result<i64, StoreError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
        Ok(count)
    }
}

/// Canonical instants are stored as second-precision RFC 3339 UTC text, which
/// orders lexicographically.
fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn row_to_event(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredEvent> {
    let instant_text: Option<String> = row.get(3)?;
    let roster_json: String = row.get(5)?;
    let created_text: String = row.get(8)?;
    let updated_text: String = row.get(9)?;

    Ok(StoredEvent {
        event_url: row.get(0)?,
        title: row.get(1)?,
        raw_date_text: row.get(2)?,
        canonical_instant: match instant_text {
            Some(text) => Some(parse_timestamp(3, &text)?),
            None => None,
        },
        event_type: row.get(4)?,
        fighter_roster: serde_json::from_str(&roster_json).unwrap_or_default(),
        venue: row.get(6)?,
        location: row.get(7)?,
        created_at: parse_timestamp(8, &created_text)?,
        updated_at: parse_timestamp(9, &updated_text)?,
    })
}

fn parse_timestamp(column: usize, text: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}
