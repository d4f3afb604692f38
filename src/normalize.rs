//! Pure text normalization: date cleanup and parsing, event-type derivation.
//!
//! Kept free of HTML traversal so every known input variant can be unit
//! tested directly.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;

use crate::error::ParseFailure;

/// Maximum length of the derived event-type tag.
///
/// Truncation can collide distinct categories ("ufc-fight-night-x" variants
/// all become "ufc_fight_night"); kept as-is for compatibility with existing
/// stored tags.
pub const EVENT_TYPE_MAX_LEN: usize = 15;

/// Clean a card's raw date text the way the listing displays it.
///
/// Strips the trailing "/ Main Card" label and replaces the remaining `/`
/// separators with commas, e.g.
/// `"Sat, Jun 14 / 7:00 PM EDT / Main Card"` -> `"Sat, Jun 14 , 7:00 PM EDT"`.
pub fn clean_date_text(raw: &str) -> String {
    raw.replace("/ Main Card", "").replace('/', ",").trim().to_string()
}

/// Derive the bounded category tag from an event URL path.
///
/// Takes the path segment at index 2 (`/event/ufc-319` -> `ufc-319`),
/// replaces `-` with `_` and truncates to [`EVENT_TYPE_MAX_LEN`] characters.
pub fn derive_event_type(event_url: &str) -> String {
    let segment = event_url.split('/').nth(2).unwrap_or_default();
    let tag = segment.replace('-', "_");
    tag.chars().take(EVENT_TYPE_MAX_LEN).collect()
}

/// Parse cleaned date text into a timezone-aware instant.
///
/// The text may carry a trailing abbreviated zone token (EDT, EST, ...); all
/// such tokens collapse to `reference_tz`, since the origin's markup uses
/// EDT/EST interchangeably for the same logical zone. Zone-less text is also
/// interpreted in `reference_tz`. The year is absent from the markup and is
/// taken from `now` in the reference zone.
pub fn normalize_date(
    raw: &str,
    reference_tz: Tz,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, ParseFailure> {
    let fail = || ParseFailure::Date(raw.to_string());

    // Collapse whitespace runs and tighten space-before-comma artifacts left
    // by the separator replacement.
    let cleaned = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let cleaned = cleaned.replace(" ,", ",");

    let stripped = strip_zone_abbrev(&cleaned);

    // Drop the leading weekday token; the markup's weekday is display-only
    // and need not agree with the inferred year.
    let weekday_re = Regex::new(r"^[A-Za-z]{3,9},\s*").unwrap();
    let body = weekday_re.replace(&stripped, "").trim().to_string();
    if body.is_empty() {
        return Err(fail());
    }

    let year = now.with_timezone(&reference_tz).year();
    let dated = format!("{body} {year}");

    let naive = parse_candidates(&dated).ok_or_else(&fail)?;

    reference_tz
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(&fail)
}

/// Remove a recognized trailing timezone abbreviation, if any.
fn strip_zone_abbrev(text: &str) -> String {
    const ZONE_ABBREVS: [&str; 11] = [
        "EDT", "EST", "ET", "CDT", "CST", "MDT", "MST", "PDT", "PST", "UTC", "GMT",
    ];
    if let Some((head, tail)) = text.rsplit_once(' ') {
        if ZONE_ABBREVS.contains(&tail) {
            return head.trim().to_string();
        }
    }
    text.to_string()
}

/// Try the known date-text shapes, with and without a time component.
fn parse_candidates(dated: &str) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: [&str; 2] = ["%b %d, %I:%M %p %Y", "%b %d %I:%M %p %Y"];
    const DATE_FORMATS: [&str; 2] = ["%b %d %Y", "%b %d, %Y"];

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(dated, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(dated, format) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;

    fn june_2025() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_clean_date_text_strips_main_card_suffix() {
        assert_eq!(
            clean_date_text("Sat, Jun 14 / 7:00 PM EDT / Main Card"),
            "Sat, Jun 14 , 7:00 PM EDT"
        );
    }

    #[test]
    fn test_clean_date_text_without_suffix() {
        assert_eq!(
            clean_date_text("Sat, Aug 16 / 10:00 PM EDT"),
            "Sat, Aug 16 , 10:00 PM EDT"
        );
    }

    #[test]
    fn test_derive_event_type_truncates() {
        assert_eq!(derive_event_type("/event/ufc-319"), "ufc_319");
        // Long slugs truncate to 15 chars, colliding variants.
        assert_eq!(
            derive_event_type("/event/ufc-fight-night-june-14-2025"),
            "ufc_fight_night"
        );
    }

    #[test]
    fn test_derive_event_type_short_path() {
        assert_eq!(derive_event_type("/event"), "");
    }

    #[test]
    fn test_normalize_full_datetime() {
        let instant = normalize_date("Sat, Jun 14 , 7:00 PM EDT", New_York, june_2025()).unwrap();
        // 7 PM Eastern in June is 23:00 UTC.
        assert_eq!(instant, Utc.with_ymd_and_hms(2025, 6, 14, 23, 0, 0).unwrap());
    }

    #[test]
    fn test_edt_and_est_collapse_to_reference_zone() {
        let now = june_2025();
        let edt = normalize_date("Sat, Jun 14 , 7:00 PM EDT", New_York, now).unwrap();
        let est = normalize_date("Sat, Jun 14 , 7:00 PM EST", New_York, now).unwrap();
        assert_eq!(edt, est);
    }

    #[test]
    fn test_zone_less_text_gets_reference_zone() {
        let with_zone = normalize_date("Sat, Jun 14 , 7:00 PM EDT", New_York, june_2025()).unwrap();
        let without = normalize_date("Sat, Jun 14 , 7:00 PM", New_York, june_2025()).unwrap();
        assert_eq!(with_zone, without);
    }

    #[test]
    fn test_date_only_parses_to_midnight() {
        let instant = normalize_date("Sat, Jun 14", New_York, june_2025()).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2025, 6, 14, 4, 0, 0).unwrap());
    }

    #[test]
    fn test_garbage_fails() {
        assert!(normalize_date("TBD", New_York, june_2025()).is_err());
        assert!(normalize_date("", New_York, june_2025()).is_err());
        assert!(normalize_date("N/A", New_York, june_2025()).is_err());
    }

    #[test]
    fn test_reference_zone_is_respected() {
        let ny = normalize_date("Sat, Jun 14 , 7:00 PM EDT", New_York, june_2025()).unwrap();
        let la = normalize_date(
            "Sat, Jun 14 , 7:00 PM EDT",
            chrono_tz::America::Los_Angeles,
            june_2025(),
        )
        .unwrap();
        // Same wall clock, three hours apart on the absolute timeline.
        assert_eq!(la - ny, chrono::Duration::hours(3));
    }
}
