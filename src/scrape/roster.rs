//! Fight roster parser for event detail pages.
//!
//! Each bout is a `c-listing-fight__names-row` block holding a red-corner
//! and a blue-corner name link. Fighter tokens come from the link target,
//! not the display text, so they are stable across display tweaks.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::scrape::BASE_URL;

/// Athlete profile URL prefix stripped from corner links.
const ATHLETE_PREFIX: &str = "https://www.ufc.com/athlete/";

/// Parser for event detail pages
pub struct RosterParser;

impl RosterParser {
    /// Extract `"red vs blue"` pairings in document order.
    ///
    /// A block missing either corner's link is a tolerated omission and is
    /// skipped silently; the enclosing event is unaffected.
    pub fn parse(html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let row_selector = Selector::parse("div.c-listing-fight__names-row").unwrap();
        let red_selector =
            Selector::parse("div.c-listing-fight__corner-name--red a[href]").unwrap();
        let blue_selector =
            Selector::parse("div.c-listing-fight__corner-name--blue a[href]").unwrap();

        let mut roster = Vec::new();
        for row in document.select(&row_selector) {
            let red = fighter_token(&row, &red_selector);
            let blue = fighter_token(&row, &blue_selector);
            match (red, blue) {
                (Some(red), Some(blue)) => roster.push(format!("{red} vs {blue}")),
                _ => debug!("skipping pairing with a missing corner link"),
            }
        }
        roster
    }
}

/// Derive the fighter token from a corner's profile link.
///
/// `https://www.ufc.com/athlete/jon-jones` -> `jon_jones`. Relative athlete
/// links are accepted too.
fn fighter_token(row: &ElementRef, corner: &Selector) -> Option<String> {
    let href = row
        .select(corner)
        .next()
        .and_then(|link| link.value().attr("href"))?;

    let slug = href
        .strip_prefix(ATHLETE_PREFIX)
        .or_else(|| href.strip_prefix(BASE_URL).and_then(|p| p.strip_prefix("/athlete/")))
        .or_else(|| href.strip_prefix("/athlete/"))
        .unwrap_or(href);

    let token = slug.replace('-', "_");
    if token.is_empty() { None } else { Some(token) }
}
