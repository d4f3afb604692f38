//! Listing page parser for www.ufc.com/events.
//!
//! Each upcoming event is one `c-card-event--result` card. All four fields
//! (title/href, date text, venue, location) are read relative to the card
//! container, so a card missing one field degrades that field alone instead
//! of shifting every later event's data by one position.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::error::ParseFailure;
use crate::normalize::{clean_date_text, derive_event_type};
use crate::scrape::MAX_EVENTS_PER_RUN;
use crate::types::{EventSummary, NOT_AVAILABLE};

/// Parser for the events listing page
pub struct ListingParser;

impl ListingParser {
    /// Parse the listing HTML into at most [`MAX_EVENTS_PER_RUN`] summaries.
    ///
    /// Cards without a title link have no stable key and are skipped.
    pub fn parse(html: &str) -> Vec<EventSummary> {
        let document = Html::parse_document(html);
        let card_selector = Selector::parse("div.c-card-event--result").unwrap();

        let mut summaries = Vec::new();
        for card in document.select(&card_selector) {
            if summaries.len() >= MAX_EVENTS_PER_RUN {
                break;
            }
            match Self::parse_card(&card) {
                Ok(summary) => summaries.push(summary),
                Err(e) => warn!("skipping listing card: {e}"),
            }
        }
        summaries
    }

    fn parse_card(card: &ElementRef) -> Result<EventSummary, ParseFailure> {
        let title_selector = Selector::parse("h3.c-card-event--result__headline a").unwrap();
        let date_selector = Selector::parse("div.c-card-event--result__date a").unwrap();
        let venue_selector = Selector::parse("div.field--name-taxonomy-term-title h5").unwrap();
        let location_selector = Selector::parse("div.field--name-location span").unwrap();

        let title_link = card
            .select(&title_selector)
            .next()
            .ok_or(ParseFailure::MissingNode("card title link"))?;
        let event_url = title_link
            .value()
            .attr("href")
            .map(|href| href.trim().to_string())
            .filter(|href| !href.is_empty())
            .ok_or(ParseFailure::MissingNode("title link href"))?;

        let title = text_of(&title_link);
        if title.is_empty() {
            return Err(ParseFailure::MissingNode("title text"));
        }

        let raw_date_text = card
            .select(&date_selector)
            .next()
            .map(|node| clean_date_text(&text_of(&node)))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let venue = field_or_sentinel(card, &venue_selector);
        let location = field_or_sentinel(card, &location_selector);
        let event_type = derive_event_type(&event_url);

        Ok(EventSummary {
            title,
            raw_date_text,
            event_url,
            event_type,
            venue,
            location,
        })
    }
}

fn text_of(node: &ElementRef) -> String {
    node.text().collect::<String>().trim().to_string()
}

fn field_or_sentinel(card: &ElementRef, selector: &Selector) -> String {
    card.select(selector)
        .next()
        .map(|node| text_of(&node))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(n: u32, venue: bool, location: bool) -> String {
        let venue_html = if venue {
            "<div class=\"field--name-taxonomy-term-title\"><h5>T-Mobile Arena</h5></div>"
        } else {
            ""
        };
        let location_html = if location {
            "<div class=\"field--name-location\"><span>Las Vegas, NV</span></div>"
        } else {
            ""
        };
        format!(
            r#"<div class="c-card-event--result">
                 <h3 class="c-card-event--result__headline">
                   <a href="/event/ufc-{n}">Fighter A vs Fighter B {n}</a>
                 </h3>
                 <div class="c-card-event--result__date">
                   <a href="/event/ufc-{n}#date">Sat, Jun 14 / 7:00 PM EDT / Main Card</a>
                 </div>
                 {venue_html}
                 {location_html}
               </div>"#
        )
    }

    fn page(cards: &[String]) -> String {
        format!("<html><body>{}</body></html>", cards.join("\n"))
    }

    #[test]
    fn test_parse_complete_cards() {
        let html = page(&[card(100, true, true), card(101, true, true)]);
        let summaries = ListingParser::parse(&html);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].event_url, "/event/ufc-100");
        assert_eq!(summaries[0].title, "Fighter A vs Fighter B 100");
        assert_eq!(summaries[0].raw_date_text, "Sat, Jun 14 , 7:00 PM EDT");
        assert_eq!(summaries[0].event_type, "ufc_100");
        assert_eq!(summaries[0].venue, "T-Mobile Arena");
        assert_eq!(summaries[0].location, "Las Vegas, NV");
        assert_eq!(summaries[1].event_url, "/event/ufc-101");
    }

    #[test]
    fn test_missing_venue_and_location_degrade_to_sentinel() {
        let html = page(&[card(100, false, false)]);
        let summaries = ListingParser::parse(&html);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].venue, NOT_AVAILABLE);
        assert_eq!(summaries[0].location, NOT_AVAILABLE);
        // The rest of the card is unaffected.
        assert_eq!(summaries[0].event_url, "/event/ufc-100");
    }

    #[test]
    fn test_missing_date_degrades_to_sentinel() {
        let html = page(&[r#"<div class="c-card-event--result">
              <h3 class="c-card-event--result__headline"><a href="/event/ufc-1">UFC 1</a></h3>
            </div>"#
            .to_string()]);
        let summaries = ListingParser::parse(&html);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].raw_date_text, NOT_AVAILABLE);
    }

    #[test]
    fn test_card_without_title_link_is_skipped() {
        let broken = r##"<div class="c-card-event--result">
              <div class="c-card-event--result__date"><a href="#">Sat, Jun 14</a></div>
            </div>"##
            .to_string();
        let html = page(&[broken, card(2, true, true)]);
        let summaries = ListingParser::parse(&html);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].event_url, "/event/ufc-2");
    }

    #[test]
    fn test_caps_at_eight_cards() {
        let cards: Vec<String> = (0..12).map(|n| card(n, true, true)).collect();
        let summaries = ListingParser::parse(&page(&cards));

        assert_eq!(summaries.len(), MAX_EVENTS_PER_RUN);
        assert_eq!(summaries[7].event_url, "/event/ufc-7");
    }

    #[test]
    fn test_empty_page_yields_no_summaries() {
        assert!(ListingParser::parse("<html><body></body></html>").is_empty());
    }
}
