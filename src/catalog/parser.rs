//! HTML parser for catalog listing pages.

use crate::catalog::fields::parse_price;
use crate::catalog::models::{Field, ListingPage, ListingRecord, UNKNOWN};
use crate::catalog::resolve::resolve_tracking_link;
use crate::catalog::selectors::listing;
use scraper::{ElementRef, Html};
use tracing::{debug, trace, warn};

/// Parses one listing page's markup into records.
///
/// A page with zero product cards is terminal: the catalog is assumed
/// sequential, so the caller stops requesting further pages.
pub fn parse_listing(html: &str) -> ListingPage {
    let document = Html::parse_document(html);

    let mut records = Vec::new();

    for card in document.select(&listing::CARD) {
        match parse_card(card) {
            Some(record) => {
                trace!("Parsed card: {} - {}", record.name, record.product_url);
                records.push(record);
            }
            None => warn!("Skipping product card without href"),
        }
    }

    let terminal = records.is_empty();
    debug!("Parsed {} products (terminal: {})", records.len(), terminal);

    ListingPage { records, terminal }
}

/// Parses a single product card anchor.
///
/// Returns `None` only for a card without an href; a missing name or
/// price degrades to the unknown sentinel instead.
fn parse_card(card: ElementRef) -> Option<ListingRecord> {
    let raw_link = card.value().attr("href")?;

    let product_url = match resolve_tracking_link(raw_link) {
        Ok(url) => url,
        Err(e) => {
            // Recoverable: keep the raw link rather than dropping the item.
            warn!("{}, keeping raw link", e);
            raw_link.to_string()
        }
    };

    let name = card
        .select(&listing::NAME)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let price = card
        .select(&listing::PRICE)
        .next()
        .map(|e| parse_price(&e.text().collect::<String>()))
        .unwrap_or(Field::Unknown);

    Some(ListingRecord { name, price, product_url })
}
