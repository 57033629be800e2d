//! CSS selectors for listing-page HTML parsing.
//!
//! Tokopedia ships hashed utility class names, so these break whenever
//! the frontend is redeployed. Update this file when parsing fails.
//!
//! **Update process**: capture an HTML sample, update selectors, and
//! add a test fixture.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for paginated catalog listing pages.
pub mod listing {
    use super::*;

    /// Product card anchor - one per catalog item.
    pub static CARD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a.css-54k5sq").unwrap());

    /// Product name inside a card.
    pub static NAME: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.css-20kt3o").unwrap());

    /// Displayed price inside a card.
    pub static PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.css-o5uqvq").unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_selectors_compile() {
        let _ = &*listing::CARD;
        let _ = &*listing::NAME;
        let _ = &*listing::PRICE;
    }

    #[test]
    fn test_card_selector_matching() {
        let html = Html::parse_document(
            r#"<div>
                <a class="css-54k5sq" href="https://www.tokopedia.com/toko/item">
                    <span class="css-20kt3o">Blender Mini</span>
                    <span class="css-o5uqvq">Rp150.000</span>
                </a>
                <a class="other" href="/elsewhere">not a card</a>
            </div>"#,
        );

        let cards: Vec<_> = html.select(&listing::CARD).collect();
        assert_eq!(cards.len(), 1);

        let name: String = cards[0].select(&listing::NAME).next().unwrap().text().collect();
        assert_eq!(name, "Blender Mini");
    }
}
