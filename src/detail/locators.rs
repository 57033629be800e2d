//! CSS locators for rendered product detail pages.
//!
//! Same caveat as the listing selectors: these are hashed utility
//! classes and testid hooks that drift with frontend redeploys. The
//! seller chain is ordered most-specific first; candidates are tried in
//! declared order and the first hit wins.

/// Sold-count paragraph inside the product content block.
pub const STOCK_SOLD: &str =
    "#pdp_comp-product_content > div > div.css-bczdt6 > div > p:nth-child(1)";

/// Seller-name candidates, in fallback order.
pub const SELLER_NAME_CHAIN: &[&str] = &[
    "h2.css-1wdzqxj-unf-heading",
    "#pdp_comp-shop_credibility > div.css-1mxqisk > div.css-3v9jg2 > div.css-i9gxme > div > a > h2",
    "a[data-testid='llbPDPFooterShopName']",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seller_chain_order() {
        assert_eq!(SELLER_NAME_CHAIN.len(), 3);
        assert!(SELLER_NAME_CHAIN[0].starts_with("h2."));
        assert!(SELLER_NAME_CHAIN[2].contains("data-testid"));
    }
}
