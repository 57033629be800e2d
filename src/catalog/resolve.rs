//! Tracking-link resolution.
//!
//! Listing cards link through a click-analytics redirect that wraps the
//! real product URL in an `r` query parameter. The resolver unwraps it
//! so the datasets only ever carry canonical product URLs.

use crate::error::ScrapeError;
use url::Url;

/// Decodes a tracking/indirect link into its canonical destination.
///
/// If the link carries an `r` query parameter, that parameter's value
/// (already percent-decoded by the query parser) is returned verbatim.
/// A link without one is assumed to be direct and is returned
/// unchanged. A link that does not parse as a URL at all is a
/// `MalformedUrl`; callers fall back to the raw input.
pub fn resolve_tracking_link(raw_link: &str) -> Result<String, ScrapeError> {
    let parsed =
        Url::parse(raw_link).map_err(|_| ScrapeError::MalformedUrl(raw_link.to_string()))?;

    match parsed.query_pairs().find(|(key, _)| key == "r") {
        Some((_, destination)) => Ok(destination.into_owned()),
        None => Ok(raw_link.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_tracking_link_with_r_param() {
        let tracking = "https://ta.tokopedia.com/promo?r=https%3A%2F%2Fwww.tokopedia.com%2Ftoko%2Fproduk-a&src=topads";
        let resolved = resolve_tracking_link(tracking).unwrap();
        assert_eq!(resolved, "https://www.tokopedia.com/toko/produk-a");
    }

    #[test]
    fn test_resolve_direct_link_unchanged() {
        let direct = "https://www.tokopedia.com/toko/produk-b";
        assert_eq!(resolve_tracking_link(direct).unwrap(), direct);
    }

    #[test]
    fn test_resolve_direct_link_with_other_params_unchanged() {
        let direct = "https://www.tokopedia.com/toko/produk-b?src=search&page=2";
        assert_eq!(resolve_tracking_link(direct).unwrap(), direct);
    }

    #[test]
    fn test_resolve_first_r_param_wins() {
        let tracking = "https://ta.tokopedia.com/x?r=https%3A%2F%2Ffirst.example&r=https%3A%2F%2Fsecond.example";
        assert_eq!(resolve_tracking_link(tracking).unwrap(), "https://first.example");
    }

    #[test]
    fn test_resolve_malformed_is_error() {
        let result = resolve_tracking_link("not a url at all");
        assert!(matches!(result, Err(ScrapeError::MalformedUrl(_))));
    }

    #[test]
    fn test_resolve_relative_href_is_error() {
        // Relative hrefs have no scheme and cannot be parsed standalone.
        let result = resolve_tracking_link("/toko/produk-c");
        assert!(matches!(result, Err(ScrapeError::MalformedUrl(_))));
    }
}
