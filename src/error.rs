//! Error taxonomy for the scraping pipeline.
//!
//! Only transport failures stop a stage. Tracking-link decode failures
//! are recovered at the call site with the raw value, and missing page
//! fields never become errors at all (they collapse into the unknown
//! sentinel in the models).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// HTTP-level failure fetching a listing page. Halts pagination
    /// for the run; already-harvested items still get enriched.
    #[error("listing page request failed: {0}")]
    Request(#[from] wreq::Error),

    /// Non-success status fetching a listing page. Same handling as
    /// `Request`: likely exhaustion or blocking, so pagination stops.
    #[error("listing page returned status {0}")]
    Status(u16),

    /// A tracking link that could not be parsed as a URL. The caller
    /// substitutes the raw link and continues.
    #[error("malformed tracking link: {0}")]
    MalformedUrl(String),
}
