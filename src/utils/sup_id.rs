//! Simple Update Protocol identifiers.
//!
//! A SUP id is a short, stable digest of the feed URL. Aggregators poll the
//! SUP document and re-fetch only feeds whose id shows up there.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest.
const SUP_ID_LEN: usize = 10;

/// Returns the SUP id of an absolute feed URL.
pub fn sup_id(feed_url: &str) -> String {
    let digest = Sha256::digest(feed_url.as_bytes());
    let mut id = hex::encode(digest);
    id.truncate(SUP_ID_LEN);
    id
}

/// Builds the `X-SUP-ID` header value: `<sup document url>#<sup id>`.
pub fn sup_header_value(sup_url: &str, feed_url: &str) -> String {
    format!("{}#{}", sup_url, sup_id(feed_url))
}
