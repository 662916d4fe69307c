//! Opaque keyset pagination cursors.
//!
//! A cursor records the position of the last entry on a page together with
//! the shape of the query that produced it. Decoding against a different
//! shape fails, so a cursor copied from the archive cannot be replayed on the
//! home page with another page size.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CursorError {
    #[error("invalid cursor: {0}")]
    Malformed(String),
    #[error("cursor belongs to a different query")]
    ShapeMismatch,
}

/// Filter and page size of a listing query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryShape {
    pub filter: ListingFilter,
    pub limit: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ListingFilter {
    /// All non-hidden entries.
    Visible,
}

impl QueryShape {
    pub fn visible(limit: i64) -> Self {
        Self {
            filter: ListingFilter::Visible,
            limit,
        }
    }
}

/// Position in the `published DESC, id DESC` ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPosition {
    pub published: DateTime<Utc>,
    pub id: i64,
}

#[derive(Serialize, Deserialize)]
struct CursorPayload {
    shape: QueryShape,
    position: EntryPosition,
}

/// Encodes a position for `shape` as an opaque, URL-safe token.
pub fn encode(shape: &QueryShape, position: EntryPosition) -> String {
    let payload = CursorPayload {
        shape: shape.clone(),
        position,
    };
    // Serializing plain data into a Vec cannot fail.
    let bytes = serde_json::to_vec(&payload).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes a token, checking that it was produced for `shape`.
pub fn decode(token: &str, shape: &QueryShape) -> Result<EntryPosition, CursorError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| CursorError::Malformed(e.to_string()))?;
    let payload: CursorPayload =
        serde_json::from_slice(&bytes).map_err(|e| CursorError::Malformed(e.to_string()))?;

    if &payload.shape != shape {
        return Err(CursorError::ShapeMismatch);
    }

    Ok(payload.position)
}
