//! Response format negotiation for listing pages.

use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};

use crate::config::BlogSettings;
use crate::domain::entities::Entry;
use crate::error::AppError;
use crate::utils::sup_id::sup_header_value;
use crate::web::feed::{FeedMeta, render_atom, render_json};

pub const ATOM_CONTENT_TYPE: &str = "application/atom+xml";
pub const JSON_CONTENT_TYPE: &str = "text/javascript";
pub const SUP_ID_HEADER: &str = "x-sup-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Html,
    Atom,
    Json { pretty: bool },
}

/// Query arguments shared by listing pages.
///
/// `start` is an older spelling of `cursor`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub pretty: Option<String>,
}

impl ListingQuery {
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref().or(self.start.as_deref())
    }

    pub fn response_format(&self) -> ResponseFormat {
        ResponseFormat::from_query(self.format.as_deref(), self.pretty.as_deref())
    }
}

impl ResponseFormat {
    /// `format=atom|json` selects a feed; anything else is HTML. Any non-empty
    /// `pretty` value indents JSON output.
    pub fn from_query(format: Option<&str>, pretty: Option<&str>) -> Self {
        match format {
            Some("atom") => Self::Atom,
            Some("json") => Self::Json {
                pretty: pretty.is_some_and(|p| !p.is_empty()),
            },
            _ => Self::Html,
        }
    }
}

/// Entries and pagination state behind a listing, ready to render as a feed.
pub struct FeedSource<'a> {
    pub entries: &'a [Entry],
    /// `None` for listings without pagination.
    pub cursor: Option<Option<&'a str>>,
    /// Absolute URL of the current request.
    pub self_url: String,
}

/// Renders a non-HTML format, or returns `None` for HTML.
pub fn feed_response(
    format: ResponseFormat,
    source: FeedSource<'_>,
    settings: &BlogSettings,
) -> Result<Option<Response>, AppError> {
    let meta = FeedMeta::from_settings(settings, source.self_url);

    match format {
        ResponseFormat::Html => Ok(None),
        ResponseFormat::Atom => {
            let body = render_atom(source.entries, &meta);
            let mut response = ([(header::CONTENT_TYPE, ATOM_CONTENT_TYPE)], body).into_response();
            attach_sup_header(&mut response, &settings.sup_url, &meta.self_url);
            Ok(Some(response))
        }
        ResponseFormat::Json { pretty } => {
            let body = render_json(source.entries, source.cursor, &meta, pretty).map_err(|e| {
                AppError::internal(
                    "Failed to serialize feed",
                    serde_json::json!({ "reason": e.to_string() }),
                )
            })?;
            Ok(Some(
                ([(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], body).into_response(),
            ))
        }
    }
}

/// Adds `X-SUP-ID` for the absolute URL of the feed being served.
pub fn attach_sup_header(response: &mut Response, sup_url: &str, feed_url: &str) {
    let value = sup_header_value(sup_url, feed_url);
    if let Ok(value) = HeaderValue::from_str(&value) {
        response.headers_mut().insert(SUP_ID_HEADER, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_format_from_query() {
        assert_eq!(ResponseFormat::from_query(None, None), ResponseFormat::Html);
        assert_eq!(
            ResponseFormat::from_query(Some("rss"), None),
            ResponseFormat::Html
        );
        assert_eq!(
            ResponseFormat::from_query(Some("atom"), None),
            ResponseFormat::Atom
        );
        assert_eq!(
            ResponseFormat::from_query(Some("json"), Some("1")),
            ResponseFormat::Json { pretty: true }
        );
        assert_eq!(
            ResponseFormat::from_query(Some("json"), Some("")),
            ResponseFormat::Json { pretty: false }
        );
    }

    #[test]
    fn test_listing_query_cursor_alias() {
        let query = ListingQuery {
            start: Some("abc".to_string()),
            ..ListingQuery::default()
        };
        assert_eq!(query.cursor(), Some("abc"));

        let query = ListingQuery {
            cursor: Some("new".to_string()),
            start: Some("old".to_string()),
            ..ListingQuery::default()
        };
        assert_eq!(query.cursor(), Some("new"));
    }

    #[test]
    fn test_atom_response_has_sup_header() {
        let settings = BlogSettings::default();
        let response = feed_response(
            ResponseFormat::Atom,
            FeedSource {
                entries: &[],
                cursor: None,
                self_url: settings.feed_url(),
            },
            &settings,
        )
        .unwrap()
        .unwrap();

        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            ATOM_CONTENT_TYPE
        );
        let sup = response.headers()[SUP_ID_HEADER].to_str().unwrap();
        assert_eq!(
            sup,
            sup_header_value(&settings.sup_url, &settings.feed_url())
        );
    }

    #[test]
    fn test_sup_header_follows_served_feed() {
        let settings = BlogSettings::default();
        let tag_url = format!("{}/t/rust?format=atom", settings.base_url);
        let response = feed_response(
            ResponseFormat::Atom,
            FeedSource {
                entries: &[],
                cursor: None,
                self_url: tag_url.clone(),
            },
            &settings,
        )
        .unwrap()
        .unwrap();

        let sup = response.headers()[SUP_ID_HEADER].to_str().unwrap();
        assert_eq!(sup, sup_header_value(&settings.sup_url, &tag_url));
        assert_ne!(
            sup,
            sup_header_value(&settings.sup_url, &settings.feed_url())
        );
    }
}
