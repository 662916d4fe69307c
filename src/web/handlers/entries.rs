//! Single entries, static pages and redirects.

use axum::{
    extract::{Path, Query, State},
    http::Uri,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use super::page_layout;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::extract::{CurrentUser, request_url};
use crate::web::format::{FeedSource, ListingQuery, feed_response};
use crate::web::fragments::Fragment;
use crate::web::views::{AboutPage, EntryPage, EntryView};

/// Permalink page. Hidden entries stay reachable here.
///
/// # Endpoint
///
/// `GET /e/{slug}?format=<atom|json>`
///
/// # Errors
///
/// `404` when no entry has the slug.
pub async fn entry_handler(
    State(st): State<AppState>,
    user: CurrentUser,
    uri: Uri,
    Path(slug): Path<String>,
    Query(query): Query<ListingQuery>,
) -> Result<Response, AppError> {
    let entry = st.listing_service.entry_by_slug(&slug).await?;

    let source = FeedSource {
        entries: std::slice::from_ref(&entry),
        cursor: None,
        self_url: request_url(&st.settings, &uri),
    };
    if let Some(feed) = feed_response(query.response_format(), source, &st.settings)? {
        return Ok(feed);
    }

    let view = EntryView::from(&entry);
    let rendered = Fragment::Entry {
        entry: &view,
        admin: user.is_admin(),
    }
    .render()?;

    Ok(EntryPage {
        layout: page_layout(&st, &user).await?.titled(entry.title.clone()),
        canonical_url: st.settings.permalink(&entry.slug),
        entry: rendered,
    }
    .into_response())
}

/// `GET /{slug}`: old-style permalinks move to `/e/{slug}`.
pub async fn legacy_entry_handler(
    State(st): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Redirect, AppError> {
    let entry = st.listing_service.entry_by_slug(&slug).await?;
    Ok(Redirect::permanent(&format!("/e/{}", entry.slug)))
}

pub async fn about_handler(
    State(st): State<AppState>,
    user: CurrentUser,
) -> Result<Response, AppError> {
    Ok(AboutPage {
        layout: page_layout(&st, &user).await?.titled("About"),
    }
    .into_response())
}

/// `GET /feed`
pub async fn feed_redirect_handler() -> Redirect {
    Redirect::permanent("/?format=atom")
}

/// Fallback for unmatched paths.
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found("Page not found", json!({ "path": uri.path() }))
}
