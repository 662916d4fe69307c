//! Home, archive and tag listings.
//!
//! Each listing answers `?format=atom` and `?format=json` with a feed of the
//! same entries it would render as HTML.

use axum::{
    extract::{Path, Query, State},
    http::Uri,
    response::{IntoResponse, Response},
};

use super::page_layout;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::extract::{CurrentUser, request_url};
use crate::web::format::{FeedSource, ListingQuery, feed_response};
use crate::web::fragments::{Fragment, render_all};
use crate::web::views::{ArchivePage, HomePage, TagPage, entry_views};

/// Newest visible entries in full.
///
/// # Endpoint
///
/// `GET /?cursor=<token>&format=<atom|json>&pretty=1`
///
/// The first page is served from the home-page cache.
pub async fn home_handler(
    State(st): State<AppState>,
    user: CurrentUser,
    uri: Uri,
    Query(query): Query<ListingQuery>,
) -> Result<Response, AppError> {
    let page = st.listing_service.home(query.cursor()).await?;

    let source = FeedSource {
        entries: &page.entries,
        cursor: Some(page.next_cursor.as_deref()),
        self_url: request_url(&st.settings, &uri),
    };
    if let Some(feed) = feed_response(query.response_format(), source, &st.settings)? {
        return Ok(feed);
    }

    let views = entry_views(&page.entries);
    let admin = user.is_admin();
    let entries = render_all(&views, |entry| Fragment::Entry { entry, admin })?;
    let navigation = Fragment::Navigation {
        path: "/",
        cursor: page.next_cursor.as_deref(),
    }
    .render()?;

    Ok(HomePage {
        layout: page_layout(&st, &user).await?,
        entries,
        navigation,
    }
    .into_response())
}

/// Dated title list, a larger page at a time.
///
/// # Endpoint
///
/// `GET /archive?cursor=<token>&format=<atom|json>`
pub async fn archive_handler(
    State(st): State<AppState>,
    user: CurrentUser,
    uri: Uri,
    Query(query): Query<ListingQuery>,
) -> Result<Response, AppError> {
    let page = st.listing_service.archive(query.cursor()).await?;

    let source = FeedSource {
        entries: &page.entries,
        cursor: Some(page.next_cursor.as_deref()),
        self_url: request_url(&st.settings, &uri),
    };
    if let Some(feed) = feed_response(query.response_format(), source, &st.settings)? {
        return Ok(feed);
    }

    let views = entry_views(&page.entries);
    let entries = render_all(&views, |entry| Fragment::EntrySmall {
        entry,
        show_date: true,
    })?;
    let navigation = Fragment::Navigation {
        path: "/archive",
        cursor: page.next_cursor.as_deref(),
    }
    .render()?;

    Ok(ArchivePage {
        layout: page_layout(&st, &user).await?.titled("Archive"),
        entries,
        navigation,
    }
    .into_response())
}

/// Visible entries carrying one tag. An unused tag is an empty page, not 404.
///
/// # Endpoint
///
/// `GET /t/{tag}?format=<atom|json>`
pub async fn tag_handler(
    State(st): State<AppState>,
    user: CurrentUser,
    uri: Uri,
    Path(tag): Path<String>,
    Query(query): Query<ListingQuery>,
) -> Result<Response, AppError> {
    let tagged = st.listing_service.tagged(&tag).await?;

    let source = FeedSource {
        entries: &tagged,
        cursor: None,
        self_url: request_url(&st.settings, &uri),
    };
    if let Some(feed) = feed_response(query.response_format(), source, &st.settings)? {
        return Ok(feed);
    }

    let views = entry_views(&tagged);
    let entries = render_all(&views, |entry| Fragment::EntrySmall {
        entry,
        show_date: true,
    })?;

    Ok(TagPage {
        layout: page_layout(&st, &user).await?.titled(format!("Tag: {tag}")),
        tag,
        entries,
    }
    .into_response())
}
