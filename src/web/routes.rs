//! Page route tables.

use crate::state::AppState;
use crate::web::handlers::{
    about_handler, archive_handler, compose_form_handler, compose_handler, delete_form_handler,
    delete_handler, entry_handler, feed_redirect_handler, hide_form_handler, hide_handler,
    home_handler, legacy_entry_handler, tag_handler,
};
use axum::{Router, routing::get};

/// Pages anyone may read.
///
/// # Endpoints
///
/// - `GET /` - Newest entries (`?format=atom|json`, `?cursor=`)
/// - `GET /archive` - Title list
/// - `GET /about`
/// - `GET /feed` - Permanent redirect to the Atom feed
/// - `GET /t/{tag}` - Entries with a tag
/// - `GET /e/{slug}` - Permalink
/// - `GET /{slug}` - Legacy permalink, redirects to `/e/{slug}`
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/archive", get(archive_handler))
        .route("/about", get(about_handler))
        .route("/feed", get(feed_redirect_handler))
        .route("/t/{tag}", get(tag_handler))
        .route("/e/{slug}", get(entry_handler))
        .route("/{slug}", get(legacy_entry_handler))
}

/// Editor routes; protect with [`crate::web::middleware::admin_guard`].
///
/// # Endpoints
///
/// - `GET|POST /compose`
/// - `GET|POST /delete`
/// - `GET|POST /hide`
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/compose", get(compose_form_handler).post(compose_handler))
        .route("/delete", get(delete_form_handler).post(delete_handler))
        .route("/hide", get(hide_form_handler).post(hide_handler))
}
