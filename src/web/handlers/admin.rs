//! Compose, delete and hide. Mounted behind the admin guard.

use axum::{
    Extension, Form,
    extract::{Query, State, rejection::FormRejection},
    response::{IntoResponse, Redirect, Response},
};
use validator::Validate;

use super::page_layout;
use crate::domain::entities::Identity;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::extract::CurrentUser;
use crate::web::forms::{ComposeForm, EntryKey, KeyParams};
use crate::web::views::{ComposePage, DeletePage, EntryView, HidePage};

/// Key arguments from the form body, falling back to the query string.
fn key_params(query: KeyParams, form: Result<Form<KeyParams>, FormRejection>) -> KeyParams {
    match form {
        Ok(Form(body)) => body.or(query),
        Err(_) => query,
    }
}

/// Editor, blank or pre-filled with `?key=<id>`. An unknown key opens a
/// blank editor.
///
/// # Endpoint
///
/// `GET /compose?key=<id>`
pub async fn compose_form_handler(
    State(st): State<AppState>,
    user: CurrentUser,
    Query(params): Query<KeyParams>,
) -> Result<Response, AppError> {
    let entry = match EntryKey::parse(params.key.as_deref()) {
        EntryKey::Id(id) => match st.entry_service.get(id).await {
            Ok(entry) => Some(entry),
            Err(AppError::NotFound { .. }) => None,
            Err(e) => return Err(e),
        },
        EntryKey::Missing | EntryKey::Invalid => None,
    };

    let layout = page_layout(&st, &user).await?;
    let layout = match &entry {
        Some(entry) => layout.titled(format!("Edit: {}", entry.title)),
        None => layout.titled("New entry"),
    };

    Ok(ComposePage::new(layout, entry.as_ref()).into_response())
}

/// Creates or updates an entry, then shows it.
///
/// # Endpoint
///
/// `POST /compose` (form: `key?`, `title`, `body`, `tags`, `hidden?`)
///
/// # Responses
///
/// - `303` to `/e/{slug}` on success
/// - `303` to `/` when `key` names no entry
/// - `400` when title or body is blank
pub async fn compose_handler(
    State(st): State<AppState>,
    Extension(identity): Extension<Identity>,
    Form(form): Form<ComposeForm>,
) -> Result<Response, AppError> {
    form.validate()?;

    let key = match EntryKey::parse(form.key.as_deref()) {
        EntryKey::Missing => None,
        EntryKey::Id(id) => Some(id),
        EntryKey::Invalid => return Ok(Redirect::to("/").into_response()),
    };

    match st.entry_service.compose(&identity, key, form.draft()).await {
        Ok(outcome) => Ok(Redirect::to(&format!("/e/{}", outcome.entry.slug)).into_response()),
        Err(AppError::NotFound { .. }) if key.is_some() => Ok(Redirect::to("/").into_response()),
        Err(e) => Err(e),
    }
}

/// Confirmation page.
///
/// # Endpoint
///
/// `GET /delete?key=<id>`
pub async fn delete_form_handler(
    State(st): State<AppState>,
    user: CurrentUser,
    Query(params): Query<KeyParams>,
) -> Result<Response, AppError> {
    let id = EntryKey::require(params.key.as_deref())?;
    let entry = st.entry_service.get(id).await?;

    Ok(DeletePage {
        layout: page_layout(&st, &user).await?.titled("Delete entry"),
        entry: EntryView::from(&entry),
    }
    .into_response())
}

/// # Endpoint
///
/// `POST /delete` (form or query: `key`)
pub async fn delete_handler(
    State(st): State<AppState>,
    Query(query): Query<KeyParams>,
    form: Result<Form<KeyParams>, FormRejection>,
) -> Result<Redirect, AppError> {
    let params = key_params(query, form);
    let id = EntryKey::require(params.key.as_deref())?;

    st.entry_service.delete(id).await?;
    Ok(Redirect::to("/"))
}

/// Confirmation page; `?unhide=1` asks to show the entry again.
///
/// # Endpoint
///
/// `GET /hide?key=<id>&unhide=1`
pub async fn hide_form_handler(
    State(st): State<AppState>,
    user: CurrentUser,
    Query(params): Query<KeyParams>,
) -> Result<Response, AppError> {
    let id = EntryKey::require(params.key.as_deref())?;
    let entry = st.entry_service.get(id).await?;
    let unhide = params.unhide();

    let title = if unhide { "Unhide entry" } else { "Hide entry" };
    Ok(HidePage {
        layout: page_layout(&st, &user).await?.titled(title),
        entry: EntryView::from(&entry),
        unhide,
    }
    .into_response())
}

/// # Endpoint
///
/// `POST /hide` (form or query: `key`, `unhide?`)
pub async fn hide_handler(
    State(st): State<AppState>,
    Query(query): Query<KeyParams>,
    form: Result<Form<KeyParams>, FormRejection>,
) -> Result<Redirect, AppError> {
    let params = key_params(query, form);
    let id = EntryKey::require(params.key.as_deref())?;

    st.entry_service.set_hidden(id, !params.unhide()).await?;
    Ok(Redirect::to("/"))
}
