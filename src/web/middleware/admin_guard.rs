//! Session-based authorization for admin routes.

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use crate::application::services::AdminAccess;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::extract::request_url;

/// Admits administrators and turns everyone else away.
///
/// # Cookie Format
///
/// ```text
/// Cookie: blog_session=<base64url(email)>.<hex hmac>
/// ```
///
/// # Outcomes
///
/// - Administrator: the resolved [`crate::domain::entities::Identity`] is
///   stored in request extensions and the handler runs
/// - Anonymous `GET`: redirect to `{LOGIN_URL}?continue=<absolute request URL>`
/// - Anonymous non-`GET`, or signed in without admin rights: `403 Forbidden`
///
/// # Example
///
/// ```rust,ignore
/// let admin = web::routes::admin_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), admin_guard::layer));
/// ```
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let identity = st
        .auth_service
        .identify(req.headers().get(COOKIE).and_then(|v| v.to_str().ok()));
    let continue_url = request_url(&st.settings, req.uri());

    match st
        .auth_service
        .authorize(identity, req.method(), &continue_url)
    {
        AdminAccess::Allowed(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        AdminAccess::RedirectToLogin(login_url) => Redirect::to(&login_url).into_response(),
        AdminAccess::Forbidden => AppError::forbidden(
            "Administrator access required",
            json!({ "path": req.uri().path() }),
        )
        .into_response(),
    }
}
