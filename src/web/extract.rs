//! Request extractors and URL helpers for page handlers.

use axum::extract::FromRequestParts;
use axum::http::{Uri, header::COOKIE, request::Parts};
use std::convert::Infallible;

use crate::config::BlogSettings;
use crate::domain::entities::Identity;
use crate::state::AppState;

/// The signed-in caller, if any.
///
/// Admin routes reuse the identity the admin guard already resolved.
pub struct CurrentUser(pub Option<Identity>);

impl CurrentUser {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.0.as_ref().is_some_and(|i| i.is_admin)
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>() {
            return Ok(Self(Some(identity.clone())));
        }

        let cookie = parts.headers.get(COOKIE).and_then(|v| v.to_str().ok());
        Ok(Self(state.auth_service.identify(cookie)))
    }
}

/// Absolute URL of a request under the configured base URL.
pub fn request_url(settings: &BlogSettings, uri: &Uri) -> String {
    let path = uri.path_and_query().map_or("/", |pq| pq.as_str());
    format!("{}{}", settings.base_url, path)
}
