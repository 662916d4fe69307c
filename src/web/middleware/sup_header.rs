//! `X-SUP-ID` on `HEAD` requests asking for the Atom feed.
//!
//! Aggregators check feeds with `HEAD ...?format=atom` to learn the SUP id
//! without downloading the document.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};

use crate::state::AppState;
use crate::web::extract::request_url;
use crate::web::format::attach_sup_header;

fn wants_atom(query: Option<&str>) -> bool {
    query.is_some_and(|q| {
        url::form_urlencoded::parse(q.as_bytes()).any(|(k, v)| k == "format" && v == "atom")
    })
}

pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let feed_url = (req.method() == Method::HEAD && wants_atom(req.uri().query()))
        .then(|| request_url(&st.settings, req.uri()));

    let mut response = next.run(req).await;
    if let Some(feed_url) = feed_url {
        attach_sup_header(&mut response, &st.settings.sup_url, &feed_url);
    }
    response
}
