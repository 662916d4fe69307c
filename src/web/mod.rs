//! Browser-facing layer: HTML pages, feeds and the admin editor.
//!
//! Pages are rendered server-side with askama. Every listing can also be
//! served as an Atom or JSON feed via `?format=`.
//!
//! # Modules
//!
//! - [`extract`] - Caller identity extractor and request URL helper
//! - [`feed`] - Atom and JSON feed rendering
//! - [`format`] - Response format negotiation and the `X-SUP-ID` header
//! - [`forms`] - Admin form payloads
//! - [`fragments`] - Shared page fragments
//! - [`handlers`] - Page handlers
//! - [`middleware`] - Admin guard and SUP header
//! - [`routes`] - Public and admin route tables
//! - [`views`] - Page view models

pub mod extract;
pub mod feed;
pub mod format;
pub mod forms;
pub mod fragments;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod views;
