//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! cache maintenance and notifications. Services consume repository traits and
//! provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::entry_service::EntryService`] - Compose, edit, hide and delete
//! - [`services::listing_service::ListingService`] - Home, archive and tag listings
//! - [`services::auth_service::AuthService`] - Session cookies and admin access
//! - [`services::notify_service::NotifyService`] - Best-effort publish pings

pub mod services;
