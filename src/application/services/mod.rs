//! Business logic services for the application layer.

pub mod auth_service;
pub mod entry_service;
pub mod listing_service;
pub mod notify_service;

pub use auth_service::{AdminAccess, AuthService, SESSION_COOKIE};
pub use entry_service::{ComposeOutcome, Draft, EntryService};
pub use listing_service::{ListingPage, ListingService, home_cache_key};
pub use notify_service::{NotifyService, PingReport};
