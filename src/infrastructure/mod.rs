//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain and application
//! layers, providing concrete implementations for persistence, caching and
//! outbound notifications.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis, in-process and no-op implementations)
//! - [`persistence`] - Entry store implementations
//! - [`ping`] - Outbound update notifications

pub mod cache;
pub mod persistence;
pub mod ping;
