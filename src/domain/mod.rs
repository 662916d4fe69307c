//! Domain layer containing business entities and rules.
//!
//! This module defines entities, repository interfaces, and pure domain helpers
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`slug`] - Title and tag normalization
//! - [`cursor`] - Opaque keyset pagination tokens
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod cursor;
pub mod entities;
pub mod repositories;
pub mod slug;
