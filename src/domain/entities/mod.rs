//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Entry`] - A blog entry
//! - [`Identity`] - The caller behind a verified session
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! - `NewEntry` - For creating new records
//! - `EntryPatch` - For in-place edits

pub mod entry;
pub mod identity;

pub use entry::{Entry, EntryPatch, NewEntry};
pub use identity::Identity;
