//! Small helpers shared across layers.
//!
//! - [`suffix`] - Random slug suffixes
//! - [`sup_id`] - Simple Update Protocol identifiers for the Atom feed

pub mod suffix;
pub mod sup_id;
