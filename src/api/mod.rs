//! Machine-facing HTTP layer and shared middleware.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for JSON responses
//! - [`handlers`] - Health endpoint
//! - [`middleware`] - Rate limiting and request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
