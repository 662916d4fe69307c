//! Pinger trait and request types.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PingError {
    #[error("invalid ping target {target}: {reason}")]
    InvalidTarget { target: String, reason: String },
    #[error("ping to {target} failed: {reason}")]
    Transport { target: String, reason: String },
    #[error("ping to {target} returned status {status}")]
    Status { target: String, status: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingMethod {
    /// Parameters go into the query string.
    Get,
    /// Parameters go into a form-encoded body.
    PostForm,
}

/// One outbound notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingRequest {
    /// Short label used in logs.
    pub name: &'static str,
    pub method: PingMethod,
    pub url: String,
    pub params: Vec<(&'static str, String)>,
}

/// Delivers a single ping.
///
/// Implementations report every failure as an error; deciding that a failed
/// ping is harmless belongs to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Pinger: Send + Sync {
    async fn send(&self, request: &PingRequest) -> Result<(), PingError>;
}
