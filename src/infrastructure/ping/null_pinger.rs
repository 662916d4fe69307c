//! No-op pinger for tests and `PING_ENABLED=false`.

use super::service::{PingError, PingRequest, Pinger};
use async_trait::async_trait;
use tracing::debug;

#[derive(Debug, Default)]
pub struct NullPinger;

impl NullPinger {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Pinger for NullPinger {
    async fn send(&self, request: &PingRequest) -> Result<(), PingError> {
        debug!("Skipping {} ping (pings disabled)", request.name);
        Ok(())
    }
}
