//! Outbound update notifications.
//!
//! - [`HttpPinger`] - Delivers pings over HTTP with `reqwest`
//! - [`NullPinger`] - Accepts every ping without sending anything

mod http_pinger;
mod null_pinger;
mod service;

pub use http_pinger::HttpPinger;
pub use null_pinger::NullPinger;
pub use service::{PingError, PingMethod, PingRequest, Pinger};

#[cfg(test)]
pub use service::MockPinger;
