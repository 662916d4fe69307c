//! Best-effort publish notifications.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::BlogSettings;
use crate::infrastructure::ping::{PingError, PingMethod, PingRequest, Pinger};
use crate::utils::sup_id::sup_id;

/// Outcome of one announcement round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PingReport {
    pub attempted: usize,
    pub failed: usize,
}

/// Announces new entries to search engines, SUP, an aggregator and a hub.
///
/// Failures are logged and counted, never returned.
pub struct NotifyService {
    pinger: Arc<dyn Pinger>,
    settings: Arc<BlogSettings>,
}

/// Builds the ping requests for the configured targets.
///
/// Returns nothing when pings are disabled.
pub fn build_ping_requests(settings: &BlogSettings) -> Vec<PingRequest> {
    let ping = &settings.ping;
    if !ping.enabled {
        return Vec::new();
    }

    let home = settings.home_url();
    let feed = settings.feed_url();
    let mut requests = Vec::with_capacity(4);

    if let Some(url) = &ping.search_url {
        requests.push(PingRequest {
            name: "search",
            method: PingMethod::Get,
            url: url.clone(),
            params: vec![
                ("name", settings.title.clone()),
                ("url", home.clone()),
                ("changesURL", feed.clone()),
            ],
        });
    }

    if let Some(url) = &ping.sup_url {
        requests.push(PingRequest {
            name: "sup",
            method: PingMethod::Get,
            url: url.clone(),
            params: vec![("url", feed.clone()), ("supid", sup_id(&feed))],
        });
    }

    if let Some(url) = &ping.aggregator_url {
        requests.push(PingRequest {
            name: "aggregator",
            method: PingMethod::Get,
            url: url.clone(),
            params: vec![("bloglink", home.clone())],
        });
    }

    if let Some(url) = &ping.hub_url {
        requests.push(PingRequest {
            name: "hub",
            method: PingMethod::PostForm,
            url: url.clone(),
            params: vec![("hub.mode", "publish".to_string()), ("hub.url", feed)],
        });
    }

    requests
}

impl NotifyService {
    pub fn new(pinger: Arc<dyn Pinger>, settings: Arc<BlogSettings>) -> Self {
        Self { pinger, settings }
    }

    /// Sends every configured ping concurrently, each bounded by the ping timeout.
    pub async fn announce(&self) -> PingReport {
        let requests = build_ping_requests(&self.settings);
        if requests.is_empty() {
            return PingReport::default();
        }

        let timeout = Duration::from_secs(self.settings.ping.timeout_secs);
        let results = join_all(requests.iter().map(|request| async move {
            let outcome = match tokio::time::timeout(timeout, self.pinger.send(request)).await {
                Ok(result) => result,
                Err(_) => Err(PingError::Transport {
                    target: request.url.clone(),
                    reason: format!("timed out after {}s", timeout.as_secs()),
                }),
            };
            (request.name, outcome)
        }))
        .await;

        let mut report = PingReport {
            attempted: results.len(),
            failed: 0,
        };
        for (name, outcome) in results {
            if let Err(e) = outcome {
                report.failed += 1;
                warn!("{} ping failed: {}", name, e);
            }
        }

        info!(
            "Announced new entry: {}/{} pings delivered",
            report.attempted - report.failed,
            report.attempted
        );
        report
    }
}
