//! HTTP delivery of update pings.

use super::service::{PingError, PingMethod, PingRequest, Pinger};
use async_trait::async_trait;
use reqwest::{Client, Url, header};
use std::time::Duration;
use tracing::debug;

/// Sends pings with a shared `reqwest` client.
///
/// Every request is bounded by the client timeout. Non-2xx responses count
/// as failures.
#[derive(Clone)]
pub struct HttpPinger {
    client: Client,
}

impl HttpPinger {
    /// Builds a client with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest` error if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    pub fn user_agent() -> &'static str {
        concat!("ledger-blog/", env!("CARGO_PKG_VERSION"))
    }

    fn target_url(request: &PingRequest) -> Result<Url, PingError> {
        let invalid = |e: url::ParseError| PingError::InvalidTarget {
            target: request.url.clone(),
            reason: e.to_string(),
        };

        match request.method {
            PingMethod::Get => Url::parse_with_params(
                &request.url,
                request.params.iter().map(|(k, v)| (*k, v.as_str())),
            )
            .map_err(invalid),
            PingMethod::PostForm => Url::parse(&request.url).map_err(invalid),
        }
    }

    fn form_body(request: &PingRequest) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(request.params.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }
}

#[async_trait]
impl Pinger for HttpPinger {
    async fn send(&self, request: &PingRequest) -> Result<(), PingError> {
        let url = Self::target_url(request)?;

        let builder = match request.method {
            PingMethod::Get => self.client.get(url),
            PingMethod::PostForm => self
                .client
                .post(url)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Self::form_body(request)),
        };

        let response = builder.send().await.map_err(|e| PingError::Transport {
            target: request.url.clone(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PingError::Status {
                target: request.url.clone(),
                status: status.as_u16(),
            });
        }

        debug!("{} ping delivered ({})", request.name, status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: PingMethod) -> PingRequest {
        PingRequest {
            name: "test",
            method,
            url: "https://ping.example.com/ping".to_string(),
            params: vec![
                ("name", "My Blog".to_string()),
                ("url", "https://blog.example.com/".to_string()),
            ],
        }
    }

    #[test]
    fn test_get_params_go_into_query() {
        let url = HttpPinger::target_url(&request(PingMethod::Get)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://ping.example.com/ping?name=My+Blog&url=https%3A%2F%2Fblog.example.com%2F"
        );
    }

    #[test]
    fn test_post_form_keeps_url_and_encodes_body() {
        let req = request(PingMethod::PostForm);
        let url = HttpPinger::target_url(&req).unwrap();
        assert_eq!(url.as_str(), "https://ping.example.com/ping");
        assert_eq!(
            HttpPinger::form_body(&req),
            "name=My+Blog&url=https%3A%2F%2Fblog.example.com%2F"
        );
    }

    #[test]
    fn test_invalid_target_is_reported() {
        let mut req = request(PingMethod::Get);
        req.url = "not a url".to_string();
        assert!(matches!(
            HttpPinger::target_url(&req),
            Err(PingError::InvalidTarget { .. })
        ));
    }
}
