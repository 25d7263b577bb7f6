use crate::http::{HttpTransport, RawResponse};
use crate::rate_limiter::RateLimiter;
use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use std::time::Duration;

/// HTTP client with bearer authentication and built-in rate limiting
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RateLimitedClient {
    pub fn new(
        api_token: &str,
        user_agent: &str,
        timeout_secs: u64,
        rate_limit_ms: u64,
    ) -> Result<Self> {
        let client = Self::build_client(api_token, user_agent, timeout_secs)?;
        let rate_limiter = RateLimiter::new(rate_limit_ms);

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    fn build_client(api_token: &str, user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .default_headers(Self::build_headers(api_token)?)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    fn build_headers(api_token: &str) -> Result<HeaderMap> {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_token))
            .context("API token contains characters not allowed in a header")?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response> {
        self.client
            .get(url)
            .send()
            .await
            .context("Failed to send GET request")
    }
}

impl HttpTransport for RateLimitedClient {
    async fn get(&mut self, url: &str) -> Result<RawResponse> {
        self.rate_limiter.wait().await;
        debug!("GET {} (request #{})", url, self.rate_limiter.request_count());
        let response = self.send_get_request(url).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))?;
        Ok(RawResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_plain_token() {
        assert!(RateLimitedClient::new("abc.def.ghi", "BrawlHarvest/0.1", 5, 0).is_ok());
    }

    #[test]
    fn rejects_token_with_newline() {
        assert!(RateLimitedClient::new("abc\ndef", "BrawlHarvest/0.1", 5, 0).is_err());
    }
}
