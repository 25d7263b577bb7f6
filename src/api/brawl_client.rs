use crate::api::tags::encode_tag;
use crate::config::ApiSettings;
use crate::errors::{self, FetchError};
use crate::http::{HttpTransport, RateLimitedClient};
use anyhow::Result;
use log::{debug, error, warn};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;

/// Brawl Stars API client
pub struct BrawlStarsClient<T: HttpTransport = RateLimitedClient> {
    transport: T,
    base_url: String,
    backoff: Duration,
    max_retries: u32,
}

impl BrawlStarsClient<RateLimitedClient> {
    /// Create a client that talks to the real API with the given token
    pub fn connect(api_token: &str, settings: &ApiSettings) -> Result<Self> {
        let transport = RateLimitedClient::new(
            api_token,
            settings.user_agent,
            settings.timeout_secs,
            settings.request_delay_ms,
        )?;
        Ok(Self::with_transport(transport, settings))
    }
}

impl<T: HttpTransport> BrawlStarsClient<T> {
    pub fn with_transport(transport: T, settings: &ApiSettings) -> Self {
        Self {
            transport,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            backoff: Duration::from_secs(settings.rate_limit_backoff_secs),
            max_retries: settings.max_rate_limit_retries,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the brawler catalog
    pub async fn fetch_brawlers(&mut self) -> Result<Option<Value>, FetchError> {
        self.request("/brawlers").await
    }

    /// Fetch a player profile
    pub async fn fetch_player(&mut self, tag: &str) -> Result<Option<Value>, FetchError> {
        let path = Self::build_player_path(tag);
        self.request(&path).await
    }

    /// Fetch the recent battle log of a player
    pub async fn fetch_battle_log(&mut self, tag: &str) -> Result<Option<Value>, FetchError> {
        let path = format!("{}/battlelog", Self::build_player_path(tag));
        self.request(&path).await
    }

    /// Fetch a club together with its member roster
    pub async fn fetch_club(&mut self, tag: &str) -> Result<Option<Value>, FetchError> {
        let path = format!("/clubs/{}", encode_tag(tag));
        self.request(&path).await
    }

    /// GET `path` relative to the API base.
    ///
    /// `Ok(None)` means "skip this entity": not found, unexpected status,
    /// transport failure or an unparsable body. A 429 is retried after the
    /// backoff, at most `max_retries` times.
    pub async fn request(&mut self, path: &str) -> Result<Option<Value>, FetchError> {
        let url = self.build_url(path);
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;

            let response = match self.transport.get(&url).await {
                Ok(response) => response,
                Err(e) => {
                    error!("{}: {:?}", errors::fetch_context(path), e);
                    return Ok(None);
                }
            };

            match response.status {
                StatusCode::OK => return Ok(Self::parse_body(path, &response.body)),
                StatusCode::NOT_FOUND => {
                    warn!("Resource not found: {}", path);
                    return Ok(None);
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    if attempts > self.max_retries {
                        return Err(FetchError::RateLimitExhausted {
                            path: path.to_string(),
                            attempts,
                        });
                    }
                    warn!(
                        "Rate limit exceeded on {}, waiting {} seconds (retry {}/{})",
                        path,
                        self.backoff.as_secs(),
                        attempts,
                        self.max_retries
                    );
                    sleep(self.backoff).await;
                }
                status => {
                    error!("API request failed: {} - {}", status, Self::snippet(&response.body));
                    return Ok(None);
                }
            }
        }
    }

    // --- Helper Methods ---

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn build_player_path(tag: &str) -> String {
        format!("/players/{}", encode_tag(tag))
    }

    fn parse_body(path: &str, body: &str) -> Option<Value> {
        match serde_json::from_str(body) {
            Ok(value) => Some(value),
            Err(e) => {
                error!("{} from {}: {}", errors::parse_context("response body"), path, e);
                debug!("Body snippet: {}", Self::snippet(body));
                None
            }
        }
    }

    fn snippet(body: &str) -> String {
        body.chars().take(200).collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::http::RawResponse;
    use std::collections::{HashMap, VecDeque};

    /// Transport that replays scripted responses per URL and records every call
    #[derive(Default)]
    pub(crate) struct ScriptedTransport {
        responses: HashMap<String, VecDeque<RawResponse>>,
        pub calls: Vec<String>,
    }

    impl ScriptedTransport {
        pub fn respond(&mut self, url: &str, status: StatusCode, body: &str) {
            self.responses
                .entry(url.to_string())
                .or_default()
                .push_back(RawResponse::new(status, body));
        }

        pub fn respond_json(&mut self, url: &str, body: &Value) {
            self.respond(url, StatusCode::OK, &body.to_string());
        }
    }

    impl HttpTransport for ScriptedTransport {
        async fn get(&mut self, url: &str) -> Result<RawResponse> {
            self.calls.push(url.to_string());
            let queue = self.responses.get_mut(url);
            match queue.and_then(|q| if q.len() > 1 { q.pop_front() } else { q.front().cloned() }) {
                Some(response) => Ok(response),
                None => Ok(RawResponse::new(StatusCode::NOT_FOUND, "")),
            }
        }
    }

    pub(crate) const BASE: &str = "https://api.test/v1";

    pub(crate) fn test_settings() -> ApiSettings {
        ApiSettings {
            base_url: BASE.to_string(),
            rate_limit_backoff_secs: 0,
            request_delay_ms: 0,
            ..ApiSettings::default()
        }
    }

    fn client(transport: ScriptedTransport) -> BrawlStarsClient<ScriptedTransport> {
        BrawlStarsClient::with_transport(transport, &test_settings())
    }

    #[tokio::test]
    async fn returns_body_on_ok() {
        let mut transport = ScriptedTransport::default();
        transport.respond(&format!("{}/players/%232G09L9QRC", BASE), StatusCode::OK, r##"{"tag":"#2G09L9QRC"}"##);

        let mut client = client(transport);
        let value = client.fetch_player("#2G09L9QRC").await.unwrap().unwrap();
        assert_eq!(value["tag"], "#2G09L9QRC");
    }

    #[tokio::test]
    async fn not_found_is_absent() {
        let mut client = client(ScriptedTransport::default());
        let value = client.fetch_player("#2G09L9QRC").await.unwrap();
        assert!(value.is_none());
        assert_eq!(client.transport().calls.len(), 1);
    }

    #[tokio::test]
    async fn retries_once_after_rate_limit() {
        let url = format!("{}/clubs/%23QRC", BASE);
        let mut transport = ScriptedTransport::default();
        transport.respond(&url, StatusCode::TOO_MANY_REQUESTS, "");
        transport.respond(&url, StatusCode::OK, r##"{"tag":"#QRC","members":[]}"##);

        let mut client = client(transport);
        let value = client.fetch_club("#QRC").await.unwrap();
        assert!(value.is_some());
        assert_eq!(client.transport().calls.len(), 2);
    }

    #[tokio::test]
    async fn persistent_rate_limit_is_bounded() {
        let url = format!("{}/brawlers", BASE);
        let mut transport = ScriptedTransport::default();
        transport.respond(&url, StatusCode::TOO_MANY_REQUESTS, "");

        let mut client = client(transport);
        let err = client.fetch_brawlers().await.unwrap_err();
        match err {
            FetchError::RateLimitExhausted { attempts, .. } => assert_eq!(attempts, 4),
        }
        assert_eq!(client.transport().calls.len(), 4);
    }

    #[tokio::test]
    async fn server_error_and_bad_json_are_absent() {
        let mut transport = ScriptedTransport::default();
        transport.respond(&format!("{}/players/%2288/battlelog", BASE), StatusCode::INTERNAL_SERVER_ERROR, "boom");
        transport.respond(&format!("{}/brawlers", BASE), StatusCode::OK, "not json");

        let mut client = client(transport);
        assert!(client.fetch_battle_log("#88").await.unwrap().is_none());
        assert!(client.fetch_brawlers().await.unwrap().is_none());
    }
}
