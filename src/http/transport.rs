use anyhow::Result;
use reqwest::StatusCode;

/// Status and body of a completed GET request
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Issues GET requests against absolute URLs.
///
/// An `Err` means the request never produced a status (connection, timeout,
/// body read). Status handling is left to the caller.
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    async fn get(&mut self, url: &str) -> Result<RawResponse>;
}
