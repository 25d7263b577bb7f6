use thiserror::Error;

/// Failure signals from the API client that callers must handle explicitly.
///
/// Not-found, non-2xx and transport problems are reported as an absent value
/// instead, so this only carries what cannot be retried away.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("rate limit still exceeded for {path} after {attempts} attempts")]
    RateLimitExhausted { path: String, attempts: u32 },
}

/// Fatal problems that abort a run before any crawling starts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API token is required (set BRAWL_STARS_API_TOKEN or enter it at the prompt)")]
    MissingToken,
    #[error("no player tags loaded from {0}")]
    EmptyTagList(String),
    #[error("no seed player tags configured")]
    NoSeeds,
}

/// Context message for fetch errors
pub fn fetch_context(path: &str) -> String {
    format!("Failed to fetch from: {}", path)
}

/// Context message for parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Context message for export errors
pub fn export_context(operation: &str, target: &str) -> String {
    format!("Failed to {} export file: {}", operation, target)
}
