mod client;
mod transport;

pub use client::RateLimitedClient;
pub use transport::{HttpTransport, RawResponse};
