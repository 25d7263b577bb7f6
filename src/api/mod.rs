pub mod brawl_client;
pub mod tags;

pub use brawl_client::BrawlStarsClient;
pub use tags::{encode_tag, is_valid_tag, normalize_tag};
