pub mod seeds;
pub mod settings;
pub mod token;

pub use seeds::{get_seed_tags, resolve_seed_tags};
pub use settings::{ApiSettings, AppConfig, CrawlSettings, ExportSettings};
pub use token::resolve_api_token;
