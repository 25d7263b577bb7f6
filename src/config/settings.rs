use std::path::PathBuf;

pub struct ApiSettings {
    pub base_url: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub request_delay_ms: u64,
    pub rate_limit_backoff_secs: u64,
    pub max_rate_limit_retries: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.brawlstars.com/v1".to_string(),
            user_agent: "BrawlHarvest/0.1",
            timeout_secs: 30,
            request_delay_ms: 100, // 10 req/sec
            rate_limit_backoff_secs: 60,
            max_rate_limit_retries: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub max_clubs: usize,
    pub target_players: usize,
    pub max_players_per_category: Option<usize>,
    pub seed_delay_ms: u64,
    pub club_delay_ms: u64,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            max_clubs: 50,
            target_players: 1000,
            max_players_per_category: Some(150),
            seed_delay_ms: 300,
            club_delay_ms: 500,
        }
    }
}

impl CrawlSettings {
    /// Settings without any pauses, for fast local runs
    pub fn without_delays(mut self) -> Self {
        self.seed_delay_ms = 0;
        self.club_delay_ms = 0;
        self
    }
}

pub struct ExportSettings {
    pub output_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("brawl_stars_data"),
        }
    }
}

pub struct AppConfig {
    pub api: ApiSettings,
    pub crawl: CrawlSettings,
    pub export: ExportSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            api: ApiSettings::default(),
            crawl: CrawlSettings::default(),
            export: ExportSettings::default(),
        }
    }
}
