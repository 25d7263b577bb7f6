use anyhow::Result;
use chrono::Local;
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::api::BrawlStarsClient;
use crate::config::CrawlSettings;
use crate::crawler::{CrawlState, CrawlSummary, run_snowball};
use crate::domain::{CollectionAnalysis, analyze};
use crate::export;
use crate::http::{HttpTransport, RateLimitedClient};

/// Result of a snowball run
pub struct SnowballOutcome {
    pub summary: CrawlSummary,
    pub analysis: CollectionAnalysis,
    pub roster_path: Option<PathBuf>,
}

pub struct SnowballService<T: HttpTransport = RateLimitedClient> {
    client: BrawlStarsClient<T>,
    settings: CrawlSettings,
}

impl<T: HttpTransport> SnowballService<T> {
    pub fn new(client: BrawlStarsClient<T>, settings: CrawlSettings) -> Self {
        Self { client, settings }
    }

    pub async fn run(&mut self, seeds: &[String], output_dir: &Path) -> Result<SnowballOutcome> {
        let mut state = CrawlState::new(self.settings.max_players_per_category);

        let summary = run_snowball(&mut self.client, &mut state, seeds, &self.settings).await;
        let analysis = analyze(state.players(), state.category_cap());

        if state.collected_count() == 0 {
            warn!("No players collected - check your seed player tags");
            return Ok(SnowballOutcome {
                summary,
                analysis,
                roster_path: None,
            });
        }

        let roster = state.roster();
        let roster_path = export::write_roster(output_dir, &roster, Local::now().naive_local())?;
        if let Some(path) = &roster_path {
            info!("Saved {} player tags to {}", roster.len(), path.display());
        }

        Ok(SnowballOutcome {
            summary,
            analysis,
            roster_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::brawl_client::tests::{BASE, ScriptedTransport, test_settings};
    use serde_json::json;
    use std::fs;

    fn tmp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("brawl_harvest_snowball_{}", name));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn settings() -> CrawlSettings {
        CrawlSettings {
            max_players_per_category: None,
            ..CrawlSettings::default()
        }
        .without_delays()
    }

    #[tokio::test]
    async fn writes_roster_for_collected_players() {
        let mut transport = ScriptedTransport::default();
        transport.respond_json(
            &format!("{}/players/%23S1", BASE),
            &json!({ "tag": "#S1", "name": "Seed", "trophies": 16000, "club": { "tag": "#C1", "name": "Harbor" } }),
        );
        transport.respond_json(
            &format!("{}/clubs/%23C1", BASE),
            &json!({ "tag": "#C1", "name": "Harbor", "members": [
                { "tag": "#S1", "name": "Seed", "trophies": 16000 },
                { "tag": "#M1", "name": "Mate", "trophies": 52000 }
            ]}),
        );
        let client = BrawlStarsClient::with_transport(transport, &test_settings());
        let mut service = SnowballService::new(client, settings());
        let dir = tmp_dir("roster");

        let outcome = service.run(&["#S1".to_string()], &dir).await.unwrap();

        assert_eq!(outcome.summary.players_collected, 2);
        assert_eq!(outcome.analysis.total(), 2);
        let path = outcome.roster_path.expect("roster written");
        assert!(path.starts_with(&dir));
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.contains("#M1,Mate,52000,Harbor,master"));
    }

    #[tokio::test]
    async fn no_players_means_no_roster_file() {
        let client = BrawlStarsClient::with_transport(ScriptedTransport::default(), &test_settings());
        let mut service = SnowballService::new(client, settings());
        let dir = tmp_dir("empty");

        let outcome = service.run(&["#S1".to_string()], &dir).await.unwrap();

        assert_eq!(outcome.summary.seeds.failed, 1);
        assert!(outcome.roster_path.is_none());
        assert_eq!(outcome.analysis.total(), 0);
        assert!(!dir.exists());
    }
}
