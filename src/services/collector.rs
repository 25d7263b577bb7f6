use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

use crate::api::{BrawlStarsClient, normalize_tag};
use crate::domain::normalize::{normalize_battle_log, normalize_brawler_catalog, normalize_player};
use crate::domain::{BattleKeyStrategy, FetchProgress, RecordStore};
use crate::export;
use crate::http::{HttpTransport, RateLimitedClient};

/// Brawler catalog, player profiles and battle logs for a list of tags
pub struct CollectorService<T: HttpTransport = RateLimitedClient> {
    client: BrawlStarsClient<T>,
    store: RecordStore,
    key_strategy: BattleKeyStrategy,
}

impl<T: HttpTransport> CollectorService<T> {
    pub fn new(client: BrawlStarsClient<T>, key_strategy: BattleKeyStrategy) -> Self {
        Self {
            client,
            store: RecordStore::new(),
            key_strategy,
        }
    }

    pub async fn run(&mut self, player_tags: &[String], output_dir: &Path) -> Result<Vec<PathBuf>> {
        info!("=== Starting Data Collection ===\n");

        self.collect_all(player_tags).await;
        self.log_summary();

        info!("Saving collected data to {}", output_dir.display());
        let written = export::export_store(&self.store, output_dir)?;

        info!("=== Collection Complete ===");
        Ok(written)
    }

    pub async fn collect_all(&mut self, player_tags: &[String]) {
        // The catalog only needs to be fetched once per run
        self.fetch_brawlers().await;

        let total = player_tags.len();
        let mut progress = FetchProgress::new(total);

        for (i, tag) in player_tags.iter().enumerate() {
            info!("Processing player {}/{}: {}", i + 1, total, tag);

            let fetched = self.fetch_player_data(tag).await;
            self.fetch_player_battles(tag).await;

            if fetched {
                progress.increment_fetched();
            } else {
                progress.increment_skipped();
            }
        }
    }

    pub async fn fetch_brawlers(&mut self) {
        info!("Fetching brawlers data...");

        let raw = match self.client.fetch_brawlers().await {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                error!("Skipping brawler catalog: {}", e);
                return;
            }
        };

        match normalize_brawler_catalog(&raw, Self::now()) {
            Ok(brawlers) => {
                let added = self.store.add_brawlers(brawlers);
                info!("  → Fetched {} brawlers", added);
            }
            Err(e) => warn!("Unusable brawler catalog: {:?}", e),
        }
    }

    /// Fetch a player profile unless it was already stored. Returns `true` if a new player was added.
    pub async fn fetch_player_data(&mut self, tag: &str) -> bool {
        if self.store.is_player_processed(tag) {
            return false;
        }

        info!("Fetching data for player: {}", tag);
        let raw = match self.client.fetch_player(tag).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                error!("Skipping player {}: {}", tag, e);
                return false;
            }
        };

        match normalize_player(&raw, Self::now()) {
            Ok(normalized) => self.store.add_player(normalized),
            Err(e) => {
                warn!("Unusable player payload for {}: {:?}", tag, e);
                false
            }
        }
    }

    /// Fetch a battle log and add the battles not seen before. Returns how many were added.
    pub async fn fetch_player_battles(&mut self, tag: &str) -> usize {
        info!("Fetching battles for player: {}", tag);
        let raw = match self.client.fetch_battle_log(tag).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return 0,
            Err(e) => {
                error!("Skipping battle log of {}: {}", tag, e);
                return 0;
            }
        };

        let battles = match normalize_battle_log(&raw, &normalize_tag(tag), self.key_strategy, Self::now()) {
            Ok(battles) => battles,
            Err(e) => {
                warn!("Unusable battle log for {}: {:?}", tag, e);
                return 0;
            }
        };

        let mut added = 0;
        for battle in battles {
            if self.store.add_battle(battle) {
                added += 1;
            }
        }
        added
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn into_store(self) -> RecordStore {
        self.store
    }

    fn log_summary(&self) {
        let summary = self.store.summary();
        info!("Data collection completed!");
        info!("Collected:");
        info!("  - {} battles", summary.battles);
        info!("  - {} players", summary.players);
        info!("  - {} player-brawler records", summary.player_brawlers);
        info!("  - {} battle-player records", summary.battle_players);
        info!("  - {} unique maps", summary.maps);
        info!("  - {} unique game modes", summary.game_modes);
        info!("  - {} brawlers", summary.brawlers);
    }

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }
}
