use chrono::NaiveDateTime;
use std::collections::HashSet;

use super::normalize::{NormalizedBattle, NormalizedPlayer};
use super::records::{
    BattleParticipantRecord, BattleRecord, BrawlerRecord, GameModeRecord, MapRecord,
    PlayerBrawlerRecord, PlayerRecord,
};
use crate::api::normalize_tag;

/// In-memory accumulator for everything a collect run produces.
///
/// Keys are unique per collection. Maps and game modes are deduplicated by
/// name and numbered from 1 in order of first appearance; battle participants
/// are numbered from 1 in append order.
#[derive(Debug, Default)]
pub struct RecordStore {
    brawlers: Vec<BrawlerRecord>,
    players: Vec<PlayerRecord>,
    player_brawlers: Vec<PlayerBrawlerRecord>,
    battles: Vec<BattleRecord>,
    battle_players: Vec<BattleParticipantRecord>,
    maps: Vec<MapRecord>,
    game_modes: Vec<GameModeRecord>,

    brawler_ids: HashSet<i64>,
    processed_player_tags: HashSet<String>,
    processed_battle_ids: HashSet<String>,
    map_names: HashSet<String>,
    mode_names: HashSet<String>,
}

/// Record counts per collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSummary {
    pub battles: usize,
    pub players: usize,
    pub player_brawlers: usize,
    pub battle_players: usize,
    pub maps: usize,
    pub game_modes: usize,
    pub brawlers: usize,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add catalog entries, skipping ids already present. Returns how many were new.
    pub fn add_brawlers(&mut self, brawlers: Vec<BrawlerRecord>) -> usize {
        let before = self.brawlers.len();
        for brawler in brawlers {
            if self.brawler_ids.insert(brawler.id) {
                self.brawlers.push(brawler);
            }
        }
        self.brawlers.len() - before
    }

    pub fn is_player_processed(&self, tag: &str) -> bool {
        self.processed_player_tags.contains(&normalize_tag(tag))
    }

    /// Add a player and its brawler rows. Returns `false` if the tag was already stored.
    pub fn add_player(&mut self, normalized: NormalizedPlayer) -> bool {
        if !self.processed_player_tags.insert(normalize_tag(&normalized.player.tag)) {
            return false;
        }
        self.players.push(normalized.player);
        self.player_brawlers.extend(normalized.brawlers);
        true
    }

    pub fn is_battle_processed(&self, battle_id: &str) -> bool {
        self.processed_battle_ids.contains(battle_id)
    }

    /// Add a battle with its participants and catalog entries.
    /// Returns `false` (and adds nothing) if the battle id was already seen.
    pub fn add_battle(&mut self, normalized: NormalizedBattle) -> bool {
        if !self.processed_battle_ids.insert(normalized.battle.id.clone()) {
            return false;
        }

        let now = normalized.observed_at;
        for draft in normalized.participants {
            let id = self.battle_players.len() as u64 + 1;
            self.battle_players.push(BattleParticipantRecord {
                id,
                battle_id: normalized.battle.id.clone(),
                player_tag: draft.player_tag,
                team: draft.team,
                brawler_id: draft.brawler_id,
                brawler_power: draft.brawler_power,
                brawler_trophies: draft.brawler_trophies,
                created_at: now,
            });
        }

        if let Some((name, mode)) = normalized.map {
            self.add_map(name, mode, now);
        }
        if let Some(mode) = normalized.mode {
            self.add_game_mode(mode, now);
        }

        self.battles.push(normalized.battle);
        true
    }

    fn add_map(&mut self, name: String, mode: String, now: NaiveDateTime) {
        if !self.map_names.insert(name.clone()) {
            return;
        }
        self.maps.push(MapRecord {
            id: self.maps.len() as u64 + 1,
            name,
            mode_id: mode,
            environment: String::new(),
            created_at: now,
            updated_at: now,
        });
    }

    fn add_game_mode(&mut self, name: String, now: NaiveDateTime) {
        if !self.mode_names.insert(name.clone()) {
            return;
        }
        self.game_modes.push(GameModeRecord {
            id: self.game_modes.len() as u64 + 1,
            name,
            color: String::new(),
            created_at: now,
            updated_at: now,
        });
    }

    pub fn brawlers(&self) -> &[BrawlerRecord] {
        &self.brawlers
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn player_brawlers(&self) -> &[PlayerBrawlerRecord] {
        &self.player_brawlers
    }

    pub fn battles(&self) -> &[BattleRecord] {
        &self.battles
    }

    pub fn battle_players(&self) -> &[BattleParticipantRecord] {
        &self.battle_players
    }

    pub fn maps(&self) -> &[MapRecord] {
        &self.maps
    }

    pub fn game_modes(&self) -> &[GameModeRecord] {
        &self.game_modes
    }

    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            battles: self.battles.len(),
            players: self.players.len(),
            player_brawlers: self.player_brawlers.len(),
            battle_players: self.battle_players.len(),
            maps: self.maps.len(),
            game_modes: self.game_modes.len(),
            brawlers: self.brawlers.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary().total() == 0
    }
}

impl StoreSummary {
    pub fn total(&self) -> usize {
        self.battles
            + self.players
            + self.player_brawlers
            + self.battle_players
            + self.maps
            + self.game_modes
            + self.brawlers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::normalize::{ParticipantDraft, normalize_player};
    use chrono::NaiveDate;
    use serde_json::json;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn battle(time: &str, origin: &str, map: &str) -> NormalizedBattle {
        NormalizedBattle {
            battle: BattleRecord {
                id: format!("{}_{}", time, origin),
                battle_time: time.to_string(),
                mode_id: "brawlBall".to_string(),
                map_id: map.to_string(),
                battle_type: "ranked".to_string(),
                result: "defeat".to_string(),
                duration: 90,
                trophy_change: -4,
                star_player_tag: String::new(),
            },
            participants: vec![
                ParticipantDraft {
                    player_tag: origin.to_string(),
                    team: 0,
                    brawler_id: 16000000,
                    brawler_power: 11,
                    brawler_trophies: 700,
                },
                ParticipantDraft {
                    player_tag: "#OTHER".to_string(),
                    team: 1,
                    brawler_id: 16000003,
                    brawler_power: 10,
                    brawler_trophies: 650,
                },
            ],
            map: Some((map.to_string(), "brawlBall".to_string())),
            mode: Some("brawlBall".to_string()),
            observed_at: now(),
        }
    }

    #[test]
    fn same_battle_twice_is_stored_once() {
        let mut store = RecordStore::new();

        assert!(store.add_battle(battle("20250610T101500.000Z", "#P1", "Backyard Bowl")));
        assert!(!store.add_battle(battle("20250610T101500.000Z", "#P1", "Backyard Bowl")));

        assert_eq!(store.battles().len(), 1);
        assert_eq!(store.battle_players().len(), 2);
        assert!(store.is_battle_processed("20250610T101500.000Z_#P1"));
    }

    #[test]
    fn participants_and_catalogs_get_sequential_ids() {
        let mut store = RecordStore::new();
        store.add_battle(battle("t1", "#P1", "Backyard Bowl"));
        store.add_battle(battle("t2", "#P1", "Pinhole Punt"));
        store.add_battle(battle("t3", "#P1", "Backyard Bowl"));

        let ids: Vec<u64> = store.battle_players().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

        let maps: Vec<(u64, &str)> = store.maps().iter().map(|m| (m.id, m.name.as_str())).collect();
        assert_eq!(maps, vec![(1, "Backyard Bowl"), (2, "Pinhole Punt")]);
        assert_eq!(store.game_modes().len(), 1);
        assert_eq!(store.game_modes()[0].id, 1);
    }

    #[test]
    fn player_is_stored_once_per_tag() {
        let mut store = RecordStore::new();
        let raw = json!({ "tag": "#2G09L9QRC", "brawlers": [{ "id": 1 }] });

        assert!(store.add_player(normalize_player(&raw, now()).unwrap()));
        assert!(!store.add_player(normalize_player(&raw, now()).unwrap()));
        assert!(store.is_player_processed("2g09l9qrc"));
        assert_eq!(store.summary().players, 1);
        assert_eq!(store.summary().player_brawlers, 1);
    }

    #[test]
    fn brawler_catalog_deduplicates_ids() {
        let mut store = RecordStore::new();
        let brawler = |id| BrawlerRecord {
            id,
            name: format!("B{}", id),
            rarity: String::new(),
            class_name: String::new(),
            description: String::new(),
            created_at: now(),
            updated_at: now(),
        };

        assert_eq!(store.add_brawlers(vec![brawler(1), brawler(2), brawler(1)]), 2);
        assert_eq!(store.brawlers().len(), 2);
        assert!(!store.is_empty());
    }
}
