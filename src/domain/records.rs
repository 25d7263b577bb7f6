use chrono::NaiveDateTime;
use serde::Serialize;

use super::category::TrophyCategory;

/// Row of `players.csv`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub tag: String,
    pub name: String,
    pub trophies: u32,
    pub highest_trophies: u32,
    pub exp_level: u32,
    pub victories_3v3: u32,
    pub victories_solo: u32,
    pub victories_duo: u32,
    pub club_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Row of `player_brawler.csv`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerBrawlerRecord {
    pub player_tag: String,
    pub brawler_id: i64,
    pub power_level: u32,
    pub trophies: u32,
    pub highest_trophies: u32,
    pub rank: u32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Row of `brawlers.csv`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrawlerRecord {
    pub id: i64,
    pub name: String,
    pub rarity: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Row of `battles.csv`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleRecord {
    pub id: String,
    pub battle_time: String,
    pub mode_id: String,
    pub map_id: String,
    #[serde(rename = "type")]
    pub battle_type: String,
    pub result: String,
    pub duration: i64,
    pub trophy_change: i32,
    pub star_player_tag: String,
}

/// Row of `battle_players.csv`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleParticipantRecord {
    pub id: u64,
    pub battle_id: String,
    pub player_tag: String,
    pub team: usize,
    pub brawler_id: i64,
    pub brawler_power: u32,
    pub brawler_trophies: u32,
    pub created_at: NaiveDateTime,
}

/// Row of `maps.csv`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapRecord {
    pub id: u64,
    pub name: String,
    pub mode_id: String,
    pub environment: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Row of `game_modes.csv`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameModeRecord {
    pub id: u64,
    pub name: String,
    pub color: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Player discovered by the snowball crawl
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedPlayer {
    pub tag: String,
    pub name: String,
    pub trophies: u32,
    pub club_tag: Option<String>,
    pub club_name: String,
}

impl CollectedPlayer {
    pub fn category(&self) -> TrophyCategory {
        TrophyCategory::from_trophies(self.trophies)
    }
}

/// Row of the snowball `player_tags_*.csv` roster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagRosterRecord {
    pub player_tag: String,
    pub player_name: String,
    pub trophies: u32,
    pub club_name: String,
    pub trophy_category: TrophyCategory,
}

impl TagRosterRecord {
    pub fn from_player(player: &CollectedPlayer, category: TrophyCategory) -> Self {
        Self {
            player_tag: player.tag.clone(),
            player_name: player.name.clone(),
            trophies: player.trophies,
            club_name: player.club_name.clone(),
            trophy_category: category,
        }
    }
}
