use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeSet;

use super::models::{
    BattleEntry, BattleLogResponse, BattlePlayer, BrawlerCatalogResponse, ClubMember,
    ClubResponse, PlayerResponse,
};
use super::records::{BattleRecord, BrawlerRecord, CollectedPlayer, PlayerBrawlerRecord, PlayerRecord};
use crate::api::normalize_tag;
use crate::errors;

/// How a battle is identified across battle logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BattleKeyStrategy {
    /// `<battleTime>_<tag of the player whose log it came from>`
    #[default]
    PerPlayer,
    /// `<battleTime>_<sorted participant tags>`, identical from every participant's log
    Canonical,
}

/// Player profile flattened into its player row and per-brawler rows
#[derive(Debug, Clone)]
pub struct NormalizedPlayer {
    pub player: PlayerRecord,
    pub brawlers: Vec<PlayerBrawlerRecord>,
}

/// One participant of a battle before it is assigned a row id
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantDraft {
    pub player_tag: String,
    pub team: usize,
    pub brawler_id: i64,
    pub brawler_power: u32,
    pub brawler_trophies: u32,
}

/// Battle log entry flattened into battle, participants and catalog names
#[derive(Debug, Clone)]
pub struct NormalizedBattle {
    pub battle: BattleRecord,
    pub participants: Vec<ParticipantDraft>,
    /// Map name and the mode it was played in
    pub map: Option<(String, String)>,
    pub mode: Option<String>,
    pub observed_at: NaiveDateTime,
}

/// Club name plus its members, each carrying the club reference
#[derive(Debug, Clone)]
pub struct ClubRoster {
    pub tag: String,
    pub name: String,
    pub members: Vec<CollectedPlayer>,
}

fn parse<T: DeserializeOwned>(raw: &Value, data_type: &str) -> Result<T> {
    T::deserialize(raw).with_context(|| errors::parse_context(data_type))
}

/// Parse each entry on its own, skipping the ones that do not fit `T`
fn parse_entries<T: DeserializeOwned>(entries: &[Value], data_type: &str) -> Vec<T> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| match parse(entry, data_type) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Skipping {} #{}: {:#}", data_type, i + 1, e);
                None
            }
        })
        .collect()
}

pub fn normalize_player(raw: &Value, now: NaiveDateTime) -> Result<NormalizedPlayer> {
    let response: PlayerResponse = parse(raw, "player")?;
    if response.tag.is_empty() {
        bail!("player payload has no tag");
    }

    let brawlers = response
        .brawlers
        .iter()
        .map(|b| PlayerBrawlerRecord {
            player_tag: response.tag.clone(),
            brawler_id: b.id,
            power_level: b.power,
            trophies: b.trophies,
            highest_trophies: b.highest_trophies,
            rank: b.rank,
            created_at: now,
            updated_at: now,
        })
        .collect();

    let player = PlayerRecord {
        club_id: response.club_tag().unwrap_or_default().to_string(),
        tag: response.tag,
        name: response.name,
        trophies: response.trophies,
        highest_trophies: response.highest_trophies,
        exp_level: response.exp_level,
        victories_3v3: response.victories_3v3,
        victories_solo: response.victories_solo,
        victories_duo: response.victories_duo,
        created_at: now,
        updated_at: now,
    };

    Ok(NormalizedPlayer { player, brawlers })
}

/// Basic info used by the snowball crawl
pub fn normalize_player_summary(raw: &Value) -> Result<CollectedPlayer> {
    let response: PlayerResponse = parse(raw, "player")?;
    if response.tag.is_empty() {
        bail!("player payload has no tag");
    }

    Ok(CollectedPlayer {
        tag: normalize_tag(&response.tag),
        club_tag: response.club_tag().map(str::to_string),
        club_name: response.club_name().to_string(),
        name: response.name,
        trophies: response.trophies,
    })
}

pub fn normalize_brawler_catalog(raw: &Value, now: NaiveDateTime) -> Result<Vec<BrawlerRecord>> {
    let catalog: BrawlerCatalogResponse = parse(raw, "brawler catalog")?;

    Ok(catalog
        .items
        .into_iter()
        .map(|b| BrawlerRecord {
            id: b.id,
            name: b.name,
            rarity: b.rarity.map(|r| r.name).unwrap_or_default(),
            class_name: b.class.map(|c| c.name).unwrap_or_default(),
            description: b.description,
            created_at: now,
            updated_at: now,
        })
        .collect())
}

pub fn normalize_club(raw: &Value) -> Result<ClubRoster> {
    let club: ClubResponse = parse(raw, "club")?;
    if club.tag.is_empty() {
        bail!("club payload has no tag");
    }
    let tag = normalize_tag(&club.tag);

    let members = parse_entries::<ClubMember>(&club.members, "club member")
        .into_iter()
        .filter(|m| !m.tag.is_empty())
        .map(|m| CollectedPlayer {
            tag: m.tag,
            name: m.name,
            trophies: m.trophies,
            club_tag: Some(tag.clone()),
            club_name: club.name.clone(),
        })
        .collect();

    Ok(ClubRoster {
        tag,
        name: club.name,
        members,
    })
}

pub fn normalize_battle_log(
    raw: &Value,
    origin_tag: &str,
    strategy: BattleKeyStrategy,
    now: NaiveDateTime,
) -> Result<Vec<NormalizedBattle>> {
    let log: BattleLogResponse = parse(raw, "battle log")?;
    Ok(parse_entries::<BattleEntry>(&log.items, "battle")
        .iter()
        .map(|entry| normalize_battle(entry, origin_tag, strategy, now))
        .collect())
}

pub fn normalize_battle(
    entry: &BattleEntry,
    origin_tag: &str,
    strategy: BattleKeyStrategy,
    now: NaiveDateTime,
) -> NormalizedBattle {
    let participants = flatten_participants(entry);
    let id = battle_key(entry, &participants, origin_tag, strategy);
    let details = &entry.battle;

    let battle = BattleRecord {
        id,
        battle_time: entry.battle_time.clone(),
        mode_id: first_non_empty(&details.mode, &entry.event.mode).to_string(),
        map_id: first_non_empty(&details.map, &entry.event.map).to_string(),
        battle_type: details.battle_type.clone(),
        result: details.result.clone(),
        duration: details.duration,
        trophy_change: details.trophy_change,
        star_player_tag: details
            .star_player
            .as_ref()
            .map(|p| p.tag.clone())
            .unwrap_or_default(),
    };

    let mode_name = first_non_empty(&entry.event.mode, &details.mode);
    let map = Some(entry.event.map.as_str())
        .filter(|name| !name.is_empty())
        .map(|name| (name.to_string(), mode_name.to_string()));
    let mode = Some(mode_name)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    NormalizedBattle {
        battle,
        participants,
        map,
        mode,
        observed_at: now,
    }
}

/// One participant per (team, player) pair; solo modes list players flat,
/// so each of them becomes its own team.
fn flatten_participants(entry: &BattleEntry) -> Vec<ParticipantDraft> {
    let details = &entry.battle;
    if !details.teams.is_empty() {
        details
            .teams
            .iter()
            .enumerate()
            .flat_map(|(team, players)| players.iter().map(move |p| participant(p, team)))
            .collect()
    } else {
        details
            .players
            .iter()
            .enumerate()
            .map(|(team, p)| participant(p, team))
            .collect()
    }
}

fn participant(player: &BattlePlayer, team: usize) -> ParticipantDraft {
    ParticipantDraft {
        player_tag: player.tag.clone(),
        team,
        brawler_id: player.brawler.id,
        brawler_power: player.brawler.power,
        brawler_trophies: player.brawler.trophies,
    }
}

fn battle_key(
    entry: &BattleEntry,
    participants: &[ParticipantDraft],
    origin_tag: &str,
    strategy: BattleKeyStrategy,
) -> String {
    let per_player = || format!("{}_{}", entry.battle_time, normalize_tag(origin_tag));

    match strategy {
        BattleKeyStrategy::PerPlayer => per_player(),
        BattleKeyStrategy::Canonical => {
            let tags: BTreeSet<&str> = participants
                .iter()
                .map(|p| p.player_tag.as_str())
                .filter(|tag| !tag.is_empty())
                .collect();
            if tags.is_empty() {
                return per_player();
            }
            let joined = tags.into_iter().collect::<Vec<_>>().join("-");
            format!("{}_{}", entry.battle_time, joined)
        }
    }
}

fn first_non_empty<'a>(preferred: &'a str, fallback: &'a str) -> &'a str {
    if preferred.is_empty() { fallback } else { preferred }
}
