use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{RecordStore, TagRosterRecord};
use crate::errors;

pub const BATTLES_FILE: &str = "battles.csv";
pub const PLAYERS_FILE: &str = "players.csv";
pub const PLAYER_BRAWLER_FILE: &str = "player_brawler.csv";
pub const BATTLE_PLAYERS_FILE: &str = "battle_players.csv";
pub const MAPS_FILE: &str = "maps.csv";
pub const GAME_MODES_FILE: &str = "game_modes.csv";
pub const BRAWLERS_FILE: &str = "brawlers.csv";

/// Write `rows` as a CSV table with a header row.
///
/// Returns `None` without touching the filesystem when there is nothing to write.
pub fn write_table<T: Serialize>(dir: &Path, file_name: &str, rows: &[T]) -> Result<Option<PathBuf>> {
    if rows.is_empty() {
        warn!("No data to save for {}", file_name);
        return Ok(None);
    }

    ensure_directory(dir)?;
    let path = dir.join(file_name);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| errors::export_context("create", &path.display().to_string()))?;

    for row in rows {
        writer
            .serialize(row)
            .with_context(|| errors::export_context("write row to", file_name))?;
    }
    writer
        .flush()
        .with_context(|| errors::export_context("flush", file_name))?;

    info!("Saved {} records to {}", rows.len(), path.display());
    Ok(Some(path))
}

/// Write every non-empty collection of the store into `dir`
pub fn export_store(store: &RecordStore, dir: &Path) -> Result<Vec<PathBuf>> {
    let written = [
        write_table(dir, BATTLES_FILE, store.battles())?,
        write_table(dir, PLAYERS_FILE, store.players())?,
        write_table(dir, PLAYER_BRAWLER_FILE, store.player_brawlers())?,
        write_table(dir, BATTLE_PLAYERS_FILE, store.battle_players())?,
        write_table(dir, MAPS_FILE, store.maps())?,
        write_table(dir, GAME_MODES_FILE, store.game_modes())?,
        write_table(dir, BRAWLERS_FILE, store.brawlers())?,
    ];

    Ok(written.into_iter().flatten().collect())
}

/// File name of a roster written at `at`, e.g. `player_tags_20250610_120000.csv`
pub fn roster_file_name(at: NaiveDateTime) -> String {
    format!("player_tags_{}.csv", at.format("%Y%m%d_%H%M%S"))
}

/// Write the snowball roster into `dir` under a timestamped name
pub fn write_roster(dir: &Path, rows: &[TagRosterRecord], at: NaiveDateTime) -> Result<Option<PathBuf>> {
    write_table(dir, &roster_file_name(at), rows)
}

fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))
}
