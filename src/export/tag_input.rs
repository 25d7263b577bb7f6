use anyhow::{Context, Result, anyhow};
use log::{info, warn};
use std::io::Read;
use std::path::Path;

use crate::api::{is_valid_tag, normalize_tag};
use crate::errors::ConfigError;

pub const TAG_COLUMN: &str = "player_tag";

/// Load player tags from the `player_tag` column of a CSV file.
///
/// Blank cells are dropped, malformed tags are skipped with a warning and the
/// rest are returned normalized, in file order. An empty result is an error.
pub fn load_player_tags(path: &Path) -> Result<Vec<String>> {
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open tag file {}", path.display()))?;
    let tags = read_player_tags(reader)?;

    if tags.is_empty() {
        return Err(ConfigError::EmptyTagList(path.display().to_string()).into());
    }
    info!("Loaded {} player tags from {}", tags.len(), path.display());
    Ok(tags)
}

pub fn read_player_tags<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<String>> {
    let headers = reader.headers().context("Failed to read tag file header")?;
    let column = headers
        .iter()
        .position(|h| h.trim() == TAG_COLUMN)
        .ok_or_else(|| anyhow!("Tag file has no '{}' column", TAG_COLUMN))?;

    let mut tags = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read tag file row {}", line + 2))?;
        let Some(raw) = record.get(column).map(str::trim).filter(|cell| !cell.is_empty()) else {
            continue;
        };
        if !is_valid_tag(raw) {
            warn!("Skipping malformed player tag '{}' on row {}", raw, line + 2);
            continue;
        }
        tags.push(normalize_tag(raw));
    }
    Ok(tags)
}
