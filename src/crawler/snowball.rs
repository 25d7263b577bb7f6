use log::{error, info, warn};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::sleep;

use super::state::{CrawlState, InsertOutcome};
use crate::api::BrawlStarsClient;
use crate::config::CrawlSettings;
use crate::domain::TrophyCategory;
use crate::domain::normalize::{ClubRoster, normalize_club, normalize_player_summary};
use crate::http::HttpTransport;

/// Why club expansion ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    PlayerTarget,
    ClubBudget,
    CategoriesFull,
    FrontierExhausted,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub resolved: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionReport {
    pub clubs_explored: usize,
    pub clubs_failed: usize,
    pub players_added: usize,
    pub stop_reason: StopReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    pub seeds: SeedReport,
    pub expansion: ExpansionReport,
    pub players_collected: usize,
}

/// Seeds → their clubs → those clubs' members. Members' own clubs are not followed.
pub async fn run_snowball<T: HttpTransport>(
    client: &mut BrawlStarsClient<T>,
    state: &mut CrawlState,
    seeds: &[String],
    settings: &CrawlSettings,
) -> CrawlSummary {
    info!("=== Starting Snowball Tag Collection ===");
    info!(
        "Target: {} players from at most {} clubs\n",
        settings.target_players, settings.max_clubs
    );

    let seeds = resolve_seeds(client, state, seeds, settings).await;
    info!(
        "  → {} players, {} clubs to explore\n",
        state.collected_count(),
        state.pending_count()
    );

    let expansion = expand_clubs(client, state, settings).await;
    info!(
        "=== Collection Complete: {} players, {} clubs explored ({:?}) ===",
        state.collected_count(),
        expansion.clubs_explored,
        expansion.stop_reason
    );

    CrawlSummary {
        seeds,
        expansion,
        players_collected: state.collected_count(),
    }
}

/// Phase 1: look up every seed, collect it and queue its club
pub async fn resolve_seeds<T: HttpTransport>(
    client: &mut BrawlStarsClient<T>,
    state: &mut CrawlState,
    seeds: &[String],
    settings: &CrawlSettings,
) -> SeedReport {
    info!("Phase 1: Resolving {} seed players...", seeds.len());
    let mut report = SeedReport::default();

    for (i, seed_tag) in seeds.iter().enumerate() {
        info!("  {}. Getting info for seed player {}...", i + 1, seed_tag);

        let raw = match client.fetch_player(seed_tag).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                warn!("    Could not get info for {}", seed_tag);
                report.failed += 1;
                pause(settings.seed_delay_ms).await;
                continue;
            }
            Err(e) => {
                error!("    Giving up on seed {}: {}", seed_tag, e);
                report.failed += 1;
                pause(settings.seed_delay_ms).await;
                continue;
            }
        };

        match normalize_player_summary(&raw) {
            Ok(player) => {
                info!("    → {} ({} trophies)", player.name, player.trophies);
                let club = player
                    .club_tag
                    .clone()
                    .map(|tag| (tag, player.club_name.clone()));
                if let InsertOutcome::CategoryFull(category) = state.insert_player(player) {
                    info!("    → Category {} is full, seed not collected", category);
                }
                if let Some((club_tag, club_name)) = club {
                    if state.enqueue_club(&club_tag) {
                        info!("    → Queued club {}", club_name);
                    }
                }
                report.resolved += 1;
            }
            Err(e) => {
                warn!("    Unusable player payload for {}: {:?}", seed_tag, e);
                report.failed += 1;
            }
        }

        pause(settings.seed_delay_ms).await;
    }

    report
}

/// Phase 2: expand queued clubs until the club budget, the player target or the frontier runs out
pub async fn expand_clubs<T: HttpTransport>(
    client: &mut BrawlStarsClient<T>,
    state: &mut CrawlState,
    settings: &CrawlSettings,
) -> ExpansionReport {
    info!("Phase 2: Expanding clubs...");
    let explored_before = state.clubs_explored();
    let mut clubs_failed = 0;
    let mut players_added = 0;

    let stop_reason = loop {
        if let Some(reason) = stop_condition(state, settings, explored_before) {
            break reason;
        }
        let Some(club_tag) = state.next_club() else {
            break StopReason::FrontierExhausted;
        };

        info!(
            "  Club {}/{}: {}",
            state.clubs_explored() - explored_before,
            settings.max_clubs,
            club_tag
        );

        match fetch_roster(client, &club_tag).await {
            Some(roster) if !roster.members.is_empty() => {
                players_added += absorb_roster(state, roster, settings);
            }
            _ => {
                warn!("    No members found");
                clubs_failed += 1;
            }
        }

        pause(settings.club_delay_ms).await;
    };

    if stop_reason == StopReason::PlayerTarget {
        info!("  → Reached target of {} players", settings.target_players);
    }

    ExpansionReport {
        clubs_explored: state.clubs_explored() - explored_before,
        clubs_failed,
        players_added,
        stop_reason,
    }
}

fn stop_condition(
    state: &CrawlState,
    settings: &CrawlSettings,
    explored_before: usize,
) -> Option<StopReason> {
    if state.collected_count() >= settings.target_players {
        Some(StopReason::PlayerTarget)
    } else if state.categories_full() {
        Some(StopReason::CategoriesFull)
    } else if state.clubs_explored() - explored_before >= settings.max_clubs {
        Some(StopReason::ClubBudget)
    } else {
        None
    }
}

async fn fetch_roster<T: HttpTransport>(
    client: &mut BrawlStarsClient<T>,
    club_tag: &str,
) -> Option<ClubRoster> {
    let raw = match client.fetch_club(club_tag).await {
        Ok(raw) => raw?,
        Err(e) => {
            error!("    Giving up on club {}: {}", club_tag, e);
            return None;
        }
    };

    match normalize_club(&raw) {
        Ok(roster) => Some(roster),
        Err(e) => {
            warn!("    Unusable club payload for {}: {:?}", club_tag, e);
            None
        }
    }
}

/// Insert new members until the target is hit. Returns how many were added.
fn absorb_roster(state: &mut CrawlState, roster: ClubRoster, settings: &CrawlSettings) -> usize {
    info!("    {} has {} members", roster.name, roster.members.len());

    let mut added = 0;
    let mut diversity: BTreeMap<TrophyCategory, usize> = BTreeMap::new();

    for member in roster.members {
        if state.collected_count() >= settings.target_players {
            break;
        }
        if let InsertOutcome::Added(category) = state.insert_player(member) {
            added += 1;
            *diversity.entry(category).or_default() += 1;
        }
    }

    let diversity = diversity
        .iter()
        .map(|(category, n)| format!("{}: {}", category.range_label(), n))
        .collect::<Vec<_>>()
        .join(", ");
    info!("    → Added {} new players", added);
    info!("    → Trophy diversity: {}", diversity);
    info!("    → Total collected: {} players", state.collected_count());

    added
}

async fn pause(delay_ms: u64) {
    if delay_ms > 0 {
        sleep(Duration::from_millis(delay_ms)).await;
    }
}
