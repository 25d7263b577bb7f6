use std::collections::{BTreeMap, HashMap, HashSet};

use crate::api::normalize_tag;
use crate::domain::{CollectedPlayer, TagRosterRecord, TrophyCategory};

/// What happened to a player offered to the crawl state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Added(TrophyCategory),
    AlreadyCollected,
    CategoryFull(TrophyCategory),
}

/// Everything the snowball crawl accumulates during one run.
///
/// Collected players and category buckets always agree: a player is in the
/// map if and only if its tag is in exactly one bucket.
#[derive(Debug)]
pub struct CrawlState {
    collected: HashMap<String, CollectedPlayer>,
    buckets: BTreeMap<TrophyCategory, Vec<String>>,
    pending_clubs: HashSet<String>,
    visited_clubs: HashSet<String>,
    clubs_explored: usize,
    category_cap: Option<usize>,
}

impl CrawlState {
    pub fn new(category_cap: Option<usize>) -> Self {
        let buckets = TrophyCategory::ALL
            .iter()
            .map(|c| (*c, Vec::new()))
            .collect();

        Self {
            collected: HashMap::new(),
            buckets,
            pending_clubs: HashSet::new(),
            visited_clubs: HashSet::new(),
            clubs_explored: 0,
            category_cap,
        }
    }

    /// Collect a player and classify it into its trophy bucket
    pub fn insert_player(&mut self, mut player: CollectedPlayer) -> InsertOutcome {
        player.tag = normalize_tag(&player.tag);
        if self.collected.contains_key(&player.tag) {
            return InsertOutcome::AlreadyCollected;
        }

        let category = player.category();
        if self.is_category_full(category) {
            return InsertOutcome::CategoryFull(category);
        }

        self.buckets
            .entry(category)
            .or_default()
            .push(player.tag.clone());
        self.collected.insert(player.tag.clone(), player);
        InsertOutcome::Added(category)
    }

    /// Queue a club for expansion. Returns `false` if it is already queued or visited.
    pub fn enqueue_club(&mut self, tag: &str) -> bool {
        let tag = normalize_tag(tag);
        if self.visited_clubs.contains(&tag) {
            return false;
        }
        self.pending_clubs.insert(tag)
    }

    /// Take any pending club, marking it visited and counting it as explored
    pub fn next_club(&mut self) -> Option<String> {
        let tag = self.pending_clubs.iter().next().cloned()?;
        self.pending_clubs.remove(&tag);
        self.visited_clubs.insert(tag.clone());
        self.clubs_explored += 1;
        Some(tag)
    }

    pub fn is_collected(&self, tag: &str) -> bool {
        self.collected.contains_key(&normalize_tag(tag))
    }

    pub fn collected_count(&self) -> usize {
        self.collected.len()
    }

    pub fn clubs_explored(&self) -> usize {
        self.clubs_explored
    }

    pub fn pending_count(&self) -> usize {
        self.pending_clubs.len()
    }

    pub fn is_visited(&self, tag: &str) -> bool {
        self.visited_clubs.contains(&normalize_tag(tag))
    }

    pub fn category_cap(&self) -> Option<usize> {
        self.category_cap
    }

    pub fn category_count(&self, category: TrophyCategory) -> usize {
        self.buckets.get(&category).map_or(0, Vec::len)
    }

    /// Bucket sizes in category order
    pub fn bucket_counts(&self) -> Vec<(TrophyCategory, usize)> {
        TrophyCategory::ALL
            .iter()
            .map(|c| (*c, self.category_count(*c)))
            .collect()
    }

    pub fn is_category_full(&self, category: TrophyCategory) -> bool {
        self.category_cap
            .is_some_and(|cap| self.category_count(category) >= cap)
    }

    /// `true` only when a cap is set and every bucket has reached it
    pub fn categories_full(&self) -> bool {
        self.category_cap.is_some() && self.needed_categories().is_empty()
    }

    pub fn needed_categories(&self) -> Vec<TrophyCategory> {
        TrophyCategory::ALL
            .iter()
            .copied()
            .filter(|c| !self.is_category_full(*c))
            .collect()
    }

    pub fn players(&self) -> impl Iterator<Item = &CollectedPlayer> {
        self.collected.values()
    }

    /// Roster rows grouped by category, in discovery order within each bucket
    pub fn roster(&self) -> Vec<TagRosterRecord> {
        self.buckets
            .iter()
            .flat_map(|(category, tags)| {
                tags.iter()
                    .filter_map(|tag| self.collected.get(tag))
                    .map(move |player| TagRosterRecord::from_player(player, *category))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(tag: &str, trophies: u32) -> CollectedPlayer {
        CollectedPlayer {
            tag: tag.to_string(),
            name: format!("name {}", tag),
            trophies,
            club_tag: None,
            club_name: String::new(),
        }
    }

    #[test]
    fn buckets_partition_collected_players() {
        let mut state = CrawlState::new(None);
        state.insert_player(player("#A", 100));
        state.insert_player(player("#B", 16_000));
        state.insert_player(player("#C", 99_000));
        assert_eq!(state.insert_player(player("#a", 5)), InsertOutcome::AlreadyCollected);

        let total: usize = state.bucket_counts().iter().map(|(_, n)| n).sum();
        assert_eq!(total, state.collected_count());
        assert_eq!(state.category_count(TrophyCategory::Advanced), 1);
        assert!(!state.categories_full());
    }

    #[test]
    fn respects_category_cap() {
        let mut state = CrawlState::new(Some(1));
        assert_eq!(
            state.insert_player(player("#A", 100)),
            InsertOutcome::Added(TrophyCategory::Beginners)
        );
        assert_eq!(
            state.insert_player(player("#B", 200)),
            InsertOutcome::CategoryFull(TrophyCategory::Beginners)
        );
        assert!(!state.is_collected("#B"));
        assert_eq!(state.needed_categories().len(), 6);
    }

    #[test]
    fn clubs_are_visited_once() {
        let mut state = CrawlState::new(None);
        assert!(state.enqueue_club("#CLUB"));
        assert!(!state.enqueue_club("club"));

        assert_eq!(state.next_club().as_deref(), Some("#CLUB"));
        assert!(!state.enqueue_club("#CLUB"));
        assert!(state.next_club().is_none());
        assert_eq!(state.clubs_explored(), 1);
        assert!(state.is_visited("#club"));
    }

    #[test]
    fn roster_is_grouped_by_category() {
        let mut state = CrawlState::new(None);
        state.insert_player(player("#HIGH", 95_000));
        state.insert_player(player("#LOW", 10));
        state.insert_player(player("#MID", 40_000));

        let categories: Vec<TrophyCategory> = state.roster().iter().map(|r| r.trophy_category).collect();
        assert_eq!(
            categories,
            vec![TrophyCategory::Beginners, TrophyCategory::Expert, TrophyCategory::Mythical]
        );
    }
}
