use super::category::TrophyCategory;
use super::records::CollectedPlayer;

/// Per-category breakdown of a snowball collection
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStats {
    pub category: TrophyCategory,
    pub count: usize,
    pub cap: Option<usize>,
    pub trophies: Option<TrophyStats>,
}

impl CategoryStats {
    /// Share of the cap already filled, in percent
    pub fn completion_pct(&self) -> Option<f64> {
        self.cap
            .filter(|cap| *cap > 0)
            .map(|cap| self.count as f64 / cap as f64 * 100.0)
    }

    pub fn is_full(&self) -> bool {
        self.cap.is_some_and(|cap| self.count >= cap)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrophyStats {
    pub min: u32,
    pub max: u32,
    pub average: f64,
    pub median: u32,
}

impl TrophyStats {
    pub fn from_values(values: &[u32]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_unstable();

        let sum: u64 = sorted.iter().map(|v| u64::from(*v)).sum();
        Some(Self {
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            average: sum as f64 / sorted.len() as f64,
            median: sorted[sorted.len() / 2],
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionAnalysis {
    pub categories: Vec<CategoryStats>,
    pub overall: Option<TrophyStats>,
}

impl CollectionAnalysis {
    pub fn total(&self) -> usize {
        self.categories.iter().map(|c| c.count).sum()
    }
}

pub fn analyze<'a>(
    players: impl IntoIterator<Item = &'a CollectedPlayer>,
    cap: Option<usize>,
) -> CollectionAnalysis {
    let mut per_category: Vec<Vec<u32>> = vec![Vec::new(); TrophyCategory::ALL.len()];
    let mut all = Vec::new();

    for player in players {
        let index = TrophyCategory::ALL
            .iter()
            .position(|c| *c == player.category())
            .unwrap_or(0);
        per_category[index].push(player.trophies);
        all.push(player.trophies);
    }

    let categories = TrophyCategory::ALL
        .iter()
        .zip(per_category)
        .map(|(category, values)| CategoryStats {
            category: *category,
            count: values.len(),
            cap,
            trophies: TrophyStats::from_values(&values),
        })
        .collect();

    CollectionAnalysis {
        categories,
        overall: TrophyStats::from_values(&all),
    }
}
