use serde::Serialize;
use std::fmt;

/// Trophy bracket a player falls into.
///
/// Variants are declared in ascending trophy order, so the derived `Ord`
/// matches the order of the ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrophyCategory {
    Beginners,    // 0-5K
    Intermediate, // 5K-15K
    Advanced,     // 15K-30K
    Expert,       // 30K-50K
    Master,       // 50K-70K
    Legendary,    // 70K-90K
    Mythical,     // 90K+
}

impl TrophyCategory {
    pub const ALL: [TrophyCategory; 7] = [
        TrophyCategory::Beginners,
        TrophyCategory::Intermediate,
        TrophyCategory::Advanced,
        TrophyCategory::Expert,
        TrophyCategory::Master,
        TrophyCategory::Legendary,
        TrophyCategory::Mythical,
    ];

    pub fn from_trophies(trophies: u32) -> Self {
        match trophies {
            0..5_000 => Self::Beginners,
            5_000..15_000 => Self::Intermediate,
            15_000..30_000 => Self::Advanced,
            30_000..50_000 => Self::Expert,
            50_000..70_000 => Self::Master,
            70_000..90_000 => Self::Legendary,
            _ => Self::Mythical,
        }
    }

    /// Inclusive lower bound of the range
    pub fn lower_bound(&self) -> u32 {
        match self {
            Self::Beginners => 0,
            Self::Intermediate => 5_000,
            Self::Advanced => 15_000,
            Self::Expert => 30_000,
            Self::Master => 50_000,
            Self::Legendary => 70_000,
            Self::Mythical => 90_000,
        }
    }

    /// Exclusive upper bound, `None` for the open-ended top bracket
    pub fn upper_bound(&self) -> Option<u32> {
        let next = Self::ALL.iter().skip_while(|c| *c != self).nth(1);
        next.map(|c| c.lower_bound())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginners => "beginners",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
            Self::Master => "master",
            Self::Legendary => "legendary",
            Self::Mythical => "mythical",
        }
    }

    /// Short range label such as `5K-15K`
    pub fn range_label(&self) -> String {
        let lower = self.lower_bound() / 1000;
        match self.upper_bound() {
            Some(upper) if lower == 0 => format!("0-{}K", upper / 1000),
            Some(upper) => format!("{}K-{}K", lower, upper / 1000),
            None => format!("{}K+", lower),
        }
    }
}

impl fmt::Display for TrophyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a trophy count
pub fn categorize(trophies: u32) -> TrophyCategory {
    TrophyCategory::from_trophies(trophies)
}
