pub mod analysis;
pub mod category;
mod collection;
pub mod models;
pub mod normalize;
mod progress;
pub mod records;

pub use analysis::{CategoryStats, CollectionAnalysis, TrophyStats, analyze};
pub use category::{TrophyCategory, categorize};
pub use collection::{RecordStore, StoreSummary};
pub use normalize::{BattleKeyStrategy, ClubRoster, NormalizedBattle, NormalizedPlayer};
pub use progress::FetchProgress;
pub use records::*;
