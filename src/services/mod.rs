pub mod collector;
pub mod report;
pub mod snowball;

pub use collector::CollectorService;
pub use snowball::{SnowballOutcome, SnowballService};
