mod snowball;
mod state;

pub use snowball::{
    CrawlSummary, ExpansionReport, SeedReport, StopReason, expand_clubs, resolve_seeds,
    run_snowball,
};
pub use state::{CrawlState, InsertOutcome};
