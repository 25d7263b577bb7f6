pub mod csv_sink;
pub mod tag_input;

pub use csv_sink::{export_store, write_roster, write_table};
pub use tag_input::load_player_tags;
