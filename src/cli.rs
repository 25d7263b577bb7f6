use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Brawl Stars player, battle and club harvester")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch players, brawlers and battle logs for the tags in a CSV file
    Collect {
        /// CSV file with a `player_tag` column
        #[arg(short, long)]
        tags: PathBuf,
        /// Directory for the exported CSV files
        #[arg(short, long, default_value = "brawl_stars_data")]
        output: PathBuf,
        /// Pause before every API request, in milliseconds
        #[arg(long, default_value_t = 100)]
        delay_ms: u64,
        /// Identify battles by time and participants instead of time and requesting player
        #[arg(long)]
        canonical_battle_keys: bool,
    },
    /// Discover player tags by crawling the clubs of seed players
    Snowball {
        /// Seed player tag (repeatable, defaults to a few example tags)
        #[arg(short, long = "seed")]
        seeds: Vec<String>,
        /// Maximum number of clubs to explore
        #[arg(long, default_value_t = 50)]
        max_clubs: usize,
        /// Stop once this many players are collected
        #[arg(long, default_value_t = 1000)]
        target: usize,
        /// Maximum players kept per trophy category
        #[arg(long, default_value_t = 150, conflicts_with = "no_category_cap")]
        per_category: usize,
        /// Keep every discovered player regardless of category
        #[arg(long)]
        no_category_cap: bool,
        /// Directory for the player tag roster
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_collect_defaults() {
        let cli = Cli::parse_from(["brawl_harvest", "collect", "--tags", "tags.csv"]);
        assert_eq!(
            cli.command,
            Command::Collect {
                tags: PathBuf::from("tags.csv"),
                output: PathBuf::from("brawl_stars_data"),
                delay_ms: 100,
                canonical_battle_keys: false,
            }
        );
    }

    #[test]
    fn parses_multi_word_flags() {
        let cli = Cli::parse_from([
            "brawl_harvest",
            "snowball",
            "--max-clubs",
            "7",
            "--per-category",
            "20",
            "--target",
            "300",
        ]);
        match cli.command {
            Command::Snowball {
                max_clubs,
                per_category,
                target,
                no_category_cap,
                ..
            } => {
                assert_eq!((max_clubs, per_category, target), (7, 20, 300));
                assert!(!no_category_cap);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let cli = Cli::parse_from([
            "brawl_harvest",
            "collect",
            "-t",
            "tags.csv",
            "--delay-ms",
            "250",
            "--canonical-battle-keys",
        ]);
        assert_eq!(
            cli.command,
            Command::Collect {
                tags: PathBuf::from("tags.csv"),
                output: PathBuf::from("brawl_stars_data"),
                delay_ms: 250,
                canonical_battle_keys: true,
            }
        );
    }

    #[test]
    fn category_cap_flags_conflict() {
        let result = Cli::try_parse_from([
            "brawl_harvest",
            "snowball",
            "--per-category",
            "20",
            "--no-category-cap",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_repeated_seeds() {
        let cli = Cli::parse_from([
            "brawl_harvest",
            "snowball",
            "--seed",
            "#2G09L9QRC",
            "-s",
            "#8Y8CC02J",
            "--no-category-cap",
        ]);
        match cli.command {
            Command::Snowball {
                seeds,
                no_category_cap,
                max_clubs,
                ..
            } => {
                assert_eq!(seeds, vec!["#2G09L9QRC", "#8Y8CC02J"]);
                assert!(no_category_cap);
                assert_eq!(max_clubs, 50);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
