use anyhow::Result;

use brawl_harvest::cli::Command;
use brawl_harvest::config::AppConfig;
use brawl_harvest::domain::BattleKeyStrategy;
use brawl_harvest::{handle_collect, handle_completions, handle_snowball, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    let mut config = AppConfig::new();

    match command {
        Command::Collect {
            tags,
            output,
            delay_ms,
            canonical_battle_keys,
        } => {
            config.api.request_delay_ms = delay_ms;
            config.export.output_dir = output;
            let key_strategy = if canonical_battle_keys {
                BattleKeyStrategy::Canonical
            } else {
                BattleKeyStrategy::PerPlayer
            };
            handle_collect(&tags, config, key_strategy)
        }
        Command::Snowball {
            seeds,
            max_clubs,
            target,
            per_category,
            no_category_cap,
            output,
        } => {
            config.crawl.max_clubs = max_clubs;
            config.crawl.target_players = target;
            config.crawl.max_players_per_category = (!no_category_cap).then_some(per_category);
            config.export.output_dir = output;
            handle_snowball(seeds, config)
        }
        Command::Completions { shell } => handle_completions(shell),
    }
}
