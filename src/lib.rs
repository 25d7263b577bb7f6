pub mod api;
pub mod cli;
pub mod config;
pub mod crawler;
pub mod domain;
pub mod errors;
pub mod export;
pub mod http;
pub mod rate_limiter;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use std::path::Path;

use crate::api::BrawlStarsClient;
use crate::cli::Command;
use crate::config::{AppConfig, resolve_api_token, resolve_seed_tags};
use crate::domain::BattleKeyStrategy;
use crate::errors::ConfigError;
use crate::services::report::{print_export_report, print_snowball_report};
use crate::services::{CollectorService, SnowballService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_collect(
    tags_path: &Path,
    config: AppConfig,
    key_strategy: BattleKeyStrategy,
) -> Result<()> {
    let player_tags = export::load_player_tags(tags_path)?;
    let token = resolve_api_token()?;

    let client = BrawlStarsClient::connect(&token, &config.api)?;
    let mut service = CollectorService::new(client, key_strategy);

    let runtime = tokio::runtime::Runtime::new()?;
    let written = runtime.block_on(service.run(&player_tags, &config.export.output_dir))?;
    print_export_report(&written);
    Ok(())
}

pub fn handle_snowball(seeds: Vec<String>, config: AppConfig) -> Result<()> {
    let seeds = resolve_seed_tags(seeds);
    if seeds.is_empty() {
        return Err(ConfigError::NoSeeds.into());
    }
    let token = resolve_api_token()?;

    let client = BrawlStarsClient::connect(&token, &config.api)?;
    let mut service = SnowballService::new(client, config.crawl);

    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(service.run(&seeds, &config.export.output_dir))?;
    print_snowball_report(&outcome);
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
