use log::warn;

use crate::api::normalize_tag;

/// Example seed players for the snowball crawl
///
/// These are illustrative tags, not curated accounts; they may not exist or
/// may sit in small clubs. Any public player tag works as a seed (it is shown
/// in-game on the profile screen), and the more active the seed's club, the
/// more members the first expansion yields. Pass `--seed` to use real ones.
pub fn get_seed_tags() -> Vec<String> {
    ["#2G09L9QRC", "#8Y8CC02J", "#9PYLCCGR"]
        .iter()
        .map(|tag| tag.to_string())
        .collect()
}

/// Seeds given on the command line, or the example list with a warning
pub fn resolve_seed_tags(cli_seeds: Vec<String>) -> Vec<String> {
    if cli_seeds.is_empty() {
        warn!("No --seed given, falling back to the example seed tags");
        warn!("Add real player tags with --seed for a useful crawl");
        return get_seed_tags();
    }
    cli_seeds.iter().map(|tag| normalize_tag(tag)).collect()
}
