use colored::Colorize;
use std::path::PathBuf;

use crate::crawler::StopReason;
use crate::domain::{CategoryStats, CollectionAnalysis};
use crate::services::snowball::SnowballOutcome;

/// Print the collection analysis and where the roster went
pub fn print_snowball_report(outcome: &SnowballOutcome) {
    println!("\n{}", "COLLECTION ANALYSIS".bold());
    println!("{}", "=".repeat(50));

    print_categories(&outcome.analysis);
    print_overall(&outcome.analysis);

    let expansion = &outcome.summary.expansion;
    println!(
        "\nClubs explored: {} ({} without members), stopped: {}",
        expansion.clubs_explored,
        expansion.clubs_failed,
        describe_stop(expansion.stop_reason)
    );

    match &outcome.roster_path {
        Some(path) => println!("{} {}", "Player tags saved to:".green(), path.display()),
        None => println!("{}", "No players collected - check your seed player tags".red()),
    }
}

/// Print the files written by a collect run
pub fn print_export_report(written: &[PathBuf]) {
    println!("\n{}", "=".repeat(50));
    println!("{}", "DATA COLLECTION COMPLETE!".bold());
    println!("{}", "=".repeat(50));

    if written.is_empty() {
        println!("{}", "Nothing was collected, no files written".yellow());
        return;
    }
    for path in written {
        println!("- {}", path.display());
    }
}

fn print_categories(analysis: &CollectionAnalysis) {
    match analysis.categories.first().and_then(|c| c.cap) {
        Some(cap) => println!("Players per category (target: {} each):", cap),
        None => println!("Players per category:"),
    }

    for stats in &analysis.categories {
        println!("  {}", format_category(stats));
    }
    println!("\nTotal players collected: {}", analysis.total());
}

fn format_category(stats: &CategoryStats) -> String {
    let count = match (stats.cap, stats.completion_pct()) {
        (Some(cap), Some(pct)) => format!("{}/{} ({:.1}%)", stats.count, cap, pct),
        _ => stats.count.to_string(),
    };
    let label = format!("{} [{}]", stats.category, stats.category.range_label());

    match &stats.trophies {
        Some(t) => {
            let line = format!(
                "{}: {} - avg {:.0} (range {}-{})",
                label, count, t.average, t.min, t.max
            );
            if stats.is_full() {
                line.green().to_string()
            } else {
                line
            }
        }
        None => format!("{}: {}", label, count).red().to_string(),
    }
}

fn print_overall(analysis: &CollectionAnalysis) {
    let Some(overall) = &analysis.overall else {
        return;
    };
    println!("\nOverall trophy statistics:");
    println!("  Min: {}", overall.min);
    println!("  Max: {}", overall.max);
    println!("  Average: {:.0}", overall.average);
    println!("  Median: {}", overall.median);
}

fn describe_stop(reason: StopReason) -> &'static str {
    match reason {
        StopReason::PlayerTarget => "player target reached",
        StopReason::ClubBudget => "club budget used up",
        StopReason::CategoriesFull => "every category is full",
        StopReason::FrontierExhausted => "no more clubs to explore",
    }
}
