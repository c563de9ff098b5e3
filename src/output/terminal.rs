// Colored terminal output for the CLI's resolve / percentage / ranking commands.

use colored::Colorize;

use super::truncate_chars;
use crate::stats::ranking::{RankedCountry, Statistic};
use crate::stats::{CountryDirectoryEntry, CountryTotals, PercentageReport, ResolutionResult};

/// Widest country name shown in tables before truncation.
const NAME_WIDTH: usize = 32;

/// Display the outcome of resolving a query.
pub fn display_resolution(query: &str, resolution: &ResolutionResult) {
    match resolution {
        ResolutionResult::NoMatch => {
            println!("{} No country matches {:?}", "x".red(), query);
        }
        ResolutionResult::SingleMatch(entry) => {
            println!("{} {}", "✓".green(), format_entry(entry));
        }
        ResolutionResult::MultipleMatches(entries) => {
            println!(
                "{}",
                format!("{} countries match {:?}:", entries.len(), query).yellow()
            );
            for (i, entry) in entries.iter().enumerate() {
                println!("  {:>3}. {}", i + 1, format_entry(entry));
            }
        }
    }
}

/// Display a country's latest daily totals.
pub fn display_totals(totals: &CountryTotals) {
    println!(
        "\n{}",
        format!("=== {} ({}) ===", totals.country, totals.date.format("%Y-%m-%d")).bold()
    );
    println!("  Confirmed: {:>12}", totals.confirmed);
    println!("  Deaths:    {:>12}", totals.deaths);
    println!("  Recovered: {:>12}", totals.recovered);
    println!("  Active:    {:>12}", totals.active);
}

/// Display a percentage-of-global report.
pub fn display_percentage_report(report: &PercentageReport) {
    println!("\n{}", report.description().bold());
    println!();
    println!(
        "  Deaths as % of global deaths       {:>8.2}",
        report.deaths_pct_of_global
    );
    println!(
        "  Cases as % of global cases         {:>8.2}",
        report.cases_pct_of_global
    );
    println!(
        "  Recovered as % of global recovered {:>8.2}",
        report.recovered_pct_of_global
    );
    println!();
    println!("  Death rate (global)                {:>8.2}", report.death_rate_global);

    let country_rate = format!("{:>8.2}", report.death_rate_country);
    let country_rate = if report.death_rate_country > report.death_rate_global {
        country_rate.red()
    } else {
        country_rate.green()
    };
    let label = format!("Death rate ({})", truncate_chars(&report.country, 20));
    println!("  {label:<35}{country_rate}");
}

/// Display a ranking table.
pub fn display_ranking(stat: Statistic, ranked: &[RankedCountry]) {
    if ranked.is_empty() {
        println!("Nothing to rank.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Countries by {} ({}) ===", stat, ranked.len()).bold()
    );
    println!();
    println!(
        "  {:>4}  {:<35} {:>14}",
        "Rank".dimmed(),
        "Country".dimmed(),
        stat.as_str().dimmed(),
    );
    println!("  {}", "-".repeat(56).dimmed());

    for place in ranked {
        println!(
            "  {:>4}. {:<35} {:>14}",
            place.rank,
            truncate_chars(&place.country, NAME_WIDTH),
            place.value,
        );
    }
    println!();
}

fn format_entry(entry: &CountryDirectoryEntry) -> String {
    format!(
        "{} {} {}",
        entry.name.bold(),
        format!("[{}]", entry.iso2).cyan(),
        entry.slug.dimmed()
    )
}
