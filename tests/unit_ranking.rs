// Unit tests for the ranking helper: ordering, stability, and unknown names.

use chrono::{TimeZone, Utc};

use covid_watch::stats::ranking::{rank_by, Statistic};
use covid_watch::stats::{rank, CountrySummary, StatsError, WatchLevel};

fn summary(name: &str, total_deaths: i64, new_confirmed: i64) -> CountrySummary {
    CountrySummary {
        country: name.to_string(),
        slug: name.to_lowercase(),
        date: Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
        new_confirmed,
        new_deaths: 0,
        new_recovered: 0,
        total_confirmed: total_deaths * 20,
        total_deaths,
        total_recovered: 0,
        watch_level: None,
    }
}

fn ranked_names(summaries: &[CountrySummary], stat: &str) -> Vec<(usize, String)> {
    rank(summaries, stat)
        .unwrap()
        .into_iter()
        .map(|r| (r.rank, r.country))
        .collect()
}

#[test]
fn descending_with_dense_ranks() {
    let input = vec![summary("A", 1, 0), summary("B", 9, 0), summary("C", 4, 0)];
    let ranked = rank(&input, "TotalDeaths").unwrap();
    let rows: Vec<(usize, &str, i64)> = ranked
        .iter()
        .map(|r| (r.rank, r.country.as_str(), r.value))
        .collect();
    assert_eq!(rows, vec![(1, "B", 9), (2, "C", 4), (3, "A", 1)]);
}

#[test]
fn ties_keep_input_order() {
    let input = vec![summary("A", 5, 0), summary("B", 5, 0), summary("C", 3, 0)];
    assert_eq!(
        ranked_names(&input, "TotalDeaths"),
        vec![(1, "A".to_string()), (2, "B".to_string()), (3, "C".to_string())]
    );

    // Reversed input: B now comes first among the tied pair
    let input = vec![summary("B", 5, 0), summary("A", 5, 0), summary("C", 3, 0)];
    assert_eq!(
        ranked_names(&input, "TotalDeaths"),
        vec![(1, "B".to_string()), (2, "A".to_string()), (3, "C".to_string())]
    );
}

#[test]
fn all_equal_values_preserve_order() {
    let input: Vec<_> = ["E", "D", "C", "B", "A"]
        .iter()
        .map(|n| summary(n, 7, 0))
        .collect();
    let names: Vec<String> = ranked_names(&input, "TotalDeaths")
        .into_iter()
        .map(|(_, n)| n)
        .collect();
    assert_eq!(names, vec!["E", "D", "C", "B", "A"]);
}

#[test]
fn negative_corrections_rank_last() {
    // The provider occasionally reports negative daily values after corrections
    let input = vec![summary("A", 0, -12), summary("B", 0, 30), summary("C", 0, 0)];
    let ranked = rank(&input, "NewConfirmed").unwrap();
    let values: Vec<i64> = ranked.iter().map(|r| r.value).collect();
    assert_eq!(values, vec![30, 0, -12]);
}

#[test]
fn unknown_statistic_is_rejected_and_input_untouched() {
    let input = vec![summary("B", 1, 0), summary("A", 2, 0)];
    let before = input.clone();

    let err = rank(&input, "Happiness").unwrap_err();
    assert_eq!(err, StatsError::UnknownStatistic("Happiness".to_string()));
    assert_eq!(input, before);
}

#[test]
fn string_fields_are_not_rankable() {
    let input = vec![summary("A", 1, 0)];
    assert!(matches!(
        rank(&input, "Country"),
        Err(StatsError::UnknownStatistic(_))
    ));
}

#[test]
fn empty_input_ranks_to_empty() {
    assert!(rank(&[], "TotalDeaths").unwrap().is_empty());
}

#[test]
fn watch_level_does_not_affect_ranking() {
    let input = vec![
        summary("A", 1, 0).with_watch_level(WatchLevel::High),
        summary("B", 2, 0).with_watch_level(WatchLevel::Low),
    ];
    let ranked = rank_by(&input, Statistic::TotalDeaths);
    assert_eq!(ranked[0].country, "B");
    assert_eq!(ranked[1].country, "A");
}
