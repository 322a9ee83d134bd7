//! Season and career superlatives ("records").
//!
//! Every statistic of the team-season table gets a max and a min entry;
//! the box-score table contributes the highest and lowest single-week
//! score. All extremes use stable first-occurrence selection: when
//! several rows share the extreme value, the earliest row in input
//! order wins, for max and min alike.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::data_fetcher::models::{MatchupRow, NO_OWNER, TeamSeasonRow};

/// One superlative: the row achieving an extreme of one statistic,
/// with the context that achieved it. `week` is set only for
/// single-game extremes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub statistic: String,
    pub value: f64,
    pub owners: String,
    pub year: i32,
    pub week: Option<u32>,
}

/// First row in input order achieving the maximum of `stat`.
fn first_max_by<T, F: Fn(&T) -> f64>(rows: &[T], stat: F) -> Option<&T> {
    let mut best: Option<(&T, f64)> = None;
    for row in rows {
        let value = stat(row);
        // Strict comparison keeps the first occurrence on ties
        if best.is_none_or(|(_, b)| value > b) {
            best = Some((row, value));
        }
    }
    best.map(|(row, _)| row)
}

/// First row in input order achieving the minimum of `stat`.
fn first_min_by<T, F: Fn(&T) -> f64>(rows: &[T], stat: F) -> Option<&T> {
    let mut best: Option<(&T, f64)> = None;
    for row in rows {
        let value = stat(row);
        if best.is_none_or(|(_, b)| value < b) {
            best = Some((row, value));
        }
    }
    best.map(|(row, _)| row)
}

fn team_entry(statistic: &str, row: &TeamSeasonRow, value: f64) -> RecordEntry {
    RecordEntry {
        statistic: statistic.to_string(),
        value,
        owners: row.owners.clone(),
        year: row.year,
        week: None,
    }
}

/// Max and min of every season statistic over the given team rows, in
/// a fixed display order. Empty input yields an empty list.
pub fn season_records(teams: &[TeamSeasonRow]) -> Vec<RecordEntry> {
    type Stat = (&'static str, &'static str, fn(&TeamSeasonRow) -> f64);
    const STATS: [Stat; 7] = [
        ("Most points for", "Fewest points for", |t| t.points_for),
        ("Most points against", "Fewest points against", |t| {
            t.points_against
        }),
        ("Most wins", "Fewest wins", |t| t.wins as f64),
        ("Most losses", "Fewest losses", |t| t.losses as f64),
        ("Most acquisitions", "Fewest acquisitions", |t| {
            t.acquisitions as f64
        }),
        ("Most drops", "Fewest drops", |t| t.drops as f64),
        ("Most trades", "Fewest trades", |t| t.trades as f64),
    ];

    let mut entries = Vec::with_capacity(STATS.len() * 2);
    for (max_label, min_label, stat) in STATS {
        if let Some(row) = first_max_by(teams, stat) {
            entries.push(team_entry(max_label, row, stat(row)));
        }
        if let Some(row) = first_min_by(teams, stat) {
            entries.push(team_entry(min_label, row, stat(row)));
        }
    }
    entries
}

/// Highest and lowest single-week scores over the matchups within the
/// given week range.
///
/// Each extreme is located in two passes: first among home scores,
/// then re-selected from the away side only if the away side holds a
/// strictly more extreme value. This keeps selection stable without
/// building a combined home-plus-away column.
pub fn week_score_records(
    matchups: &[MatchupRow],
    weeks: RangeInclusive<u32>,
) -> Vec<RecordEntry> {
    let in_range: Vec<&MatchupRow> = matchups
        .iter()
        .filter(|m| weeks.contains(&m.week))
        .collect();

    let mut entries = Vec::with_capacity(2);

    if let Some(home_best) = first_max_by(&in_range, |m| m.home_score) {
        let away_best = first_max_by(&in_range, |m| m.away_score);
        let entry = match away_best {
            Some(away) if away.away_score > home_best.home_score => RecordEntry {
                statistic: "Highest single-week score".to_string(),
                value: away.away_score,
                owners: away.away_owners.clone(),
                year: away.year,
                week: Some(away.week),
            },
            _ => RecordEntry {
                statistic: "Highest single-week score".to_string(),
                value: home_best.home_score,
                owners: home_best.home_owners.clone(),
                year: home_best.year,
                week: Some(home_best.week),
            },
        };
        entries.push(entry);
    }

    if let Some(home_worst) = first_min_by(&in_range, |m| m.home_score) {
        let away_worst = first_min_by(&in_range, |m| m.away_score);
        let entry = match away_worst {
            Some(away) if away.away_score < home_worst.home_score => RecordEntry {
                statistic: "Lowest single-week score".to_string(),
                value: away.away_score,
                owners: away.away_owners.clone(),
                year: away.year,
                week: Some(away.week),
            },
            _ => RecordEntry {
                statistic: "Lowest single-week score".to_string(),
                value: home_worst.home_score,
                owners: home_worst.home_owners.clone(),
                year: home_worst.year,
                week: Some(home_worst.week),
            },
        };
        entries.push(entry);
    }

    entries
}

/// Sorted distinct owner names across team rows, splitting joined
/// multi-owner entries and skipping the no-owner placeholder.
pub fn all_owners(teams: &[TeamSeasonRow]) -> Vec<String> {
    let mut owners: Vec<String> = teams
        .iter()
        .filter(|t| t.owners != NO_OWNER)
        .flat_map(|t| t.owners.split(", "))
        .map(str::to_string)
        .collect();
    owners.sort();
    owners.dedup();
    owners
}
