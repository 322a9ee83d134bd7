//! Data fetching: league API client, disk cache, owner-name
//! normalization and draft CSV loading.

pub mod api;
pub mod cache;
pub mod draft;
pub mod models;
pub mod names;

use tracing::{info, instrument, warn};

use crate::constants::cache_kind;
use crate::error::AppError;
use api::LeagueClient;
use cache::DiskCache;
use models::{MatchupRow, TeamSeasonRow};

/// Box scores for one season, served from the disk cache when present.
///
/// A season is fetched from the league API at most once per cache
/// lifetime; the fetch always covers the full week range so the cache
/// entry never depends on what a caller later filters to. Returned
/// rows are raw (pre-normalization), exactly as cached.
#[instrument(skip(client, cache))]
pub async fn season_box_scores(
    client: &LeagueClient,
    cache: &DiskCache,
    year: i32,
) -> Result<Vec<MatchupRow>, AppError> {
    if let Some(rows) = cache.get(cache_kind::BOX_SCORES, year).await {
        return Ok(rows);
    }

    let rows = client.fetch_matchups(year).await?;
    if let Err(e) = cache.put(cache_kind::BOX_SCORES, year, &rows).await {
        // A failed cache write just means a refetch next time
        warn!("Could not cache box scores for {}: {}", year, e);
    }
    Ok(rows)
}

/// Team season statistics for one season, served from the disk cache
/// when present. Returned rows are raw (pre-normalization).
#[instrument(skip(client, cache))]
pub async fn season_teams(
    client: &LeagueClient,
    cache: &DiskCache,
    year: i32,
) -> Result<Vec<TeamSeasonRow>, AppError> {
    if let Some(rows) = cache.get(cache_kind::TEAMS, year).await {
        return Ok(rows);
    }

    let rows = client.fetch_teams(year).await?;
    if let Err(e) = cache.put(cache_kind::TEAMS, year, &rows).await {
        warn!("Could not cache team data for {}: {}", year, e);
    }
    Ok(rows)
}

/// Box scores for a year range, concatenated in year order. A year that
/// fails upstream degrades to an empty contribution so the rest of the
/// window still renders.
pub async fn box_scores_for_years(
    client: &LeagueClient,
    cache: &DiskCache,
    years: impl IntoIterator<Item = i32>,
) -> Vec<MatchupRow> {
    let mut all_rows = Vec::new();
    for year in years {
        match season_box_scores(client, cache, year).await {
            Ok(mut rows) => all_rows.append(&mut rows),
            Err(e) => {
                warn!("No box scores for {}: {}", year, e);
            }
        }
    }
    info!("Collected {} box score rows", all_rows.len());
    all_rows
}

/// Team rows for a year range, concatenated in year order, degrading
/// per-year like [`box_scores_for_years`].
pub async fn teams_for_years(
    client: &LeagueClient,
    cache: &DiskCache,
    years: impl IntoIterator<Item = i32>,
) -> Vec<TeamSeasonRow> {
    let mut all_rows = Vec::new();
    for year in years {
        match season_teams(client, cache, year).await {
            Ok(mut rows) => all_rows.append(&mut rows),
            Err(e) => {
                warn!("No team data for {}: {}", year, e);
            }
        }
    }
    info!("Collected {} team rows", all_rows.len());
    all_rows
}
