//! Request handlers for the report pages.
//!
//! Handlers degrade rather than fail: an upstream error for one season
//! contributes empty rows, a missing form selection renders an empty
//! table, and only unexpected internal failures surface as a 500.

use axum::Form;
use axum::extract::State;
use axum::response::Html;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::analysis::{
    self, HeadToHeadRecord, filter_by_owner, head_to_head_records, season_records,
    week_score_records,
};
use crate::constants::{FIRST_WEEK, LAST_WEEK};
use crate::data_fetcher::models::{DraftPickRow, MatchupRow, TeamSeasonRow};
use crate::data_fetcher::names::normalize_table;
use crate::data_fetcher::{box_scores_for_years, draft, teams_for_years};
use crate::error::AppError;
use crate::report;

use super::AppState;

/// Year selection posted from a report form. An absent or empty value
/// means "no filter".
#[derive(Debug, Deserialize)]
pub struct YearSelection {
    #[serde(default)]
    pub year: Option<String>,
}

impl YearSelection {
    fn parsed(&self) -> Option<i32> {
        self.year
            .as_deref()
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse().ok())
    }
}

/// Owner selection posted from the head-to-head form.
#[derive(Debug, Deserialize)]
pub struct OwnerSelection {
    #[serde(default)]
    pub owner: Option<String>,
}

/// Normalized team rows across the configured season window.
/// Normalization runs after the per-year tables are concatenated, since
/// cached rows arrive with raw league-reported names.
async fn load_all_teams(state: &AppState) -> Vec<TeamSeasonRow> {
    let mut rows = teams_for_years(&state.client, &state.cache, state.config.seasons()).await;
    normalize_table(&mut rows);
    rows
}

/// Normalized box scores for the given seasons.
async fn load_box_scores(state: &AppState, years: Vec<i32>) -> Vec<MatchupRow> {
    let mut rows = box_scores_for_years(&state.client, &state.cache, years).await;
    normalize_table(&mut rows);
    rows
}

fn owner_roster(teams: &[TeamSeasonRow]) -> Vec<String> {
    analysis::all_owners(teams)
}

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let teams = load_all_teams(&state).await;
    let owners = owner_roster(&teams);
    Ok(Html(report::index_page(state.config.seasons(), &owners)))
}

async fn render_box_scores(
    state: &AppState,
    selected_year: Option<i32>,
) -> Result<Html<String>, AppError> {
    let years: Vec<i32> = match selected_year {
        Some(year) => vec![year],
        None => state.config.seasons().collect(),
    };
    let rows = load_box_scores(state, years).await;
    Ok(Html(report::box_scores_page(&rows, state.config.seasons())))
}

pub async fn box_scores(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    render_box_scores(&state, None).await
}

pub async fn box_scores_post(
    State(state): State<Arc<AppState>>,
    Form(selection): Form<YearSelection>,
) -> Result<Html<String>, AppError> {
    render_box_scores(&state, selection.parsed()).await
}

async fn render_teams(
    state: &AppState,
    selected_year: Option<i32>,
) -> Result<Html<String>, AppError> {
    let year = selected_year.unwrap_or(state.config.last_season);
    let mut rows = teams_for_years(&state.client, &state.cache, [year]).await;
    normalize_table(&mut rows);
    Ok(Html(report::teams_page(&rows, state.config.seasons())))
}

pub async fn teams(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    render_teams(&state, None).await
}

pub async fn teams_post(
    State(state): State<Arc<AppState>>,
    Form(selection): Form<YearSelection>,
) -> Result<Html<String>, AppError> {
    render_teams(&state, selection.parsed()).await
}

pub async fn records(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let (teams, box_scores) = futures::join!(
        load_all_teams(&state),
        load_box_scores(&state, state.config.seasons().collect()),
    );

    let mut entries = season_records(&teams);
    entries.extend(week_score_records(&box_scores, FIRST_WEEK..=LAST_WEEK));

    info!("Computed {} record entries", entries.len());
    Ok(Html(report::records_page(&entries)))
}

async fn render_head_to_head(
    state: &AppState,
    selected_owner: Option<String>,
) -> Result<Html<String>, AppError> {
    let teams = load_all_teams(state).await;
    let owners = owner_roster(&teams);

    let rows: Vec<HeadToHeadRecord> = match selected_owner.filter(|o| !o.is_empty()) {
        Some(owner) => {
            let box_scores = load_box_scores(state, state.config.seasons().collect()).await;
            let mut records = head_to_head_records(&box_scores);
            // Cached rows were normalized before aggregation, but keep
            // the output table normalized regardless of input source
            normalize_table(&mut records);
            filter_by_owner(records, &owner)
        }
        None => Vec::new(),
    };

    Ok(Html(report::head_to_head_page(&rows, &owners)))
}

pub async fn head_to_head(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    render_head_to_head(&state, None).await
}

pub async fn head_to_head_post(
    State(state): State<Arc<AppState>>,
    Form(selection): Form<OwnerSelection>,
) -> Result<Html<String>, AppError> {
    render_head_to_head(&state, selection.owner).await
}

async fn render_draft_data(
    state: &AppState,
    selected_year: Option<i32>,
) -> Result<Html<String>, AppError> {
    let rows: Vec<DraftPickRow> = match selected_year {
        Some(year) => {
            let mut rows = load_draft_table(state);
            rows.retain(|r| r.year == year);
            rows
        }
        // No selection renders just the form, matching the other
        // posted-filter reports
        None => Vec::new(),
    };

    Ok(Html(report::draft_page(&rows, state.config.seasons())))
}

/// Draft picks are re-read from the CSV directory on every request;
/// they are never cached.
fn load_draft_table(state: &AppState) -> Vec<DraftPickRow> {
    let Some(dir) = &state.config.draft_dir else {
        warn!("Draft CSV directory is not configured");
        return Vec::new();
    };
    match draft::load_draft_picks(Path::new(dir)) {
        Ok(mut rows) => {
            normalize_table(&mut rows);
            rows
        }
        Err(e) => {
            warn!("Could not load draft data: {}", e);
            Vec::new()
        }
    }
}

pub async fn draft_data(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    render_draft_data(&state, None).await
}

pub async fn draft_data_post(
    State(state): State<Arc<AppState>>,
    Form(selection): Form<YearSelection>,
) -> Result<Html<String>, AppError> {
    render_draft_data(&state, selection.parsed()).await
}
