//! League API client: URL building, generic fetch with retry logic, and
//! conversion of raw wire responses into report rows.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::config::Config;
use crate::constants::{FIRST_WEEK, HTTP_POOL_MAX_IDLE_PER_HOST, LAST_WEEK, retry};
use crate::data_fetcher::models::{
    LeagueResponse, MatchupRow, TeamSeasonRow, join_owner_names,
};
use crate::error::AppError;

/// Creates a properly configured HTTP client with connection pooling and
/// timeout handling.
pub fn create_http_client(timeout_seconds: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE_PER_HOST)
        .build()
}

/// Client for the fantasy league API. Credentials come from the injected
/// [`Config`] and are sent as session cookies, never inspected.
#[derive(Debug, Clone)]
pub struct LeagueClient {
    client: Client,
    config: Config,
}

impl LeagueClient {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let client = create_http_client(config.http_timeout_seconds)?;
        Ok(Self { client, config })
    }

    /// Builds a client around an existing `reqwest::Client` (used by
    /// tests that point at a mock server).
    pub fn with_client(client: Client, config: Config) -> Self {
        Self { client, config }
    }

    fn league_url(&self, year: i32, views: &[&str]) -> String {
        let mut url = format!(
            "{}/apis/v3/games/ffl/seasons/{}/segments/0/leagues/{}",
            self.config.api_domain.trim_end_matches('/'),
            year,
            self.config.league_id
        );
        for (i, view) in views.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str("view=");
            url.push_str(view);
        }
        url
    }

    fn cookie_header(&self) -> String {
        format!("SWID={}; espn_s2={}", self.config.swid, self.config.espn_s2)
    }

    /// Fetches every matchup of a season as [`MatchupRow`]s, ordered by
    /// week then schedule order. Bye entries (no away side) are skipped.
    ///
    /// The whole season (weeks 1-18) is always fetched in one request so
    /// downstream week filtering never changes what gets cached.
    #[instrument(skip(self))]
    pub async fn fetch_matchups(&self, year: i32) -> Result<Vec<MatchupRow>, AppError> {
        let url = self.league_url(year, &["mMatchupScore", "mTeam"]);
        let response: LeagueResponse = self.fetch(&url).await?;

        let member_names = response.member_names();
        let team_owners: BTreeMap<i64, String> = response
            .teams
            .iter()
            .map(|t| (t.id, join_owner_names(&t.owners, &member_names)))
            .collect();

        let mut rows = Vec::new();
        for week in FIRST_WEEK..=LAST_WEEK {
            for matchup in response
                .schedule
                .iter()
                .filter(|m| m.matchup_period_id == week)
            {
                let (Some(home), Some(away)) = (&matchup.home, &matchup.away) else {
                    continue;
                };
                let owners_for = |team_id: i64| {
                    team_owners
                        .get(&team_id)
                        .cloned()
                        .unwrap_or_else(|| crate::data_fetcher::models::NO_OWNER.to_string())
                };
                rows.push(MatchupRow {
                    year,
                    week,
                    home_owners: owners_for(home.team_id),
                    home_score: home.total_points,
                    away_owners: owners_for(away.team_id),
                    away_score: away.total_points,
                });
            }
        }

        info!("Fetched {} matchup rows for season {}", rows.len(), year);
        Ok(rows)
    }

    /// Fetches per-team season statistics for a season as
    /// [`TeamSeasonRow`]s.
    #[instrument(skip(self))]
    pub async fn fetch_teams(&self, year: i32) -> Result<Vec<TeamSeasonRow>, AppError> {
        let url = self.league_url(year, &["mTeam", "mSettings"]);
        let response: LeagueResponse = self.fetch(&url).await?;

        let member_names = response.member_names();
        let division_names = response.division_names();

        let rows: Vec<TeamSeasonRow> = response
            .teams
            .iter()
            .map(|team| {
                let record = team
                    .record
                    .as_ref()
                    .map(|r| r.overall.clone())
                    .unwrap_or_else(|| {
                        warn!(
                            "Team {} in season {} has no overall record, using zeros",
                            team.id, year
                        );
                        Default::default()
                    });
                let transactions = team.transaction_counter.clone().unwrap_or_default();
                TeamSeasonRow {
                    year,
                    owners: join_owner_names(&team.owners, &member_names),
                    division_name: division_names
                        .get(&team.division_id)
                        .cloned()
                        .unwrap_or_default(),
                    wins: record.wins,
                    losses: record.losses,
                    points_for: record.points_for,
                    points_against: record.points_against,
                    acquisitions: transactions.acquisitions,
                    drops: transactions.drops,
                    trades: transactions.trades,
                }
            })
            .collect();

        info!("Fetched {} team rows for season {}", rows.len(), year);
        Ok(rows)
    }

    /// Generic fetch with retry logic and comprehensive error handling.
    ///
    /// - Retries transient failures (429, 5xx, timeouts, connect errors)
    ///   with exponential backoff, respecting Retry-After headers
    /// - Maps HTTP status codes to specific error variants
    /// - Distinguishes malformed JSON from unexpected structure
    #[instrument(skip(self))]
    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        info!("Fetching data from URL: {url}");

        let mut attempt = 0u32;
        let mut backoff = Duration::from_millis(retry::BASE_DELAY_MS);
        let response = loop {
            let request = self
                .client
                .get(url)
                .header(reqwest::header::COOKIE, self.cookie_header());
            match request.send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if (status.as_u16() == 429 || status.is_server_error())
                        && attempt < retry::MAX_ATTEMPTS
                    {
                        // Respect Retry-After if provided
                        let retry_after = resp
                            .headers()
                            .get(reqwest::header::RETRY_AFTER)
                            .and_then(|h| h.to_str().ok())
                            .and_then(|s| s.parse::<u64>().ok())
                            .map(Duration::from_secs);
                        let wait = retry_after.unwrap_or(backoff);
                        warn!(
                            "Transient {} from {}. Retrying in {:?} (attempt {}/{})",
                            status,
                            url,
                            wait,
                            attempt + 1,
                            retry::MAX_ATTEMPTS
                        );
                        tokio::time::sleep(wait).await;
                        attempt += 1;
                        backoff = backoff.saturating_mul(2);
                        continue;
                    }
                    break resp;
                }
                Err(e) => {
                    if (e.is_timeout() || e.is_connect()) && attempt < retry::MAX_ATTEMPTS {
                        warn!(
                            "Request error {} for {}. Retrying in {:?} (attempt {}/{})",
                            e,
                            url,
                            backoff,
                            attempt + 1,
                            retry::MAX_ATTEMPTS
                        );
                        tokio::time::sleep(backoff).await;
                        attempt += 1;
                        backoff = backoff.saturating_mul(2);
                        continue;
                    }
                    error!("Request failed for URL {}: {}", url, e);
                    return if e.is_timeout() {
                        Err(AppError::network_timeout(url))
                    } else if e.is_connect() {
                        Err(AppError::network_connection(url, e.to_string()))
                    } else {
                        Err(AppError::ApiFetch(e))
                    };
                }
            }
        };

        let status = response.status();
        debug!("Response status: {status}");

        if !status.is_success() {
            let status_code = status.as_u16();
            let reason = status.canonical_reason().unwrap_or("Unknown error");

            error!("HTTP {} - {} (URL: {})", status_code, reason, url);

            return Err(match status_code {
                404 => AppError::api_not_found(url),
                429 => AppError::api_rate_limit(reason, url),
                400..=499 => AppError::api_client_error(status_code, reason, url),
                502 | 503 => AppError::api_service_unavailable(status_code, reason, url),
                _ => AppError::api_server_error(status_code, reason, url),
            });
        }

        let response_text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to read response text from URL {}: {}", url, e);
                return Err(AppError::ApiFetch(e));
            }
        };

        debug!("Response length: {} bytes", response_text.len());

        match serde_json::from_str::<T>(&response_text) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                error!("Failed to parse API response: {} (URL: {})", e, url);

                if response_text.trim().is_empty() {
                    Err(AppError::api_no_data("Response body is empty", url))
                } else if !response_text.trim_start().starts_with('{')
                    && !response_text.trim_start().starts_with('[')
                {
                    Err(AppError::api_malformed_json(
                        "Response is not valid JSON",
                        url,
                    ))
                } else {
                    Err(AppError::api_unexpected_structure(e.to_string(), url))
                }
            }
        }
    }
}
