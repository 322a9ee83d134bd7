use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Display name used when the league reports no owners for a team.
pub const NO_OWNER: &str = "N/A";

/// One matchup result for one week of one season. Owner names of a team
/// are joined into a single `", "`-separated string.
///
/// Rows are cached to disk exactly as the league reported them, before
/// any name normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupRow {
    pub year: i32,
    pub week: u32,
    pub home_owners: String,
    pub home_score: f64,
    pub away_owners: String,
    pub away_score: f64,
}

/// One team's season statistics for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSeasonRow {
    pub year: i32,
    pub owners: String,
    pub division_name: String,
    pub wins: u32,
    pub losses: u32,
    pub points_for: f64,
    pub points_against: f64,
    pub acquisitions: u32,
    pub drops: u32,
    pub trades: u32,
}

/// One historical draft pick, sourced from a year-named CSV file.
/// The year is authoritative from the file name, not the file body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftPickRow {
    pub year: i32,
    pub pick_number: String,
    pub round_pick_number: String,
    pub owner: String,
    pub previous_owners: String,
    pub pick: String,
    pub team: String,
    pub position: String,
}

// Raw league API wire format. Field names mirror the upstream JSON; the
// same response shape serves both the matchup and team views, with the
// unused parts defaulting to empty.

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueResponse {
    #[serde(default)]
    pub teams: Vec<ApiTeam>,
    #[serde(default)]
    pub members: Vec<ApiMember>,
    #[serde(default)]
    pub schedule: Vec<ApiMatchup>,
    #[serde(default)]
    pub settings: Option<ApiSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiTeam {
    pub id: i64,
    #[serde(rename = "divisionId", default)]
    pub division_id: i64,
    /// Member guids; resolved to display names through `members`.
    #[serde(default)]
    pub owners: Vec<String>,
    #[serde(default)]
    pub record: Option<ApiTeamRecord>,
    #[serde(rename = "transactionCounter", default)]
    pub transaction_counter: Option<ApiTransactionCounter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiTeamRecord {
    pub overall: ApiRecordLine,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiRecordLine {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(rename = "pointsFor", default)]
    pub points_for: f64,
    #[serde(rename = "pointsAgainst", default)]
    pub points_against: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiTransactionCounter {
    #[serde(default)]
    pub acquisitions: u32,
    #[serde(default)]
    pub drops: u32,
    #[serde(default)]
    pub trades: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMember {
    pub id: String,
    #[serde(rename = "firstName", default)]
    pub first_name: String,
    #[serde(rename = "lastName", default)]
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMatchup {
    #[serde(rename = "matchupPeriodId")]
    pub matchup_period_id: u32,
    #[serde(default)]
    pub home: Option<ApiMatchupSide>,
    /// Absent on bye weeks; such entries are skipped.
    #[serde(default)]
    pub away: Option<ApiMatchupSide>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMatchupSide {
    #[serde(rename = "teamId")]
    pub team_id: i64,
    #[serde(rename = "totalPoints", default)]
    pub total_points: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(rename = "scheduleSettings", default)]
    pub schedule_settings: Option<ApiScheduleSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiScheduleSettings {
    #[serde(default)]
    pub divisions: Vec<ApiDivision>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiDivision {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

impl LeagueResponse {
    /// Member guid -> "First Last" display name.
    pub fn member_names(&self) -> HashMap<&str, String> {
        self.members
            .iter()
            .map(|m| {
                (
                    m.id.as_str(),
                    format!("{} {}", m.first_name, m.last_name),
                )
            })
            .collect()
    }

    /// Division id -> division name, empty when the settings view was
    /// not part of the request.
    pub fn division_names(&self) -> HashMap<i64, String> {
        self.settings
            .as_ref()
            .and_then(|s| s.schedule_settings.as_ref())
            .map(|s| s.divisions.iter().map(|d| (d.id, d.name.clone())).collect())
            .unwrap_or_default()
    }
}

/// Joins a team's resolved owner names into the single display string
/// used across all report tables.
pub fn join_owner_names(guids: &[String], member_names: &HashMap<&str, String>) -> String {
    let names: Vec<&str> = guids
        .iter()
        .filter_map(|guid| member_names.get(guid.as_str()).map(String::as_str))
        .collect();
    if names.is_empty() {
        NO_OWNER.to_string()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, first: &str, last: &str) -> ApiMember {
        ApiMember {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
        }
    }

    #[test]
    fn test_join_owner_names_resolves_guids() {
        let response = LeagueResponse {
            teams: vec![],
            members: vec![member("{A}", "Mani", "Suresh"), member("{B}", "Liam", "Das")],
            schedule: vec![],
            settings: None,
        };
        let names = response.member_names();

        let joined = join_owner_names(&["{A}".to_string(), "{B}".to_string()], &names);
        assert_eq!(joined, "Mani Suresh, Liam Das");
    }

    #[test]
    fn test_join_owner_names_empty_is_na() {
        let names = HashMap::new();
        assert_eq!(join_owner_names(&[], &names), NO_OWNER);
        // Unresolvable guids also collapse to N/A rather than an empty string
        assert_eq!(join_owner_names(&["{GONE}".to_string()], &names), NO_OWNER);
    }

    #[test]
    fn test_league_response_parses_matchup_view() {
        let json = r#"{
            "teams": [{"id": 1, "divisionId": 0, "owners": ["{A}"]}],
            "members": [{"id": "{A}", "firstName": "Mani", "lastName": "Suresh"}],
            "schedule": [
                {"matchupPeriodId": 1,
                 "home": {"teamId": 1, "totalPoints": 101.5},
                 "away": {"teamId": 2, "totalPoints": 88.0}},
                {"matchupPeriodId": 15,
                 "home": {"teamId": 1, "totalPoints": 0.0}}
            ]
        }"#;
        let response: LeagueResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.schedule.len(), 2);
        assert_eq!(response.schedule[0].matchup_period_id, 1);
        assert!(response.schedule[1].away.is_none());
        assert_eq!(
            response.schedule[0].home.as_ref().unwrap().total_points,
            101.5
        );
    }

    #[test]
    fn test_division_names_default_empty() {
        let response: LeagueResponse = serde_json::from_str("{}").unwrap();
        assert!(response.division_names().is_empty());
        assert!(response.teams.is_empty());
    }
}
