//! Owner display-name normalization.
//!
//! A handful of owners changed their league display names over the
//! years; reports always show the current name. The alias table is
//! applied to every owner-bearing field by exact whole-field match -
//! no partial match, no case folding. Normalization is idempotent and
//! must be re-run after any concatenation of cached tables, since the
//! cache stores raw league-reported names.

/// Fixed alias table: league-reported name -> current display name.
pub const OWNER_ALIASES: &[(&str, &str)] = &[
    ("Mani Suresh", "Rohan Shiknis"),
    ("Insung Kim", "Deven Chatterjea"),
    ("sainath raj", "Sainath Rajendrakumar"),
    ("Rushil Knagaram", "Liam Das"),
];

/// Normalizes a single owner field. Unknown names pass through
/// untouched.
pub fn normalize_name(name: &str) -> String {
    for (from, to) in OWNER_ALIASES {
        if name == *from {
            return (*to).to_string();
        }
    }
    name.to_string()
}

/// Rows with owner-name-bearing fields that the alias table applies to.
pub trait NormalizeOwners {
    fn normalize_owners(&mut self);
}

impl NormalizeOwners for crate::data_fetcher::models::MatchupRow {
    fn normalize_owners(&mut self) {
        self.home_owners = normalize_name(&self.home_owners);
        self.away_owners = normalize_name(&self.away_owners);
    }
}

impl NormalizeOwners for crate::data_fetcher::models::TeamSeasonRow {
    fn normalize_owners(&mut self) {
        self.owners = normalize_name(&self.owners);
    }
}

impl NormalizeOwners for crate::data_fetcher::models::DraftPickRow {
    fn normalize_owners(&mut self) {
        self.owner = normalize_name(&self.owner);
        self.previous_owners = normalize_name(&self.previous_owners);
    }
}

/// Normalizes every row of a table in place.
pub fn normalize_table<T: NormalizeOwners>(rows: &mut [T]) {
    for row in rows {
        row.normalize_owners();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::{MatchupRow, TeamSeasonRow};

    fn matchup(home: &str, away: &str) -> MatchupRow {
        MatchupRow {
            year: 2021,
            week: 1,
            home_owners: home.to_string(),
            home_score: 100.0,
            away_owners: away.to_string(),
            away_score: 90.0,
        }
    }

    #[test]
    fn test_aliases_apply_to_all_owner_fields() {
        let mut rows = vec![matchup("Mani Suresh", "Insung Kim")];
        normalize_table(&mut rows);
        assert_eq!(rows[0].home_owners, "Rohan Shiknis");
        assert_eq!(rows[0].away_owners, "Deven Chatterjea");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let mut rows = vec![
            matchup("Mani Suresh", "sainath raj"),
            matchup("Rushil Knagaram", "Someone Else"),
        ];
        normalize_table(&mut rows);
        let once = rows.clone();
        normalize_table(&mut rows);
        assert_eq!(rows, once);
    }

    #[test]
    fn test_exact_match_only() {
        // Substrings, different case and joined lists all pass through
        assert_eq!(normalize_name("mani suresh"), "mani suresh");
        assert_eq!(normalize_name("Mani Suresh Jr"), "Mani Suresh Jr");
        assert_eq!(
            normalize_name("Mani Suresh, Liam Das"),
            "Mani Suresh, Liam Das"
        );
    }

    #[test]
    fn test_team_rows_normalize_owners_column() {
        let mut row = TeamSeasonRow {
            year: 2020,
            owners: "Rushil Knagaram".to_string(),
            division_name: "East".to_string(),
            wins: 7,
            losses: 6,
            points_for: 1400.5,
            points_against: 1390.0,
            acquisitions: 20,
            drops: 18,
            trades: 2,
        };
        row.normalize_owners();
        assert_eq!(row.owners, "Liam Das");
    }
}
