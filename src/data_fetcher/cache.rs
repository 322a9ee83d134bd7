//! Disk cache for fetched season tables.
//!
//! One JSON blob per (kind, year) key under a configured directory.
//! There is no TTL and no eviction; entries live until deleted, either
//! out-of-band or through [`DiskCache::clear`]. Writes are whole-file
//! replacements, so concurrent writers for the same key end in a
//! last-writer-wins state without corruption.
//!
//! The cache stores rows exactly as the league reported them; owner
//! name normalization happens downstream of every read.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

use crate::error::AppError;

/// Creates the stable cache key for a (kind, year) pair. This doubles
/// as the file stem, so it must stay deterministic across releases.
pub fn create_cache_key(kind: &str, year: i32) -> String {
    format!("{kind}_{year}")
}

#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, kind: &str, year: i32) -> PathBuf {
        self.dir.join(format!("{}.json", create_cache_key(kind, year)))
    }

    /// Retrieves the cached table for a (kind, year) key.
    ///
    /// A missing file is an ordinary miss. An unreadable or unparsable
    /// file is logged and treated as a miss so a fresh fetch can repair
    /// the entry.
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, kind: &str, year: i32) -> Option<Vec<T>> {
        let path = self.entry_path(kind, year);
        if !path.exists() {
            debug!("Cache miss for {}", create_cache_key(kind, year));
            return None;
        }

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "Failed to read cache entry {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(rows) => {
                debug!("Cache hit for {}", create_cache_key(kind, year));
                Some(rows)
            }
            Err(e) => {
                warn!(
                    "Discarding unparsable cache entry {}: {}",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    /// Persists a table under a (kind, year) key as a whole-file
    /// replacement write.
    #[instrument(skip(self, rows))]
    pub async fn put<T: Serialize>(
        &self,
        kind: &str,
        year: i32,
        rows: &[T],
    ) -> Result<(), AppError> {
        let key = create_cache_key(kind, year);
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .await
                .map_err(|e| AppError::cache_write(&key, e.to_string()))?;
        }

        let content = serde_json::to_string(rows)
            .map_err(|e| AppError::cache_write(&key, e.to_string()))?;
        let path = self.entry_path(kind, year);
        fs::write(&path, content)
            .await
            .map_err(|e| AppError::cache_write(&key, e.to_string()))?;

        info!("Cached {} rows under {}", rows.len(), key);
        Ok(())
    }

    /// Deletes every cache entry in the directory. Non-JSON files are
    /// left alone.
    pub async fn clear(&self) -> Result<usize, AppError> {
        if !self.dir.exists() {
            return Ok(0);
        }

        let mut removed = 0;
        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                fs::remove_file(&path).await?;
                removed += 1;
            }
        }

        info!("Cleared {} cache entries from {}", removed, self.dir.display());
        Ok(removed)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::cache_kind;
    use crate::data_fetcher::models::MatchupRow;
    use tempfile::tempdir;

    fn sample_rows() -> Vec<MatchupRow> {
        vec![
            MatchupRow {
                year: 2021,
                week: 1,
                home_owners: "Mani Suresh".to_string(),
                home_score: 101.5,
                away_owners: "Liam Das".to_string(),
                away_score: 88.25,
            },
            MatchupRow {
                year: 2021,
                week: 2,
                home_owners: "Liam Das".to_string(),
                home_score: 90.0,
                away_owners: "Mani Suresh".to_string(),
                away_score: 95.75,
            },
        ]
    }

    #[tokio::test]
    async fn test_cache_round_trip_is_field_for_field_equal() {
        let temp_dir = tempdir().unwrap();
        let cache = DiskCache::new(temp_dir.path());

        let rows = sample_rows();
        cache.put(cache_kind::BOX_SCORES, 2021, &rows).await.unwrap();

        let loaded: Vec<MatchupRow> = cache.get(cache_kind::BOX_SCORES, 2021).await.unwrap();
        assert_eq!(loaded, rows);
    }

    #[tokio::test]
    async fn test_missing_entry_is_a_miss() {
        let temp_dir = tempdir().unwrap();
        let cache = DiskCache::new(temp_dir.path());

        let loaded: Option<Vec<MatchupRow>> = cache.get(cache_kind::BOX_SCORES, 1999).await;
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_a_miss() {
        let temp_dir = tempdir().unwrap();
        let cache = DiskCache::new(temp_dir.path());

        let path = temp_dir.path().join("box_scores_2021.json");
        tokio::fs::write(&path, "not json at all").await.unwrap();

        let loaded: Option<Vec<MatchupRow>> = cache.get(cache_kind::BOX_SCORES, 2021).await;
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_keys_are_kind_and_year_scoped() {
        let temp_dir = tempdir().unwrap();
        let cache = DiskCache::new(temp_dir.path());

        cache
            .put(cache_kind::BOX_SCORES, 2021, &sample_rows())
            .await
            .unwrap();

        let other_year: Option<Vec<MatchupRow>> = cache.get(cache_kind::BOX_SCORES, 2022).await;
        assert!(other_year.is_none());
        let other_kind: Option<Vec<MatchupRow>> = cache.get(cache_kind::TEAMS, 2021).await;
        assert!(other_kind.is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_whole_file() {
        let temp_dir = tempdir().unwrap();
        let cache = DiskCache::new(temp_dir.path());

        let rows = sample_rows();
        cache.put(cache_kind::BOX_SCORES, 2021, &rows).await.unwrap();
        cache
            .put(cache_kind::BOX_SCORES, 2021, &rows[..1])
            .await
            .unwrap();

        let loaded: Vec<MatchupRow> = cache.get(cache_kind::BOX_SCORES, 2021).await.unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_removes_all_entries() {
        let temp_dir = tempdir().unwrap();
        let cache = DiskCache::new(temp_dir.path());

        cache
            .put(cache_kind::BOX_SCORES, 2021, &sample_rows())
            .await
            .unwrap();
        cache
            .put(cache_kind::TEAMS, 2021, &Vec::<MatchupRow>::new())
            .await
            .unwrap();

        let removed = cache.clear().await.unwrap();
        assert_eq!(removed, 2);

        let loaded: Option<Vec<MatchupRow>> = cache.get(cache_kind::BOX_SCORES, 2021).await;
        assert!(loaded.is_none());
    }

    #[test]
    fn test_cache_key_naming_is_stable() {
        assert_eq!(create_cache_key("box_scores", 2021), "box_scores_2021");
        assert_eq!(create_cache_key("teams", 2019), "teams_2019");
    }
}
