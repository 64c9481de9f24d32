//! File-backed leaderboard: a JSON array of scored runs kept sorted
//! best-first, with a top-ten view for display.

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use firn_core::scoring::RunSummary;

/// How many entries the displayed leaderboard shows.
pub const TOP_N: usize = 10;

/// One recorded run. Flattens the summary, so the stored JSON carries
/// `glacierName`, `yearsSurvived`, ... next to `score` and `playedAt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(flatten)]
    pub summary: RunSummary,
    pub score: u32,
    /// Unix seconds at recording time.
    pub played_at: u64,
}

impl LeaderboardEntry {
    pub fn from_summary(summary: RunSummary) -> Self {
        let score = summary.score();
        let played_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            summary,
            score,
            played_at,
        }
    }
}

/// Read a leaderboard file. A missing file is an empty leaderboard.
pub fn load(path: &Path) -> Result<Vec<LeaderboardEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading leaderboard {}", path.display()))?;
    let entries =
        serde_json::from_str(&raw).with_context(|| format!("parsing leaderboard {}", path.display()))?;
    Ok(entries)
}

/// Append an entry, re-sort best first, and write the file back.
/// Returns the full sorted list.
pub fn record(path: &Path, entry: LeaderboardEntry) -> Result<Vec<LeaderboardEntry>> {
    let mut entries = load(path)?;
    entries.push(entry);
    entries.sort_by(|a, b| b.score.cmp(&a.score));

    let json = serde_json::to_string_pretty(&entries).context("serialising leaderboard")?;
    fs::write(path, json).with_context(|| format!("writing leaderboard {}", path.display()))?;
    Ok(entries)
}

/// The displayable slice of an already sorted list.
pub fn top(entries: &[LeaderboardEntry]) -> &[LeaderboardEntry] {
    &entries[..entries.len().min(TOP_N)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn summary(name: &str, years: u32) -> RunSummary {
        RunSummary {
            glacier_name: name.to_string(),
            years_survived: years,
            final_ice_volume: 0.0,
            final_stability: 0.0,
            final_thickness: 0.0,
        }
    }

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("firn-leaderboard-{tag}-{}.json", std::process::id()))
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        assert!(load(&path).unwrap().is_empty());
    }

    #[test]
    fn record_sorts_best_first_and_persists() {
        let path = temp_path("sort");
        let _ = fs::remove_file(&path);

        // Scores are 10 points per year survived here.
        record(&path, LeaderboardEntry::from_summary(summary("short", 1))).unwrap();
        record(&path, LeaderboardEntry::from_summary(summary("long", 90))).unwrap();
        let stored = record(&path, LeaderboardEntry::from_summary(summary("mid", 50))).unwrap();

        let names: Vec<&str> = stored.iter().map(|e| e.summary.glacier_name.as_str()).collect();
        assert_eq!(names, vec!["long", "mid", "short"]);

        let reloaded = load(&path).unwrap();
        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded[0].score, 900);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn top_caps_the_displayed_list_at_ten() {
        let entries: Vec<LeaderboardEntry> = (0..12)
            .map(|i| LeaderboardEntry::from_summary(summary("g", 100 - i)))
            .collect();
        assert_eq!(top(&entries).len(), TOP_N);

        let three: Vec<LeaderboardEntry> = entries.into_iter().take(3).collect();
        assert_eq!(top(&three).len(), 3);
    }

    #[test]
    fn stored_json_uses_wire_names() {
        let entry = LeaderboardEntry::from_summary(summary("Equinox Fields", 12));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["glacierName"], "Equinox Fields");
        assert_eq!(json["yearsSurvived"], 12);
        assert_eq!(json["score"], 120);
        assert!(json.get("playedAt").is_some());
    }
}
