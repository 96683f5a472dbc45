use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The list never holds more than the top ten scores
pub const MAX_ENTRIES: usize = 10;

/// One ranked score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// Top-ten score list backed by a single JSON file
///
/// The whole list is rewritten on every update, so the file is only ever a
/// complete serialized leaderboard, never a partial one. A missing or
/// unreadable file is treated as an empty list; it is recreated on the
/// next recorded score.
#[derive(Debug)]
pub struct Leaderboard {
    path: PathBuf,
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    /// Open the leaderboard stored at `path`, loading whatever is there
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut board = Self {
            path: path.into(),
            entries: Vec::new(),
        };
        board.load();
        board
    }

    /// Ranked entries, best score first
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the persisted list
    ///
    /// On a missing, unreadable or corrupt file the in-memory list is left
    /// unchanged; persistence problems never take the game down.
    pub fn load(&mut self) {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return,
            Err(err) => {
                warn!("could not read leaderboard {:?}: {}", self.path, err);
                return;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => self.entries = entries,
            Err(err) => warn!("ignoring corrupt leaderboard {:?}: {}", self.path, err),
        }
    }

    /// Add a score, keep the list sorted and capped, and persist it
    ///
    /// Sorting is stable, so entries with equal scores stay in the order
    /// they were recorded. Empty names are accepted as-is.
    pub fn record(&mut self, name: &str, score: u32) -> Result<()> {
        self.entries.push(ScoreEntry {
            name: name.to_owned(),
            score,
        });
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);
        self.save()
    }

    fn save(&self) -> Result<()> {
        let json =
            serde_json::to_string_pretty(&self.entries).context("Failed to serialize leaderboard")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write leaderboard to {:?}", self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn board_in(dir: &TempDir) -> Leaderboard {
        Leaderboard::open(dir.path().join("leaderboard.json"))
    }

    #[test]
    fn test_missing_file_is_an_empty_board() {
        let dir = TempDir::new().unwrap();
        let board = board_in(&dir);
        assert!(board.entries().is_empty());
    }

    #[test]
    fn test_ties_keep_recording_order() {
        let dir = TempDir::new().unwrap();
        let mut board = board_in(&dir);

        board.record("A", 5).unwrap();
        board.record("B", 9).unwrap();
        board.record("C", 3).unwrap();
        board.record("D", 9).unwrap();

        let names: Vec<&str> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["B", "D", "A", "C"]);
        let scores: Vec<u32> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, [9, 9, 5, 3]);
    }

    #[test]
    fn test_sorted_and_capped_at_ten() {
        let dir = TempDir::new().unwrap();
        let mut board = board_in(&dir);

        for score in [4, 18, 2, 11, 9, 1, 16, 7, 13, 5, 20, 3] {
            board.record("player", score).unwrap();
        }

        assert_eq!(board.entries().len(), MAX_ENTRIES);
        let scores: Vec<u32> = board.entries().iter().map(|e| e.score).collect();
        let mut sorted = scores.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(scores, sorted);
        assert!(!scores.contains(&1));
        assert!(!scores.contains(&2));
    }

    #[test]
    fn test_round_trip_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaderboard.json");

        let mut board = Leaderboard::open(&path);
        board.record("ada", 12).unwrap();
        board.record("", 7).unwrap();
        board.record("grace", 30).unwrap();

        let reopened = Leaderboard::open(&path);
        assert_eq!(reopened.entries(), board.entries());
        assert_eq!(reopened.entries()[0].name, "grace");
        assert_eq!(reopened.entries()[2].name, "");
    }

    #[test]
    fn test_corrupt_file_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaderboard.json");
        fs::write(&path, "{ this is not json").unwrap();

        let board = Leaderboard::open(&path);
        assert!(board.entries().is_empty());
    }

    #[test]
    fn test_corrupt_reload_keeps_memory_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaderboard.json");

        let mut board = Leaderboard::open(&path);
        board.record("A", 5).unwrap();
        fs::write(&path, "][").unwrap();

        board.load();
        assert_eq!(board.entries().len(), 1);
        assert_eq!(board.entries()[0].name, "A");
    }
}
