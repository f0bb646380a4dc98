use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::LEADERBOARD_CAPACITY;

const APP_DIR_NAME: &str = "wrap-snake";
const LEADERBOARD_FILE_NAME: &str = "leaderboard.json";

/// One saved result. Names need not be unique.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

impl ScoreEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("player name must not be empty")]
    EmptyName,
    #[error("leaderboard I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("leaderboard could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Top-scores store consumed by the front-end after a game ends.
pub trait Leaderboard {
    /// Returns at most [`LEADERBOARD_CAPACITY`] entries, highest score first.
    ///
    /// Missing or unreadable data yields an empty list.
    fn load_top_scores(&self) -> Vec<ScoreEntry>;

    /// Inserts a result, keeps the best [`LEADERBOARD_CAPACITY`] and persists them.
    fn save_score(&mut self, name: &str, score: u32) -> Result<(), LeaderboardError>;
}

/// Leaderboard kept as a JSON array on disk.
#[derive(Debug, Clone)]
pub struct FileLeaderboard {
    path: PathBuf,
}

impl FileLeaderboard {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Leaderboard at the platform-correct default location.
    #[must_use]
    pub fn at_default_path() -> Self {
        Self::new(default_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Leaderboard for FileLeaderboard {
    fn load_top_scores(&self) -> Vec<ScoreEntry> {
        match read_entries(&self.path) {
            Ok(mut entries) => {
                rank(&mut entries);
                entries
            }
            Err(error) => {
                warn!(path = %self.path.display(), %error, "ignoring unreadable leaderboard");
                Vec::new()
            }
        }
    }

    fn save_score(&mut self, name: &str, score: u32) -> Result<(), LeaderboardError> {
        let entry = checked_entry(name, score)?;
        let mut entries = self.load_top_scores();
        insert_ranked(&mut entries, entry);
        write_entries(&self.path, &entries)?;

        debug!(path = %self.path.display(), score, "leaderboard saved");
        Ok(())
    }
}

/// Leaderboard that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryLeaderboard {
    entries: Vec<ScoreEntry>,
}

impl Leaderboard for MemoryLeaderboard {
    fn load_top_scores(&self) -> Vec<ScoreEntry> {
        self.entries.clone()
    }

    fn save_score(&mut self, name: &str, score: u32) -> Result<(), LeaderboardError> {
        let entry = checked_entry(name, score)?;
        insert_ranked(&mut self.entries, entry);
        Ok(())
    }
}

/// Returns the platform-correct leaderboard file path.
#[must_use]
pub fn default_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LEADERBOARD_FILE_NAME);
    base
}

/// Appends `entry`, re-sorts by descending score and truncates to capacity.
///
/// The sort is stable, so among equal scores earlier entries stay ahead.
pub fn insert_ranked(entries: &mut Vec<ScoreEntry>, entry: ScoreEntry) {
    entries.push(entry);
    rank(entries);
}

fn rank(entries: &mut Vec<ScoreEntry>) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(LEADERBOARD_CAPACITY);
}

fn checked_entry(name: &str, score: u32) -> Result<ScoreEntry, LeaderboardError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LeaderboardError::EmptyName);
    }
    Ok(ScoreEntry::new(name, score))
}

fn read_entries(path: &Path) -> io::Result<Vec<ScoreEntry>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    serde_json::from_str::<Vec<ScoreEntry>>(&raw)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn write_entries(path: &Path, entries: &[ScoreEntry]) -> Result<(), LeaderboardError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(entries)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{
        insert_ranked, FileLeaderboard, Leaderboard, LeaderboardError, MemoryLeaderboard,
        ScoreEntry,
    };

    #[test]
    fn saved_scores_come_back_highest_first() {
        let path = unique_test_path("round_trip");
        let mut board = FileLeaderboard::new(&path);

        board.save_score("A", 50).expect("save should succeed");
        board.save_score("B", 90).expect("save should succeed");

        assert_eq!(
            board.load_top_scores(),
            vec![ScoreEntry::new("B", 90), ScoreEntry::new("A", 50)]
        );
        cleanup_test_path(&path);
    }

    #[test]
    fn only_top_five_are_retained() {
        let path = unique_test_path("top_five");
        let mut board = FileLeaderboard::new(&path);

        for (name, score) in [("a", 30), ("b", 10), ("c", 60), ("d", 20), ("e", 50), ("f", 40)] {
            board.save_score(name, score).expect("save should succeed");
        }

        let scores: Vec<u32> = board.load_top_scores().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![60, 50, 40, 30, 20]);
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_file_is_an_empty_leaderboard() {
        let path = unique_test_path("missing");

        assert!(FileLeaderboard::new(&path).load_top_scores().is_empty());
    }

    #[test]
    fn corrupt_file_is_an_empty_leaderboard_and_gets_replaced() {
        let path = unique_test_path("corrupt");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");
        let mut board = FileLeaderboard::new(&path);

        assert!(board.load_top_scores().is_empty());

        board.save_score("A", 5).expect("save should succeed");
        assert_eq!(board.load_top_scores(), vec![ScoreEntry::new("A", 5)]);
        cleanup_test_path(&path);
    }

    #[test]
    fn blank_names_are_refused() {
        let mut board = MemoryLeaderboard::default();

        assert!(matches!(
            board.save_score("   ", 10),
            Err(LeaderboardError::EmptyName)
        ));
        assert!(board.load_top_scores().is_empty());
    }

    #[test]
    fn duplicate_names_are_kept() {
        let mut board = MemoryLeaderboard::default();

        board.save_score("A", 10).expect("save should succeed");
        board.save_score("A", 20).expect("save should succeed");

        assert_eq!(
            board.load_top_scores(),
            vec![ScoreEntry::new("A", 20), ScoreEntry::new("A", 10)]
        );
    }

    #[test]
    fn ties_keep_the_earlier_entry_first() {
        let mut entries = vec![ScoreEntry::new("first", 40)];

        insert_ranked(&mut entries, ScoreEntry::new("second", 40));

        assert_eq!(entries[0].name, "first");
        assert_eq!(entries[1].name, "second");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("wrap-snake-leaderboard-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
    }
}
