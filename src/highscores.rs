//! High score leaderboard
//!
//! The log is a plain text file, one `<name>, <score>, <difficulty>` record
//! per line. Raw history is kept; ranking reduces it to the best score per
//! (player, difficulty) pair at query time.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::error::GameError;

/// A finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player_name: String,
    /// Rounded seconds survived
    pub score: u32,
    pub difficulty: Difficulty,
}

impl ScoreRecord {
    /// Build a record; commas and control characters in the name become
    /// spaces so it stays on one parseable line.
    pub fn new(player_name: &str, score: u32, difficulty: Difficulty) -> Self {
        let player_name: String = player_name
            .chars()
            .map(|c| if c == ',' || c.is_control() { ' ' } else { c })
            .collect();
        Self {
            player_name: player_name.trim().to_string(),
            score,
            difficulty,
        }
    }

    /// Parse one log line
    pub fn parse_line(line: &str) -> Result<Self, GameError> {
        let malformed = |reason: String| GameError::MalformedRecord {
            line: line.to_string(),
            reason,
        };

        let fields: Vec<&str> = line.trim().split(',').collect();
        let [name, score, difficulty] = fields.as_slice() else {
            return Err(malformed(format!("expected 3 fields, got {}", fields.len())));
        };

        let score = score
            .trim()
            .parse::<u32>()
            .map_err(|e| malformed(format!("bad score: {e}")))?;
        let difficulty = difficulty
            .parse::<Difficulty>()
            .map_err(|e| malformed(e.to_string()))?;

        Ok(Self {
            player_name: name.trim().to_string(),
            score,
            difficulty,
        })
    }

    pub fn to_line(&self) -> String {
        format!("{}, {}, {}", self.player_name.trim(), self.score, self.difficulty)
    }
}

/// Key-value style backing store for the raw leaderboard log
pub trait RecordStore {
    /// Whole log contents; `Ok(None)` when no leaderboard exists yet
    fn read(&self) -> Result<Option<String>, GameError>;
    /// Replace the whole log
    fn write(&mut self, contents: &str) -> Result<(), GameError>;
}

/// Leaderboard log on the local filesystem
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for FileStore {
    fn read(&self) -> Result<Option<String>, GameError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GameError::PersistenceUnavailable {
                reason: format!("{}: {e}", self.path.display()),
            }),
        }
    }

    fn write(&mut self, contents: &str) -> Result<(), GameError> {
        fs::write(&self.path, contents).map_err(|e| GameError::PersistenceUnavailable {
            reason: format!("{}: {e}", self.path.display()),
        })
    }
}

/// In-memory log, for tests and headless runs without a file
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contents: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl RecordStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, GameError> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> Result<(), GameError> {
        self.contents = Some(contents.to_string());
        Ok(())
    }
}

/// Leaderboard over a raw record log
#[derive(Debug, Clone)]
pub struct LeaderboardStore<S> {
    store: S,
}

impl<S: RecordStore> LeaderboardStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All raw records in log order. A missing log is empty; a bad line fails
    /// the whole load.
    pub fn records(&self) -> Result<Vec<ScoreRecord>, GameError> {
        let Some(contents) = self.store.read()? else {
            return Ok(Vec::new());
        };
        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(ScoreRecord::parse_line)
            .collect()
    }

    /// Add a record to the log. Nothing is deduplicated; the rewritten log is
    /// ordered by score, highest first.
    pub fn append(&mut self, record: ScoreRecord) -> Result<(), GameError> {
        let mut records = self.records()?;
        records.push(record);
        self.save(records)
    }

    /// Rewrite the whole log sorted descending by score (stable for ties)
    pub fn save(&mut self, mut records: Vec<ScoreRecord>) -> Result<(), GameError> {
        sort_by_score_desc(&mut records);
        let mut contents = String::new();
        for record in &records {
            contents.push_str(&record.to_line());
            contents.push('\n');
        }
        self.store.write(&contents)?;
        log::info!("Leaderboard saved ({} records)", records.len());
        Ok(())
    }

    /// One record per (player, difficulty): the highest score, first seen on
    /// ties. Any read problem is logged and yields an empty list.
    pub fn best_per_player_and_difficulty(&self) -> Vec<ScoreRecord> {
        match self.records() {
            Ok(records) => best_per_key(records),
            Err(e) => {
                log::error!("Error filtering scores: {e}");
                Vec::new()
            }
        }
    }

    /// Best records, optionally for one difficulty, highest first, at most `n`
    pub fn top_n(&self, difficulty: Option<Difficulty>, n: usize) -> Vec<ScoreRecord> {
        let mut best: Vec<ScoreRecord> = self
            .best_per_player_and_difficulty()
            .into_iter()
            .filter(|r| difficulty.is_none_or(|d| r.difficulty == d))
            .collect();
        sort_by_score_desc(&mut best);
        best.truncate(n);
        best
    }
}

/// Reduce a raw log to the best record per (player, difficulty), keeping the
/// order in which the kept records appear.
pub fn best_per_key(records: Vec<ScoreRecord>) -> Vec<ScoreRecord> {
    let mut best: Vec<ScoreRecord> = Vec::new();
    let mut index: HashMap<(String, Difficulty), usize> = HashMap::new();

    for record in records {
        let key = (record.player_name.clone(), record.difficulty);
        match index.get(&key) {
            Some(&i) => {
                if record.score > best[i].score {
                    best[i] = record;
                }
            }
            None => {
                index.insert(key, best.len());
                best.push(record);
            }
        }
    }

    best
}

#[inline]
fn sort_by_score_desc(records: &mut [ScoreRecord]) {
    records.sort_by(|a, b| b.score.cmp(&a.score));
}
