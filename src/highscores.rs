//! High score persistence
//!
//! One non-negative integer under a fixed key, surviving process restarts.
//! A missing or corrupt record reads back as zero, never as an error, and a
//! failed write is logged and swallowed; the game must not care.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Storage boundary for the single high score value
pub trait HighScoreStore {
    /// Stored best score, zero when nothing usable is stored
    fn get(&self) -> u32;
    /// Replace the stored best score
    fn set(&mut self, score: u32);
}

/// Volatile store for tests and shells without a filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryHighScore(u32);

impl HighScoreStore for MemoryHighScore {
    fn get(&self) -> u32 {
        self.0
    }

    fn set(&mut self, score: u32) {
        self.0 = score;
    }
}

/// On-disk JSON record
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// File-backed store in the platform data directory
#[derive(Debug, Clone)]
pub struct FileHighScore {
    path: PathBuf,
    cached: u32,
}

impl FileHighScore {
    /// File name under the data directory
    const STORAGE_KEY: &'static str = "highscore.json";

    /// Open the default store, e.g. `~/.local/share/vectoroids/highscore.json`.
    /// Falls back to the current directory when no data dir exists.
    pub fn open() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vectoroids");
        Self::open_at(dir.join(Self::STORAGE_KEY))
    }

    /// Open a store at an explicit path (tests point this at a temp dir)
    pub fn open_at(path: PathBuf) -> Self {
        let cached = Self::read(&path);
        log::info!("high score store {:?}: {}", path, cached);
        Self { path, cached }
    }

    fn read(path: &PathBuf) -> u32 {
        let Ok(json) = fs::read_to_string(path) else {
            return 0;
        };
        match serde_json::from_str::<HighScoreRecord>(&json) {
            Ok(record) => record.high_score,
            Err(err) => {
                log::warn!("corrupt high score record, starting at zero: {err}");
                0
            }
        }
    }

    fn write(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                log::warn!("high score dir not writable: {err}");
                return;
            }
        }
        let record = HighScoreRecord {
            high_score: self.cached,
        };
        let json = match serde_json::to_string(&record) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("high score encode failed: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, json) {
            log::warn!("high score save failed: {err}");
        } else {
            log::info!("high score saved: {}", self.cached);
        }
    }
}

impl HighScoreStore for FileHighScore {
    fn get(&self) -> u32 {
        self.cached
    }

    fn set(&mut self, score: u32) {
        self.cached = score;
        self.write();
    }
}
