use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = "grid-snake";
const SCORE_FILE_NAME: &str = "highscore.json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn default_scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Persists the best final score across runs.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
    best: u32,
}

impl HighScoreStore {
    /// Opens the store at `path`.
    ///
    /// A missing file counts as a high score of 0. A file that exists but
    /// cannot be read or parsed is an error, so the caller can warn before
    /// the terminal switches to raw mode.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let best = load_from_path(&path)?;
        debug!("loaded high score {best} from {}", path.display());
        Ok(Self { path, best })
    }

    /// Store at `path` starting from 0, without touching the file.
    #[must_use]
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            best: 0,
        }
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.best
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Compares a finished run against the stored best and saves it when it
    /// is higher. Returns whether a new high score was set.
    ///
    /// The in-memory value is updated even when writing the file fails.
    pub fn record(&mut self, final_score: u32) -> io::Result<bool> {
        if final_score <= self.best {
            return Ok(false);
        }

        self.best = final_score;
        info!("new high score {final_score}");
        save_to_path(&self.path, final_score)?;
        Ok(true)
    }
}

fn load_from_path(path: &Path) -> io::Result<u32> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    serde_json::from_str::<ScoreFile>(&raw)
        .map(|file| file.high_score)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn save_to_path(path: &Path, score: u32) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile { high_score: score };
    let json = serde_json::to_string_pretty(&payload)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

    fs::write(path, json)
}
