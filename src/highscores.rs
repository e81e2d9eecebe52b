//! Half-Pong high score table
//!
//! Persisted to a small binary file: a u32 count followed by that many u32
//! scores, all little-endian. Tracks the top 10.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Default file name, next to the working directory
pub const DEFAULT_PATH: &str = "halfpong.save";

/// High score table, sorted descending
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScores {
    pub scores: Vec<u32>,
}

impl HighScores {
    /// Create empty table
    pub fn new() -> Self {
        Self { scores: Vec::new() }
    }

    /// Check if a score makes it into the table
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.scores.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.scores.last().is_none_or(|&lowest| score > lowest)
    }

    /// Rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.scores.iter().position(|&s| score > s);
        Some(rank.unwrap_or(self.scores.len()) + 1)
    }

    /// Insert a score if it qualifies.
    /// Returns the rank achieved (1-indexed) or None
    pub fn add_score(&mut self, score: u32) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.scores.insert(rank - 1, score);
        self.scores.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Best score so far, 0 when empty
    pub fn top_score(&self) -> u32 {
        self.scores.first().copied().unwrap_or(0)
    }

    /// Encode as count + scores, little-endian
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(4 * (self.scores.len() + 1));
        bytes.extend_from_slice(&(self.scores.len() as u32).to_le_bytes());
        for score in &self.scores {
            bytes.extend_from_slice(&score.to_le_bytes());
        }
        bytes
    }

    /// Decode the file layout. `path` only labels the error.
    pub fn from_bytes(bytes: &[u8], path: &Path) -> Result<Self> {
        let mut words = bytes.chunks(4);
        let count = match words.next() {
            Some(w) if w.len() == 4 => u32::from_le_bytes([w[0], w[1], w[2], w[3]]) as usize,
            _ => return Err(Error::corrupt(path, "missing score count")),
        };
        if bytes.len() % 4 != 0 || (bytes.len() - 4) / 4 != count {
            return Err(Error::corrupt(
                path,
                format!("count {} doesn't match {} bytes of scores", count, bytes.len() - 4),
            ));
        }

        let mut scores: Vec<u32> = words
            .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
            .collect();
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(MAX_HIGH_SCORES);
        Ok(Self { scores })
    }

    /// Load from `path`; a missing file is an empty table
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high scores found at {}, starting fresh", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };
        let scores = Self::from_bytes(&bytes, path)?;
        log::info!("Loaded {} high scores", scores.scores.len());
        Ok(scores)
    }

    /// Write to a temp file next to `path`, then rename over it
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let tmp = path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&self.to_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, path)?;
        log::info!("High scores saved ({} entries)", self.scores.len());
        Ok(())
    }
}
