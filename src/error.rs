//! Error types

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong outside the simulation
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt high-score file {path:?}: {message}")]
    CorruptHighScores { path: PathBuf, message: String },

    #[error("No level found for level number = {number} ({available} available)")]
    LevelNotFound { number: usize, available: usize },

    #[error("Empty level set")]
    EmptyLevelSet,

    /// Underlying SDL error string
    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("Unable to open font {path:?}: {message}")]
    MissingFont { path: PathBuf, message: String },
}

impl Error {
    pub fn sdl(message: impl Into<String>) -> Self {
        Self::Sdl(message.into())
    }

    pub fn corrupt(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::CorruptHighScores {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
