//! SB Arcade - three small arcade games on one object framework
//!
//! Core modules:
//! - `sim`: Deterministic simulation (rects, hit detection, the three games)
//! - `renderer`: Draw lists built from game state, SDL2 canvas backend
//! - `platform`: Window state, FPS counter, SDL2 frontend loop
//! - `app`: The `Game` interface shared by Half-Pong, Maze and Platformer
//! - `highscores`: Binary high-score file
//! - `settings`: JSON settings file

pub mod app;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{Game, GameKind};
pub use error::{Error, Result};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default window size
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Scrolling level size (maze and platformer)
    pub const LEVEL_WIDTH: i32 = 2000;
    pub const LEVEL_HEIGHT: i32 = 1500;

    /// Analog stick values inside this band are ignored
    pub const CONTROLLER_DEADZONE: i16 = 6000;

    /// Largest frame delta fed to the simulation (ms), so a stalled window
    /// doesn't tunnel everything through the walls
    pub const MAX_FRAME_MS: u32 = 50;

    /// Half-Pong
    pub const PONG_LIVES: u32 = 3;
    pub const PONG_RESET_DELAY_MS: u32 = 1000;
    /// Speed boost when the ball hits the paddle (multiplicative)
    pub const PONG_PADDLE_BOOST: f64 = 1.05;
    /// Ball speed cap, world fractions per ms
    pub const PONG_BALL_MAX_SPEED: f64 = 1.0 / 600.0;

    /// Maze
    pub const MAZE_MOMENTUM_LOSS: f64 = 0.95;
    pub const MAZE_RESET_DELAY_MS: u32 = 1500;
    /// Resolve at most this many tile contacts per step
    pub const MAX_HITS_PER_STEP: usize = 2;

    /// Platformer (world fractions per ms, per ms²)
    pub const GRAVITY: f64 = 4.0e-6;
    pub const FRICTION: f64 = 4.0e-6;
    pub const PLATFORMER_RESET_DELAY_MS: u32 = 1500;
}
