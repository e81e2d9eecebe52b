//! The three games behind one interface
//!
//! The frontend loop only sees `Game`: it feeds input, advances time and asks
//! for a draw list. Each wrapper owns its simulation state plus whatever
//! persistence the game needs.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::error::Result;
use crate::highscores::HighScores;
use crate::renderer::{self, DrawList};
use crate::settings::Settings;
use crate::sim::{
    Extent, InputEvent, LevelSet, MazeEvent, MazeState, PlatformerEvent, PlatformerState,
    PongEvent, PongState, maze_levels, platformer_levels,
};

pub trait Game {
    /// Window title
    fn title(&self) -> &'static str;

    fn handle_event(&mut self, event: &InputEvent);

    /// Advance by `dt_ms` of wall-clock time
    fn update(&mut self, dt_ms: u32);

    /// Frame in screen pixels
    fn scene(&self) -> DrawList;

    fn resize(&mut self, window: Extent);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameKind {
    /// Keep the ball off the right wall
    Pong,
    /// Roll the ball through the maze
    Maze,
    /// Jump to the exit
    Platformer,
}

impl GameKind {
    /// Build the game with everything it loads from disk
    pub fn create(self, settings: &Settings, seed: u64) -> Result<Box<dyn Game>> {
        let window = Extent::new(settings.window_width, settings.window_height);
        let game: Box<dyn Game> = match self {
            GameKind::Pong => {
                let mut game = PongGame::new(seed, window, Some(settings.highscore_path.clone()))?;
                game.state.dead_zone = settings.controller_dead_zone;
                Box::new(game)
            }
            GameKind::Maze => {
                let mut game = MazeGame::new(window, maze_levels())?;
                game.state.dead_zone = settings.controller_dead_zone;
                Box::new(game)
            }
            GameKind::Platformer => {
                let levels = match &settings.platformer_levels {
                    Some(path) => LevelSet::load(path)?,
                    None => platformer_levels(),
                };
                let mut game = PlatformerGame::new(window, levels)?;
                game.state.player.dead_zone = settings.controller_dead_zone;
                game.state.player.controller_sensitivity = settings.controller_sensitivity;
                Box::new(game)
            }
        };
        log::info!("Starting {}", game.title());
        Ok(game)
    }
}

/// Half-Pong plus its high-score file
pub struct PongGame {
    pub state: PongState,
    pub highscores: HighScores,
    /// Where the table is saved; `None` keeps it in memory
    highscore_path: Option<PathBuf>,
}

impl PongGame {
    pub fn new(seed: u64, window: Extent, highscore_path: Option<PathBuf>) -> Result<Self> {
        let highscores = match &highscore_path {
            Some(path) => HighScores::load(path)?,
            None => HighScores::new(),
        };
        let state = PongState::new(seed, window, highscores.top_score());
        Ok(Self {
            state,
            highscores,
            highscore_path,
        })
    }

    fn record(&mut self, score: u32) {
        let Some(rank) = self.highscores.add_score(score) else {
            return;
        };
        log::info!("Score {} ranked #{}", score, rank);
        if let Some(path) = &self.highscore_path {
            if let Err(e) = self.highscores.save(path) {
                log::warn!("Failed to save high scores: {}", e);
            }
        }
    }
}

impl Game for PongGame {
    fn title(&self) -> &'static str {
        "Basic half-Pong"
    }

    fn handle_event(&mut self, event: &InputEvent) {
        self.state.handle_event(event);
    }

    fn update(&mut self, dt_ms: u32) {
        for event in self.state.tick(dt_ms) {
            match event {
                PongEvent::PaddleHit { score } => log::debug!("Paddle hit, score {}", score),
                PongEvent::Goal { lives } => log::debug!("Goal, {} lives left", lives),
                PongEvent::GameOver { score, .. } => self.record(score),
            }
        }
    }

    fn scene(&self) -> DrawList {
        renderer::pong_scene(&self.state)
    }

    fn resize(&mut self, window: Extent) {
        self.state.resize(window);
    }
}

pub struct MazeGame {
    pub state: MazeState,
}

impl MazeGame {
    pub fn new(window: Extent, levels: LevelSet) -> Result<Self> {
        Ok(Self {
            state: MazeState::new(window, levels)?,
        })
    }
}

impl Game for MazeGame {
    fn title(&self) -> &'static str {
        "Maze"
    }

    fn handle_event(&mut self, event: &InputEvent) {
        self.state.handle_event(event);
    }

    fn update(&mut self, dt_ms: u32) {
        for event in self.state.tick(dt_ms) {
            if let MazeEvent::LevelComplete { level, time_ms } = event {
                log::info!("Maze level {} finished in {:.1} s", level, time_ms as f64 / 1000.0);
            }
        }
    }

    fn scene(&self) -> DrawList {
        renderer::maze_scene(&self.state)
    }

    fn resize(&mut self, window: Extent) {
        self.state.resize(window);
    }
}

pub struct PlatformerGame {
    pub state: PlatformerState,
}

impl PlatformerGame {
    pub fn new(window: Extent, levels: LevelSet) -> Result<Self> {
        Ok(Self {
            state: PlatformerState::new(window, levels)?,
        })
    }
}

impl Game for PlatformerGame {
    fn title(&self) -> &'static str {
        "Platformer"
    }

    fn handle_event(&mut self, event: &InputEvent) {
        self.state.handle_event(event);
    }

    fn update(&mut self, dt_ms: u32) {
        for event in self.state.tick(dt_ms) {
            if let PlatformerEvent::ExitReached { level } = event {
                log::info!("Platformer level {} complete", level);
            }
        }
    }

    fn scene(&self) -> DrawList {
        renderer::platformer_scene(&self.state)
    }

    fn resize(&mut self, window: Extent) {
        self.state.resize(window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

    #[test]
    fn test_create_every_kind() {
        let mut settings = Settings::default();
        let dir = std::env::temp_dir().join(format!("sb-arcade-app-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        settings.highscore_path = dir.join("halfpong.save");

        let titles: Vec<_> = [GameKind::Pong, GameKind::Maze, GameKind::Platformer]
            .into_iter()
            .map(|kind| kind.create(&settings, 7).unwrap().title())
            .collect();
        assert_eq!(titles, vec!["Basic half-Pong", "Maze", "Platformer"]);
    }

    #[test]
    fn test_missing_level_pack_is_an_error() {
        let mut settings = Settings::default();
        settings.platformer_levels = Some(PathBuf::from("/nonexistent/levels.json"));
        assert!(GameKind::Platformer.create(&settings, 1).is_err());
    }

    #[test]
    fn test_pong_game_over_records_score() {
        let window = Extent::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let mut game = PongGame::new(3, window, None).unwrap();
        game.state.score = 8;
        game.state.lives = 1;
        let paddle = game.state.paddle.body.rect();
        // Ball below the paddle, heading for the right edge
        game.state.ball.body.set_rect(
            crate::sim::Rect::new(paddle.x - 30, paddle.bottom() + 50, 24, 24),
            window,
        );
        game.state.ball.body.velocity = glam::DVec2::new(1.0 / 2000.0, 0.0);
        for _ in 0..100 {
            game.update(16);
        }
        assert_eq!(game.highscores.scores, vec![8]);
        assert_eq!(game.state.best, 8);
    }
}
