//! Maze: roll a ball through a scrolling maze to the goal
//!
//! Arrow presses nudge the ball; walls bounce it back with some momentum
//! lost. The camera follows the ball around a level larger than the window.

use glam::DVec2;

use super::collision::{reflect, separate};
use super::input::{ControlDir, InputEvent, Key, axis_direction};
use super::levels::LevelSet;
use super::object::{Color, Object};
use super::rect::{Extent, RelRect};
use super::timer::Schedule;
use super::world::{Camera, World};
use crate::consts::*;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazePhase {
    Rolling,
    /// Goal reached, next level pending
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeEvent {
    LevelComplete { level: usize, time_ms: u64 },
    LevelLoaded { level: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MazeTimer {
    NextLevel,
}

#[derive(Debug, Clone)]
pub struct MazeBall {
    pub body: Object,
    /// Fraction of the velocity kept after bouncing
    pub momentum_loss: f64,
}

impl MazeBall {
    /// 25 px square in a default-sized level
    const SIZE: DVec2 = DVec2::new(25.0 / LEVEL_WIDTH as f64, 25.0 / LEVEL_HEIGHT as f64);

    pub fn new(start: DVec2, level: Extent) -> Self {
        let bounds = RelRect::new(start.x, start.y, Self::SIZE.x, Self::SIZE.y);
        Self {
            body: Object::new("ball", bounds, level).with_speed(1.0 / 4000.0),
            momentum_loss: MAZE_MOMENTUM_LOSS,
        }
    }

    /// Each arrow press (or stick push) adds one speed step on that axis
    pub fn handle_event(&mut self, event: &InputEvent, dead_zone: i16) {
        let dir = match *event {
            InputEvent::KeyDown { key, repeat: false, .. } => match key {
                Key::Up => ControlDir::Up,
                Key::Down => ControlDir::Down,
                Key::Left => ControlDir::Left,
                Key::Right => ControlDir::Right,
                _ => ControlDir::None,
            },
            InputEvent::ControllerAxis { which: 0, axis, value }
            | InputEvent::JoyAxis { which: 0, axis, value } => {
                axis_direction(axis, value, dead_zone)
            }
            _ => ControlDir::None,
        };

        let speed = self.body.speed;
        let v = &mut self.body.velocity;
        match dir {
            ControlDir::Up => v.y -= speed,
            ControlDir::Down => v.y += speed,
            ControlDir::Left => v.x -= speed,
            ControlDir::Right => v.x += speed,
            ControlDir::None => {}
        }
    }

    /// Step, then bounce off at most `MAX_HITS_PER_STEP` tiles and the level
    /// edges. Returns how many tile hits were resolved.
    pub fn update(&mut self, dt_ms: u32, level: Extent, tiles: &[Object]) -> usize {
        self.body.step(dt_ms, level);

        let mut hits = 0;
        for tile in tiles {
            let contact = self.body.contact(tile);
            if !contact.side.is_hit() {
                continue;
            }
            let out = separate(&self.body.rect(), &tile.rect(), contact.side);
            self.body.set_rect(out, level);
            self.body.velocity = reflect(self.body.velocity, contact.side, self.momentum_loss);
            hits += 1;
            if hits == MAX_HITS_PER_STEP {
                break;
            }
        }

        self.keep_inside(level);
        hits
    }

    fn keep_inside(&mut self, level: Extent) {
        let mut r = self.body.rect();
        let mut v = self.body.velocity;
        let loss = self.momentum_loss;
        let before = r;

        if r.x <= 0 {
            r.x = 0;
            if v.x < 0.0 {
                v.x *= -loss;
            }
        } else if r.right() >= level.width {
            r.x = level.width - r.w;
            if v.x > 0.0 {
                v.x *= -loss;
            }
        }
        if r.y <= 0 {
            r.y = 0;
            if v.y < 0.0 {
                v.y *= -loss;
            }
        } else if r.bottom() >= level.height {
            r.y = level.height - r.h;
            if v.y > 0.0 {
                v.y *= -loss;
            }
        }

        if r != before {
            self.body.set_rect(r, level);
        }
        self.body.velocity = v;
    }
}

/// Complete maze state
#[derive(Debug, Clone)]
pub struct MazeState {
    pub world: World,
    pub camera: Camera,
    pub levels: LevelSet,
    pub level: usize,
    pub tiles: Vec<Object>,
    pub goal: Object,
    pub ball: MazeBall,
    pub phase: MazePhase,
    /// Time spent on the current level
    pub elapsed_ms: u64,
    /// Time of the last finished level
    pub last_time_ms: Option<u64>,
    pub dead_zone: i16,
    schedule: Schedule<MazeTimer>,
}

impl MazeState {
    pub fn new(window: Extent, levels: LevelSet) -> Result<Self> {
        let world = World::relative_to(Extent::new(LEVEL_WIDTH, LEVEL_HEIGHT), window);
        let extent = world.extent();
        let first = levels.get(0)?;
        let goal = Object::new("goal", first.goal, extent).with_color(Color::EXIT);
        let ball = MazeBall::new(first.start, extent);

        let mut state = Self {
            world,
            camera: Camera::new(window),
            levels,
            level: 0,
            tiles: Vec::new(),
            goal,
            ball,
            phase: MazePhase::Rolling,
            elapsed_ms: 0,
            last_time_ms: None,
            dead_zone: CONTROLLER_DEADZONE,
            schedule: Schedule::new(),
        };
        state.load_level(0)?;
        Ok(state)
    }

    /// Build tiles, goal and ball for level `number`
    pub fn load_level(&mut self, number: usize) -> Result<()> {
        let extent = self.world.extent();
        let coords = self.levels.get(number)?;

        self.tiles = coords
            .tiles
            .iter()
            .map(|t| Object::new("tile", t.rect, extent).with_color(Color::TILE))
            .collect();
        self.goal = Object::new("goal", coords.goal, extent).with_color(Color::EXIT);
        self.ball = MazeBall::new(coords.start, extent);

        self.level = number;
        self.phase = MazePhase::Rolling;
        self.elapsed_ms = 0;
        self.schedule.cancel_all();
        self.camera.center_on(&self.ball.body.rect(), extent);
        log::info!("Maze level {} loaded ({} tiles)", number, self.tiles.len());
        Ok(())
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::WindowResized { width, height } => {
                self.resize(Extent::new(width, height));
            }
            _ if event.is_press(Key::Space) => {
                if let Err(e) = self.load_level(self.level) {
                    log::error!("Failed to restart maze level: {}", e);
                }
            }
            _ if self.phase == MazePhase::Rolling => {
                self.ball.handle_event(event, self.dead_zone);
            }
            _ => {}
        }
    }

    pub fn resize(&mut self, window: Extent) {
        self.camera.set_size(window);
        if self.world.resize(window) {
            let extent = self.world.extent();
            for tile in &mut self.tiles {
                tile.resize(extent);
            }
            self.goal.resize(extent);
            self.ball.body.resize(extent);
        }
        self.camera
            .center_on(&self.ball.body.rect(), self.world.extent());
    }

    pub fn tick(&mut self, dt_ms: u32) -> Vec<MazeEvent> {
        let mut events = Vec::new();
        let extent = self.world.extent();

        for timer in self.schedule.advance(dt_ms) {
            match timer {
                MazeTimer::NextLevel => {
                    let next = self.levels.next_index(self.level);
                    match self.load_level(next) {
                        Ok(()) => events.push(MazeEvent::LevelLoaded { level: next }),
                        Err(e) => log::error!("Failed to load maze level {}: {}", next, e),
                    }
                }
            }
        }

        if self.phase == MazePhase::Rolling {
            self.elapsed_ms += u64::from(dt_ms);
            self.ball.update(dt_ms, extent, &self.tiles);

            if self.ball.body.rect().overlaps(&self.goal.rect()) {
                let centred = self.ball.body.rect().centered_in(&self.goal.rect());
                self.ball.body.set_rect(centred, extent);
                self.ball.body.velocity = DVec2::ZERO;
                self.phase = MazePhase::Finished;
                self.last_time_ms = Some(self.elapsed_ms);
                self.schedule.after(MAZE_RESET_DELAY_MS, MazeTimer::NextLevel);
                log::debug!("Maze level {} done in {} ms", self.level, self.elapsed_ms);
                events.push(MazeEvent::LevelComplete {
                    level: self.level,
                    time_ms: self.elapsed_ms,
                });
            }
        }

        self.camera.center_on(&self.ball.body.rect(), extent);
        events
    }
}
