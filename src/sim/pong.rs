//! Half-Pong: Pong for one player
//!
//! The paddle guards the right edge; the ball bounces off the other three
//! walls. Every return scores a point, every miss costs a life and throws a
//! burst of sparks. The ball is re-served a second after a miss.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{HitPosition, reflect, separate};
use super::input::{Button, ControlDir, HeldKeys, InputEvent, Key, axis_direction};
use super::object::{Color, Object};
use super::rect::{Extent, Rect, RelRect};
use super::timer::Schedule;
use super::world::World;
use crate::consts::*;

/// Current phase of a Half-Pong game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PongPhase {
    /// Ball in play
    Playing,
    /// Ball went past the paddle, waiting for the re-serve
    Scored,
    /// No lives left
    GameOver,
}

/// Things the frontend may want to react to (sound, high-score file)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PongEvent {
    PaddleHit { score: u32 },
    Goal { lives: u32 },
    GameOver { score: u32, new_best: bool },
}

/// Deferred actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PongTimer {
    ResetBall,
}

/// The player's paddle on the right edge
#[derive(Debug, Clone)]
pub struct Paddle {
    pub body: Object,
    pub held: HeldKeys,
    /// Stick direction along y: -1 up, 1 down
    pub stick: i8,
}

impl Paddle {
    pub const BOUNDS: RelRect = RelRect::new(1.0 - 0.0625, 0.35, 0.025, 0.1);

    pub fn new(world: Extent) -> Self {
        Self {
            body: Object::new("paddle", Self::BOUNDS, world).with_speed(1.0 / 1000.0),
            held: HeldKeys::default(),
            stick: 0,
        }
    }

    /// Velocity follows the arrow keys held and the stick, capped at `speed`
    pub fn handle_event(&mut self, event: &InputEvent, dead_zone: i16) {
        match *event {
            InputEvent::ControllerAxis { which: 0, axis: 1, value }
            | InputEvent::JoyAxis { which: 0, axis: 1, value } => {
                self.stick = match axis_direction(1, value, dead_zone) {
                    ControlDir::Up => -1,
                    ControlDir::Down => 1,
                    _ => 0,
                };
            }
            _ => self.held.update(event),
        }
        let dir = (self.held.vertical() + self.stick).clamp(-1, 1);
        self.body.velocity.y = f64::from(dir) * self.body.speed;
    }

    /// Move, staying inside the window vertically
    pub fn update(&mut self, dt_ms: u32, world: Extent) {
        self.body.step(dt_ms, world);
        let mut r = self.body.rect();
        if r.y < 0 {
            r.y = 0;
        } else if r.bottom() > world.height {
            r.y = world.height - r.h;
        } else {
            return;
        }
        self.body.set_rect(r, world);
    }
}

/// What happened to the ball during one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallOutcome {
    None,
    PaddleHit,
    Goal,
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub body: Object,
}

impl Ball {
    pub const BOUNDS: RelRect = RelRect::new(0.0625, 0.5, 0.03, 0.04);

    pub fn new(world: Extent) -> Self {
        Self {
            body: Object::new("ball", Self::BOUNDS, world).with_speed(1.0 / 2000.0),
        }
    }

    /// Centre in front of the paddle and send it towards the far wall
    pub fn serve(&mut self, paddle: &Rect, world: Extent, rng: &mut Pcg32) {
        let r = self.body.rect();
        let placed = Rect::new(
            paddle.x - r.w - 2,
            paddle.y + (paddle.h - r.h) / 2,
            r.w,
            r.h,
        );
        self.body.set_rect(placed, world);

        let speed = self.body.speed;
        let dir_y = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.body.velocity = DVec2::new(-speed, dir_y * speed * 0.75);
    }

    /// Stop in place (after a goal)
    pub fn park(&mut self) {
        self.body.velocity = DVec2::ZERO;
    }

    /// Longest step (ms) that moves the ball less than its own size, so it
    /// can't skip over the paddle
    fn max_step_ms(&self, world: Extent) -> u32 {
        let r = self.body.rect();
        let v = self.body.velocity;
        let px_per_ms =
            (v.x.abs() * f64::from(world.width)).max(v.y.abs() * f64::from(world.height));
        if px_per_ms <= 0.0 {
            return u32::MAX;
        }
        let size = f64::from(r.w.min(r.h).max(2) - 1);
        (size / px_per_ms).floor().max(1.0) as u32
    }

    /// Advance `dt_ms` in sub-steps; a goal ends the update early
    pub fn update(&mut self, dt_ms: u32, world: Extent, paddle: &Paddle) -> BallOutcome {
        let mut outcome = BallOutcome::None;
        let mut remaining = dt_ms;
        while remaining > 0 {
            let step = remaining.min(self.max_step_ms(world));
            remaining -= step;
            match self.step(step, world, paddle) {
                BallOutcome::Goal => return BallOutcome::Goal,
                BallOutcome::PaddleHit => outcome = BallOutcome::PaddleHit,
                BallOutcome::None => {}
            }
        }
        outcome
    }

    fn step(&mut self, dt_ms: u32, world: Extent, paddle: &Paddle) -> BallOutcome {
        self.body.step(dt_ms, world);

        let mut r = self.body.rect();
        let mut v = self.body.velocity;
        let mut corrected = false;

        // Left, top and bottom walls
        if r.x <= 0 && v.x < 0.0 {
            v = reflect(v, HitPosition::Right, 1.0);
            r.x = 0;
            corrected = true;
        }
        if r.y <= 0 && v.y < 0.0 {
            v = reflect(v, HitPosition::Bottom, 1.0);
            r.y = 0;
            corrected = true;
        } else if r.bottom() >= world.height && v.y > 0.0 {
            v = reflect(v, HitPosition::Top, 1.0);
            r.y = world.height - r.h;
            corrected = true;
        }
        if corrected {
            self.body.set_rect(r, world);
        }
        self.body.velocity = v;

        let hit = self.body.check_hit(&paddle.body);
        let outcome = match hit {
            HitPosition::Left => {
                self.bounce_off(&paddle.body, hit, world);
                let boosted = self.body.velocity * PONG_PADDLE_BOOST;
                self.body.velocity = if boosted.length() > PONG_BALL_MAX_SPEED {
                    boosted.normalize() * PONG_BALL_MAX_SPEED
                } else {
                    boosted
                };
                BallOutcome::PaddleHit
            }
            HitPosition::Top | HitPosition::Bottom => {
                self.bounce_off(&paddle.body, hit, world);
                BallOutcome::None
            }
            HitPosition::Right | HitPosition::None => BallOutcome::None,
        };
        if outcome != BallOutcome::None {
            return outcome;
        }

        if self.body.rect().x >= world.width {
            BallOutcome::Goal
        } else {
            BallOutcome::None
        }
    }

    fn bounce_off(&mut self, target: &Object, hit: HitPosition, world: Extent) {
        let out = separate(&self.body.rect(), &target.rect(), hit);
        self.body.set_rect(out, world);
        self.body.velocity = reflect(self.body.velocity, hit, 1.0);
    }
}

/// Short-lived particle from a goal burst
#[derive(Debug, Clone)]
pub struct Spark {
    pub body: Object,
    pub remaining_ms: u32,
}

/// Complete Half-Pong state
#[derive(Debug, Clone)]
pub struct PongState {
    pub world: World,
    pub paddle: Paddle,
    pub ball: Ball,
    pub sparks: Vec<Spark>,
    pub lives: u32,
    pub score: u32,
    /// Best score so far (from the high-score table)
    pub best: u32,
    /// The game that just ended set a new best
    pub new_best: bool,
    pub phase: PongPhase,
    pub paused: bool,
    /// Stick dead zone for paddle control
    pub dead_zone: i16,
    schedule: Schedule<PongTimer>,
    rng: Pcg32,
}

impl PongState {
    pub fn new(seed: u64, window: Extent, best: u32) -> Self {
        let world = World::window(window);
        let extent = world.extent();
        let mut state = Self {
            world,
            paddle: Paddle::new(extent),
            ball: Ball::new(extent),
            sparks: Vec::new(),
            lives: PONG_LIVES,
            score: 0,
            best,
            new_best: false,
            phase: PongPhase::Playing,
            paused: false,
            dead_zone: CONTROLLER_DEADZONE,
            schedule: Schedule::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.serve();
        state
    }

    fn serve(&mut self) {
        let paddle = self.paddle.body.rect();
        self.ball.serve(&paddle, self.world.extent(), &mut self.rng);
        self.phase = PongPhase::Playing;
    }

    /// Start over after game over
    pub fn restart(&mut self) {
        log::info!("Half-Pong restart");
        self.lives = PONG_LIVES;
        self.score = 0;
        self.new_best = false;
        self.paused = false;
        self.sparks.clear();
        self.schedule.cancel_all();
        self.serve();
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::WindowResized { width, height } => {
                self.resize(Extent::new(width, height));
            }
            _ if self.phase == PongPhase::GameOver => {
                if event.is_press(Key::Space)
                    || event.is_press(Key::Return)
                    || event.is_button(Button::A)
                {
                    self.restart();
                } else {
                    self.paddle.handle_event(event, self.dead_zone);
                }
            }
            _ if event.is_press(Key::P) || event.is_button(Button::Start) => {
                self.paused = !self.paused;
            }
            _ => self.paddle.handle_event(event, self.dead_zone),
        }
    }

    /// Re-derive every pixel rect for a new window size
    pub fn resize(&mut self, window: Extent) {
        if self.world.resize(window) {
            let extent = self.world.extent();
            self.paddle.body.resize(extent);
            self.ball.body.resize(extent);
            for spark in &mut self.sparks {
                spark.body.resize(extent);
            }
        }
    }

    /// Advance by `dt_ms` of wall-clock time
    pub fn tick(&mut self, dt_ms: u32) -> Vec<PongEvent> {
        let mut events = Vec::new();
        if self.paused {
            return events;
        }
        let extent = self.world.extent();

        for timer in self.schedule.advance(dt_ms) {
            match timer {
                PongTimer::ResetBall => self.serve(),
            }
        }

        self.paddle.update(dt_ms, extent);

        for spark in &mut self.sparks {
            spark.remaining_ms = spark.remaining_ms.saturating_sub(dt_ms);
        }
        self.sparks.retain(|s| s.remaining_ms > 0);

        if self.phase != PongPhase::Playing {
            return events;
        }

        match self.ball.update(dt_ms, extent, &self.paddle) {
            BallOutcome::None => {}
            BallOutcome::PaddleHit => {
                self.score += 1;
                events.push(PongEvent::PaddleHit { score: self.score });
            }
            BallOutcome::Goal => {
                self.lives = self.lives.saturating_sub(1);
                self.create_sparks();
                self.ball.park();
                log::debug!("Goal, {} lives left", self.lives);

                if self.lives == 0 {
                    self.phase = PongPhase::GameOver;
                    self.new_best = self.score > self.best;
                    if self.new_best {
                        self.best = self.score;
                    }
                    log::info!("Game over, score {} (best {})", self.score, self.best);
                    events.push(PongEvent::GameOver {
                        score: self.score,
                        new_best: self.new_best,
                    });
                } else {
                    self.phase = PongPhase::Scored;
                    self.schedule.after(PONG_RESET_DELAY_MS, PongTimer::ResetBall);
                    events.push(PongEvent::Goal { lives: self.lives });
                }
            }
        }

        events
    }

    /// Burst of sparks where the ball left the field
    fn create_sparks(&mut self) {
        let extent = self.world.extent();
        let b = self.ball.body.bounds();
        // Keep the ball centre on screen so the burst is visible
        let center = DVec2::new(
            (b.x + b.w / 2.0).min(1.0),
            (b.y + b.h / 2.0).clamp(0.0, 1.0),
        );
        let aspect = f64::from(extent.width) / f64::from(extent.height.max(1));

        let count = self.rng.random_range(15..=30);
        for _ in 0..count {
            let size: f64 = self.rng.random_range(0.001..0.007);
            let offset = DVec2::new(
                self.rng.random_range(-0.02..0.02),
                self.rng.random_range(-0.02..0.02),
            );
            let pos = center + offset;
            let bounds = RelRect::new(pos.x, pos.y, size, size * aspect);
            self.sparks.push(Spark {
                body: Object::new("spark", bounds, extent).with_color(Color::SPARK),
                remaining_ms: self.rng.random_range(100..=400),
            });
        }
    }
}
