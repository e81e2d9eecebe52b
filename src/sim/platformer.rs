//! Platformer: run and jump across platforms to the exit
//!
//! Each tick moves the platforms first, then the player (gravity, friction,
//! held input), then resolves the player against every platform with the
//! velocity-aware hit test. The pixel shift of each platform is carried to a
//! player standing on it.

use glam::DVec2;

use super::collision::HitPosition;
use super::input::{Button, ControlDir, HeldKeys, InputEvent, Key, axis_direction};
use super::levels::{LevelSet, TileSpec};
use super::object::{Color, Object};
use super::rect::{Extent, MovementLimits, MovementRange, Rect, RelRect};
use super::timer::Schedule;
use super::world::{Camera, World};
use crate::consts::*;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformerEvent {
    ExitReached { level: usize },
    LevelLoaded { level: usize },
    /// Player fell out of the level and was put back at the start
    PlayerReset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlatformerTimer {
    NextLevel,
}

/// Tile that may travel back and forth inside its limits
#[derive(Debug, Clone)]
pub struct Platform {
    pub body: Object,
    origin: RelRect,
    range: Option<MovementRange>,
    limits: Option<MovementLimits>,
}

impl Platform {
    pub fn from_spec(spec: &TileSpec, extent: Extent) -> Self {
        let mut body = Object::new("tile", spec.rect, extent).with_color(Color::TILE);
        let (range, limits) = match spec.motion() {
            Some((range, velocity)) => {
                body.velocity = velocity;
                (Some(range), Some(range.to_limits(&body.rect(), extent)))
            }
            None => (None, None),
        };
        Self {
            body,
            origin: spec.rect,
            range,
            limits,
        }
    }

    pub fn limits(&self) -> Option<MovementLimits> {
        self.limits
    }

    /// Reverse on any axis whose limit was reached, then step. Returns the
    /// pixel shift.
    pub fn update(&mut self, dt_ms: u32, extent: Extent) -> (i32, i32) {
        let Some(limits) = self.limits else {
            return (0, 0);
        };
        let r = self.body.rect();
        let v = &mut self.body.velocity;

        if (v.x > 0.0 && r.right() >= limits.right) || (v.x < 0.0 && r.x <= limits.left) {
            v.x = -v.x;
        }
        if (v.y > 0.0 && r.bottom() >= limits.bottom) || (v.y < 0.0 && r.y <= limits.top) {
            v.y = -v.y;
        }

        self.body.step(dt_ms, extent)
    }

    pub fn resize(&mut self, extent: Extent) {
        self.body.resize(extent);
        if let Some(range) = self.range {
            self.limits = Some(range.to_limits(&self.origin.to_rect(extent), extent));
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Object,
    pub start: DVec2,
    pub held: HeldKeys,
    /// Stick direction along x: -1, 0 or 1
    pub stick: i8,
    pub on_surface: bool,
    /// Frozen inside the exit
    pub exited: bool,
    pub velocity_max: f64,
    pub velocity_jump: f64,
    /// Horizontal velocity change allowed between take-off and landing
    pub allowed_air_deltav: f64,
    pub in_air_deltav: f64,
    /// Scales stick input, which would otherwise be too twitchy
    pub controller_sensitivity: f64,
    pub dead_zone: i16,
}

impl Player {
    const SIZE: DVec2 = DVec2::new(0.02, 0.07);

    pub fn new(start: DVec2, extent: Extent) -> Self {
        let bounds = RelRect::new(start.x, start.y, Self::SIZE.x, Self::SIZE.y);
        Self {
            body: Object::new("player", bounds, extent).with_speed(1.0 / 200_000.0),
            start,
            held: HeldKeys::default(),
            stick: 0,
            on_surface: true,
            exited: false,
            velocity_max: 1.0 / 800.0,
            velocity_jump: 1.0 / 700.0,
            allowed_air_deltav: 1.0 / 1600.0,
            in_air_deltav: 0.0,
            controller_sensitivity: 0.5,
            dead_zone: CONTROLLER_DEADZONE,
        }
    }

    /// Back to the start, at rest
    pub fn reset(&mut self, extent: Extent) {
        self.body.set_position(self.start, extent);
        self.body.velocity = DVec2::ZERO;
        self.exited = false;
        self.on_surface = true;
        self.in_air_deltav = 0.0;
        self.stick = 0;
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        self.held.update(event);

        if event.is_press(Key::Up) || event.is_press(Key::Space) || event.is_button(Button::A) {
            self.jump(1.0);
            return;
        }

        match *event {
            InputEvent::ControllerAxis { which: 0, axis, value }
            | InputEvent::JoyAxis { which: 0, axis, value } => {
                match axis_direction(axis, value, self.dead_zone) {
                    ControlDir::Left => self.stick = -1,
                    ControlDir::Right => self.stick = 1,
                    ControlDir::Up => self.jump(self.controller_sensitivity),
                    ControlDir::None if axis == 0 => self.stick = 0,
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn jump(&mut self, sensitivity: f64) {
        if self.on_surface && !self.exited {
            self.body.velocity.y = -self.velocity_jump * sensitivity;
            self.on_surface = false;
            self.in_air_deltav = 0.0;
        }
    }

    /// Keys win over the stick; stick input is scaled by the sensitivity
    fn horizontal_input(&self) -> f64 {
        match self.held.horizontal() {
            0 => f64::from(self.stick) * self.controller_sensitivity,
            dir => f64::from(dir),
        }
    }

    fn accelerate(&mut self, input: f64, dt_ms: u32) {
        if !self.on_surface && self.in_air_deltav > self.allowed_air_deltav {
            return;
        }
        let delta = input * self.body.speed * f64::from(dt_ms);
        let vx = &mut self.body.velocity.x;
        let before = *vx;
        if input > 0.0 && *vx < self.velocity_max {
            *vx = (*vx + delta).min(self.velocity_max);
        } else if input < 0.0 && *vx > -self.velocity_max {
            *vx = (*vx + delta).max(-self.velocity_max);
        }
        if !self.on_surface {
            self.in_air_deltav += (*vx - before).abs();
        }
    }

    fn apply_friction(&mut self, dt_ms: u32) {
        let fric = FRICTION * f64::from(dt_ms);
        let vx = &mut self.body.velocity.x;
        if *vx > 0.0 {
            *vx = (*vx - fric).max(0.0);
        } else {
            *vx = (*vx + fric).min(0.0);
        }
    }

    /// Move and resolve against the platforms. `shifts[i]` is the pixel
    /// shift platform `i` made this tick.
    pub fn update(
        &mut self,
        dt_ms: u32,
        extent: Extent,
        platforms: &[Platform],
        shifts: &[(i32, i32)],
    ) {
        if self.exited {
            return;
        }

        let input = self.horizontal_input();
        if input != 0.0 {
            self.accelerate(input, dt_ms);
        }
        if !self.on_surface {
            self.body.velocity.y += GRAVITY * f64::from(dt_ms);
        } else if input == 0.0 {
            self.apply_friction(dt_ms);
        }

        // A player standing on a platform moves with its pixel shift, so
        // rounding never sinks it into the platform
        let carrier = if self.on_surface {
            let r = self.body.rect();
            platforms
                .iter()
                .zip(shifts)
                .find(|&(p, &(dx, dy))| r.rests_on(&p.body.rect().translate(-dx, -dy)))
                .map(|(_, &shift)| shift)
        } else {
            None
        };
        if carrier.is_some() {
            self.body.velocity.y = 0.0;
        }

        self.body.step(dt_ms, extent);
        if let Some((dx, dy)) = carrier {
            let r = self.body.rect().translate(dx, dy);
            self.body.set_rect(r, extent);
        }

        self.on_surface = false;
        for (platform, &(shift_x, _)) in platforms.iter().zip(shifts) {
            let tile = platform.body.rect();
            let contact = self.body.contact(&platform.body);
            let mut r = self.body.rect();
            let v = &mut self.body.velocity;
            match contact.side {
                HitPosition::None => continue,
                HitPosition::Left => {
                    if v.x > 0.0 {
                        v.x = 0.0;
                    }
                    r.x = tile.x - r.w;
                }
                HitPosition::Right => {
                    if v.x < 0.0 {
                        v.x = 0.0;
                    }
                    r.x = tile.right();
                }
                HitPosition::Top => {
                    v.y = platform.body.velocity.y;
                    r.y = tile.y - r.h;
                    r.x += shift_x;
                    self.on_surface = true;
                    self.in_air_deltav = 0.0;
                }
                HitPosition::Bottom => {
                    if v.y < 0.0 {
                        v.y = -v.y;
                    }
                    r.y = tile.bottom();
                }
            }
            self.body.set_rect(r, extent);
        }

        // Standing exactly on a platform touches it without overlapping
        if !self.on_surface {
            let r = self.body.rect();
            let resting = platforms
                .iter()
                .zip(shifts)
                .find(|(p, _)| r.rests_on(&p.body.rect()));
            if let Some((platform, &(shift_x, _))) = resting {
                self.on_surface = true;
                self.in_air_deltav = 0.0;
                self.body.velocity.y = platform.body.velocity.y;
                if carrier.is_none() && shift_x != 0 {
                    self.body.set_rect(r.translate(shift_x, 0), extent);
                }
            }
        }
    }

    /// Centre in the exit and freeze if overlapping it
    pub fn check_exit(&mut self, exit: &Rect, extent: Extent) -> bool {
        if !self.exited && self.body.rect().overlaps(exit) {
            let centred = self.body.rect().centered_in(exit);
            self.body.set_rect(centred, extent);
            self.body.velocity = DVec2::ZERO;
            self.exited = true;
        }
        self.exited
    }
}

/// Complete platformer state
#[derive(Debug, Clone)]
pub struct PlatformerState {
    pub world: World,
    pub camera: Camera,
    pub levels: LevelSet,
    pub level: usize,
    pub platforms: Vec<Platform>,
    pub exit: Object,
    pub player: Player,
    schedule: Schedule<PlatformerTimer>,
}

impl PlatformerState {
    pub fn new(window: Extent, levels: LevelSet) -> Result<Self> {
        let world = World::relative_to(Extent::new(LEVEL_WIDTH, LEVEL_HEIGHT), window);
        let extent = world.extent();
        let first = levels.get(0)?;
        let exit = Object::new("goal", first.goal, extent).with_color(Color::EXIT);
        let player = Player::new(first.start, extent);

        let mut state = Self {
            world,
            camera: Camera::new(window),
            levels,
            level: 0,
            platforms: Vec::new(),
            exit,
            player,
            schedule: Schedule::new(),
        };
        state.load_level(0)?;
        Ok(state)
    }

    /// Build platforms and exit for level `number` and reset the player
    pub fn load_level(&mut self, number: usize) -> Result<()> {
        let extent = self.world.extent();
        let coords = self.levels.get(number)?;

        self.platforms = coords
            .tiles
            .iter()
            .map(|spec| Platform::from_spec(spec, extent))
            .collect();
        self.exit = Object::new("goal", coords.goal, extent).with_color(Color::EXIT);
        self.player.start = coords.start;
        self.player.reset(extent);
        self.level = number;
        self.schedule.cancel_all();
        self.camera.center_on(&self.player.body.rect(), extent);
        log::info!(
            "Platformer level {} loaded ({} platforms)",
            number,
            self.platforms.len()
        );
        Ok(())
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::WindowResized { width, height } => {
                self.resize(Extent::new(width, height));
            }
            _ => self.player.handle_event(event),
        }
    }

    pub fn resize(&mut self, window: Extent) {
        self.camera.set_size(window);
        if self.world.resize(window) {
            let extent = self.world.extent();
            for platform in &mut self.platforms {
                platform.resize(extent);
            }
            self.exit.resize(extent);
            self.player.body.resize(extent);
        }
        self.camera
            .center_on(&self.player.body.rect(), self.world.extent());
    }

    pub fn tick(&mut self, dt_ms: u32) -> Vec<PlatformerEvent> {
        let mut events = Vec::new();
        let extent = self.world.extent();

        for timer in self.schedule.advance(dt_ms) {
            match timer {
                PlatformerTimer::NextLevel => {
                    let next = self.levels.next_index(self.level);
                    match self.load_level(next) {
                        Ok(()) => events.push(PlatformerEvent::LevelLoaded { level: next }),
                        Err(e) => log::error!("Failed to load platformer level {}: {}", next, e),
                    }
                }
            }
        }

        let shifts: Vec<(i32, i32)> = self
            .platforms
            .iter_mut()
            .map(|p| p.update(dt_ms, extent))
            .collect();

        if !self.player.exited {
            self.player.update(dt_ms, extent, &self.platforms, &shifts);

            if self.player.body.rect().y > extent.height {
                log::debug!("Player fell out of level {}", self.level);
                self.player.reset(extent);
                events.push(PlatformerEvent::PlayerReset);
            } else if self.player.check_exit(&self.exit.rect(), extent) {
                log::debug!("Exit reached on level {}", self.level);
                self.schedule
                    .after(PLATFORMER_RESET_DELAY_MS, PlatformerTimer::NextLevel);
                events.push(PlatformerEvent::ExitReached { level: self.level });
            }
        }

        self.camera.center_on(&self.player.body.rect(), extent);
        events
    }
}
