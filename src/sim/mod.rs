//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time advances only through the `dt_ms` handed to each `tick`
//! - Seeded RNG only
//! - Deferred work goes through `Schedule`, polled by the tick
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod levels;
pub mod maze;
pub mod object;
pub mod platformer;
pub mod pong;
pub mod rect;
pub mod timer;
pub mod world;

pub use collision::{
    Contact, HitPosition, check_hit, check_hit_moving, contact, contact_moving, reflect, separate,
};
pub use input::{Button, ControlDir, HeldKeys, InputEvent, Key, axis_direction};
pub use levels::{LevelCoordinates, LevelSet, TileSpec, maze_levels, platformer_levels};
pub use maze::{MazeBall, MazeEvent, MazePhase, MazeState};
pub use object::{Body, Color, Object};
pub use platformer::{Platform, PlatformerEvent, PlatformerState, Player};
pub use pong::{Ball, BallOutcome, Paddle, PongEvent, PongPhase, PongState, Spark};
pub use rect::{Extent, MovementLimits, MovementRange, Rect, RelRect};
pub use timer::{Schedule, Timer};
pub use world::{Camera, World};
