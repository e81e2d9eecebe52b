//! Shared entity body
//!
//! Every paddle, ball, tile, platform and exit is an `Object` plus whatever
//! game-specific state wraps it. The object owns both views of its extent and
//! keeps them in sync:
//! - motion is integrated on `bounds` (world fractions), then `rect` is derived
//! - pixel corrections (snapping out of a wall) are applied to `rect`, then
//!   `bounds` is derived

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::{Contact, HitPosition, contact_moving};
use super::rect::{Extent, Rect, RelRect};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Default object and text color
    pub const AMBER: Color = Color::rgb(210, 160, 10);
    pub const TILE: Color = Color::rgb(40, 40, 160);
    pub const EXIT: Color = Color::rgb(200, 100, 100);
    pub const SPARK: Color = Color::rgb(255, 220, 120);
}

/// Anything that can be hit-tested
pub trait Body {
    /// Pixel-space AABB in world coordinates
    fn rect(&self) -> Rect;

    /// Velocity in world fractions per ms
    fn velocity(&self) -> DVec2 {
        DVec2::ZERO
    }
}

/// Position, extent and velocity of a game entity
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub name: &'static str,
    rect: Rect,
    bounds: RelRect,
    /// World fractions per ms
    pub velocity: DVec2,
    /// Velocity step applied per input (or per ms of held input)
    pub speed: f64,
    pub color: Color,
}

impl Object {
    /// Object placed by world-fraction bounds
    pub fn new(name: &'static str, bounds: RelRect, extent: Extent) -> Self {
        Self {
            name,
            rect: bounds.to_rect(extent),
            bounds,
            velocity: DVec2::ZERO,
            speed: 0.0,
            color: Color::AMBER,
        }
    }

    /// Object placed by pixel rect
    pub fn from_rect(name: &'static str, rect: Rect, extent: Extent) -> Self {
        Self {
            name,
            rect,
            bounds: RelRect::from_rect(rect, extent),
            velocity: DVec2::ZERO,
            speed: 0.0,
            color: Color::AMBER,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn bounds(&self) -> RelRect {
        self.bounds
    }

    /// Apply a pixel correction and carry it into the world-fraction bounds
    pub fn set_rect(&mut self, rect: Rect, extent: Extent) {
        self.rect = rect;
        self.bounds = RelRect::from_rect(rect, extent);
    }

    pub fn set_bounds(&mut self, bounds: RelRect, extent: Extent) {
        self.bounds = bounds;
        self.rect = bounds.to_rect(extent);
    }

    /// Move the top-left corner (world fractions), keeping the size
    pub fn set_position(&mut self, pos: DVec2, extent: Extent) {
        let mut b = self.bounds;
        b.x = pos.x;
        b.y = pos.y;
        self.set_bounds(b, extent);
    }

    /// Re-derive the pixel rect after the world changed size
    pub fn resize(&mut self, extent: Extent) {
        self.rect = self.bounds.to_rect(extent);
    }

    /// Euler step: `bounds += velocity * dt`
    ///
    /// Returns the resulting pixel shift of the rect.
    pub fn step(&mut self, dt_ms: u32, extent: Extent) -> (i32, i32) {
        let before = self.rect;
        self.bounds.translate(self.velocity * f64::from(dt_ms));
        self.rect = self.bounds.to_rect(extent);
        (self.rect.x - before.x, self.rect.y - before.y)
    }

    /// Contact with another body, using the velocity relative to it
    pub fn contact(&self, other: &impl Body) -> Contact {
        contact_moving(&self.rect, self.velocity - other.velocity(), &other.rect())
    }

    /// Which side of `other` this object overlaps
    pub fn check_hit(&self, other: &impl Body) -> HitPosition {
        self.contact(other).side
    }
}

impl Body for Object {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn velocity(&self) -> DVec2 {
        self.velocity
    }
}

impl Body for Rect {
    fn rect(&self) -> Rect {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: Extent = Extent::new(800, 600);

    #[test]
    fn test_step_integrates_bounds() {
        let mut obj = Object::new("ball", RelRect::new(0.1, 0.5, 0.03, 0.04), WORLD);
        assert_eq!(obj.rect(), Rect::new(80, 300, 24, 24));

        obj.velocity = DVec2::new(1.0 / 8000.0, 0.0);
        // 0.1 px per ms: ten 1 ms steps move one pixel even though each
        // single step rounds to nothing
        for _ in 0..10 {
            obj.step(1, WORLD);
        }
        assert_eq!(obj.rect().x, 81);

        let (dx, dy) = obj.step(80, WORLD);
        assert_eq!((dx, dy), (8, 0));
    }

    #[test]
    fn test_set_rect_syncs_bounds() {
        let mut obj = Object::new("tile", RelRect::new(0.0, 0.0, 0.1, 0.1), WORLD);
        obj.set_rect(Rect::new(400, 300, 80, 60), WORLD);
        assert!((obj.bounds().x - 0.5).abs() < 1e-12);
        assert!((obj.bounds().y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_resize_keeps_fractions() {
        let mut obj = Object::new("paddle", RelRect::new(0.9, 0.25, 0.025, 0.1), WORLD);
        obj.resize(Extent::new(1600, 1200));
        assert_eq!(obj.rect(), Rect::new(1440, 300, 40, 120));
    }

    #[test]
    fn test_check_hit_uses_relative_velocity() {
        let mut player = Object::from_rect("player", Rect::new(100, 95, 20, 20), WORLD);
        let mut platform = Object::from_rect("platform", Rect::new(0, 110, 300, 20), WORLD);
        player.velocity = DVec2::new(0.0, 0.001);
        assert_eq!(player.check_hit(&platform), HitPosition::Top);

        // A platform dropping away faster than the player can't be landed on
        platform.velocity = DVec2::new(0.0, 0.01);
        assert_eq!(player.check_hit(&platform), HitPosition::Bottom);
    }
}
