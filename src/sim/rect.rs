//! Axis-aligned rectangles
//!
//! Every entity has two views of its extent:
//! - `Rect`: integer pixels in world space (what gets drawn and hit-tested)
//! - `RelRect`: fractions of the world extent (what survives a resize and
//!   what motion is integrated on)

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Pixel size of a window or level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Extent {
    pub width: i32,
    pub height: i32,
}

impl Extent {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(f64::from(self.width), f64::from(self.height))
    }

    /// Full-extent rect at the origin
    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

/// Pixel-space AABB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Strict overlap: rects that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether `other` lies completely inside this rect
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Same size, centred inside `outer`
    pub fn centered_in(&self, outer: &Rect) -> Self {
        Self {
            x: outer.x + (outer.w - self.w) / 2,
            y: outer.y + (outer.h - self.h) / 2,
            ..*self
        }
    }

    /// Standing exactly on top of `other`: bottom edge on its top edge and
    /// horizontally overlapping
    pub fn rests_on(&self, other: &Rect) -> bool {
        self.bottom() == other.y && self.x < other.right() && other.x < self.right()
    }
}

/// AABB as fractions of the world extent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RelRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl RelRect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Pixel rect for the given extent (rounded to nearest)
    pub fn to_rect(&self, extent: Extent) -> Rect {
        let (ew, eh) = (f64::from(extent.width), f64::from(extent.height));
        Rect::new(
            (self.x * ew).round() as i32,
            (self.y * eh).round() as i32,
            (self.w * ew).round() as i32,
            (self.h * eh).round() as i32,
        )
    }

    pub fn from_rect(rect: Rect, extent: Extent) -> Self {
        let (ew, eh) = (
            f64::from(extent.width.max(1)),
            f64::from(extent.height.max(1)),
        );
        Self::new(
            f64::from(rect.x) / ew,
            f64::from(rect.y) / eh,
            f64::from(rect.w) / ew,
            f64::from(rect.h) / eh,
        )
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn translate(&mut self, delta: DVec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

/// How far a moving platform may travel beyond its initial rect, as world
/// fractions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MovementRange {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl MovementRange {
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Absolute pixel limits around `rect`
    pub fn to_limits(&self, rect: &Rect, extent: Extent) -> MovementLimits {
        let (ew, eh) = (f64::from(extent.width), f64::from(extent.height));
        MovementLimits {
            left: rect.x - (self.left * ew).round() as i32,
            right: rect.right() + (self.right * ew).round() as i32,
            top: rect.y - (self.top * eh).round() as i32,
            bottom: rect.bottom() + (self.bottom * eh).round() as i32,
        }
    }
}

/// Absolute pixel box a moving platform stays within
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MovementLimits {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_strict() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!a.overlaps(&Rect::new(10, 0, 10, 10)));
        assert!(!a.overlaps(&Rect::new(0, 10, 10, 10)));
        assert!(a.overlaps(&Rect::new(9, 9, 10, 10)));
    }

    #[test]
    fn test_rel_rect_round_trip() {
        let extent = Extent::new(800, 600);
        let rect = Rect::new(750, 200, 20, 60);
        let rel = RelRect::from_rect(rect, extent);
        assert_eq!(rel.to_rect(extent), rect);

        // Same fractions at a larger window scale every edge
        let big = rel.to_rect(Extent::new(1600, 1200));
        assert_eq!(big, Rect::new(1500, 400, 40, 120));
    }

    #[test]
    fn test_centered_in() {
        let outer = Rect::new(100, 100, 40, 100);
        let inner = Rect::new(0, 0, 20, 50).centered_in(&outer);
        assert_eq!(inner, Rect::new(110, 125, 20, 50));
        assert!(outer.contains(&inner));
    }

    #[test]
    fn test_rests_on() {
        let floor = Rect::new(0, 100, 200, 10);
        assert!(Rect::new(50, 80, 10, 20).rests_on(&floor));
        assert!(!Rect::new(50, 79, 10, 20).rests_on(&floor));
        assert!(!Rect::new(200, 80, 10, 20).rests_on(&floor));
    }

    #[test]
    fn test_movement_limits() {
        let extent = Extent::new(2000, 1500);
        let rect = Rect::new(1000, 750, 100, 20);
        let limits = MovementRange::new(0.1, 0.05, 0.0, 0.0).to_limits(&rect, extent);
        assert_eq!(limits.left, 800);
        assert_eq!(limits.right, 1200);
        assert_eq!(limits.top, 750);
        assert_eq!(limits.bottom, 770);
    }
}
