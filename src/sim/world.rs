//! World extent and camera scrolling

use glam::DVec2;

use super::rect::{Extent, Rect};

/// Level extent tied to the window size by a fixed ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct World {
    extent: Extent,
    /// level size / window size
    ratio: DVec2,
}

impl World {
    /// A level of `level` pixels shown in a window of `window` pixels
    pub fn relative_to(level: Extent, window: Extent) -> Self {
        let ratio = level.as_dvec2() / window.as_dvec2().max(DVec2::ONE);
        Self {
            extent: level,
            ratio,
        }
    }

    /// World that is exactly the window
    pub fn window(window: Extent) -> Self {
        Self::relative_to(window, window)
    }

    #[inline]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Rescale after the window changed size. Returns whether the level
    /// extent changed (objects then need `Object::resize`).
    pub fn resize(&mut self, window: Extent) -> bool {
        let scaled = window.as_dvec2() * self.ratio;
        let extent = Extent::new(scaled.x.round() as i32, scaled.y.round() as i32);
        let changed = extent != self.extent;
        self.extent = extent;
        changed
    }
}

/// Window-sized view into a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    pub rect: Rect,
}

impl Camera {
    pub fn new(window: Extent) -> Self {
        Self {
            rect: window.rect(),
        }
    }

    pub fn set_size(&mut self, window: Extent) {
        self.rect.w = window.width;
        self.rect.h = window.height;
    }

    /// Centre on `target`, clamped so the view never leaves the level
    pub fn center_on(&mut self, target: &Rect, level: Extent) {
        let (cx, cy) = target.center();
        self.rect.x = clamp_axis(cx - self.rect.w / 2, level.width - self.rect.w);
        self.rect.y = clamp_axis(cy - self.rect.h / 2, level.height - self.rect.h);
    }

    /// Level coordinates to screen coordinates
    pub fn to_screen(&self, rect: &Rect) -> Rect {
        rect.translate(-self.rect.x, -self.rect.y)
    }

    pub fn visible(&self, rect: &Rect) -> bool {
        self.rect.overlaps(rect)
    }
}

/// Clamp to `[0, max]`; a level narrower than the view pins to 0
fn clamp_axis(value: i32, max: i32) -> i32 {
    value.min(max).max(0)
}
