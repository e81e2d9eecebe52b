//! Hit detection and response for axis-aligned boxes
//!
//! A hit is reported as the side of the TARGET the mover overlaps. The side
//! is the one with the shallowest penetration, so a box that just crossed an
//! edge reports that edge. Response is a sign flip on the hit axis only.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Which side of a target an AABB overlaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HitPosition {
    #[default]
    None,
    Left,
    Right,
    Top,
    Bottom,
}

impl HitPosition {
    #[inline]
    pub fn is_hit(&self) -> bool {
        *self != HitPosition::None
    }

    /// Whether a mover travelling with `velocity` (relative to the target)
    /// is moving into this side. No motion along an axis rules out both of
    /// its sides.
    fn approached_by(&self, velocity: DVec2) -> bool {
        match self {
            HitPosition::None => false,
            HitPosition::Left => velocity.x > 0.0,
            HitPosition::Right => velocity.x < 0.0,
            HitPosition::Top => velocity.y > 0.0,
            HitPosition::Bottom => velocity.y < 0.0,
        }
    }
}

/// Vertical sides win ties so a box landing on a corner lands instead of
/// sliding off
const SIDE_ORDER: [HitPosition; 4] = [
    HitPosition::Top,
    HitPosition::Bottom,
    HitPosition::Left,
    HitPosition::Right,
];

/// Result of a hit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    /// Side of the target that was hit
    pub side: HitPosition,
    /// Overlap along the hit axis in pixels (for position correction)
    pub depth: i32,
}

impl Contact {
    pub fn miss() -> Self {
        Self {
            side: HitPosition::None,
            depth: 0,
        }
    }
}

/// Penetration of `mover` past each side of `target`
#[derive(Debug, Clone, Copy)]
struct Penetration {
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
}

impl Penetration {
    fn between(mover: &Rect, target: &Rect) -> Option<Self> {
        if !mover.overlaps(target) {
            return None;
        }
        Some(Self {
            left: mover.right() - target.x,
            right: target.right() - mover.x,
            top: mover.bottom() - target.y,
            bottom: target.bottom() - mover.y,
        })
    }

    fn depth(&self, side: HitPosition) -> i32 {
        match side {
            HitPosition::None => 0,
            HitPosition::Left => self.left,
            HitPosition::Right => self.right,
            HitPosition::Top => self.top,
            HitPosition::Bottom => self.bottom,
        }
    }

    fn shallowest(&self, allowed: impl Fn(HitPosition) -> bool) -> Contact {
        let mut best = Contact::miss();
        let mut best_depth = i32::MAX;
        for side in SIDE_ORDER {
            if !allowed(side) {
                continue;
            }
            let depth = self.depth(side);
            if depth < best_depth {
                best_depth = depth;
                best = Contact { side, depth };
            }
        }
        best
    }
}

/// Full contact info between a mover and a stationary target
pub fn contact(mover: &Rect, target: &Rect) -> Contact {
    match Penetration::between(mover, target) {
        Some(pen) => pen.shallowest(|_| true),
        None => Contact::miss(),
    }
}

/// Contact info using the mover's velocity relative to the target
///
/// Sides the mover can't be entering through are skipped, which keeps a fast
/// box from being pushed out the far side of a thin tile. Falls back to the
/// plain shallowest side if no side fits.
pub fn contact_moving(mover: &Rect, velocity: DVec2, target: &Rect) -> Contact {
    let Some(pen) = Penetration::between(mover, target) else {
        return Contact::miss();
    };
    let found = pen.shallowest(|side| side.approached_by(velocity));
    if found.side.is_hit() {
        found
    } else {
        pen.shallowest(|_| true)
    }
}

/// Which side of `target` the `mover` overlaps
pub fn check_hit(mover: &Rect, target: &Rect) -> HitPosition {
    contact(mover, target).side
}

/// Velocity-aware `check_hit`
pub fn check_hit_moving(mover: &Rect, velocity: DVec2, target: &Rect) -> HitPosition {
    contact_moving(mover, velocity, target).side
}

/// Point the hit-axis component away from the target and scale it by
/// `restitution`. The other axis is untouched.
pub fn reflect(velocity: DVec2, hit: HitPosition, restitution: f64) -> DVec2 {
    let mut v = velocity;
    match hit {
        HitPosition::None => {}
        HitPosition::Left => v.x = -v.x.abs() * restitution,
        HitPosition::Right => v.x = v.x.abs() * restitution,
        HitPosition::Top => v.y = -v.y.abs() * restitution,
        HitPosition::Bottom => v.y = v.y.abs() * restitution,
    }
    v
}

/// Move `mover` along the hit axis until it just touches `target`
pub fn separate(mover: &Rect, target: &Rect, hit: HitPosition) -> Rect {
    let mut r = *mover;
    match hit {
        HitPosition::None => {}
        HitPosition::Left => r.x = target.x - r.w,
        HitPosition::Right => r.x = target.right(),
        HitPosition::Top => r.y = target.y - r.h,
        HitPosition::Bottom => r.y = target.bottom(),
    }
    r
}
