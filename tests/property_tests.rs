use glam::DVec2;
use proptest::prelude::*;
use sb_arcade::sim::{HitPosition, Rect, check_hit, check_hit_moving, reflect};

fn side_strategy() -> impl Strategy<Value = HitPosition> {
    prop_oneof![
        Just(HitPosition::Left),
        Just(HitPosition::Right),
        Just(HitPosition::Top),
        Just(HitPosition::Bottom),
    ]
}

/// Mover of size `w`x`h` overlapping `target` by `depth` on `side`, shifted
/// by `offset` from the target's edge along the other axis
fn mover_on_side(target: Rect, side: HitPosition, w: i32, h: i32, offset: i32, depth: i32) -> Rect {
    match side {
        HitPosition::Left => Rect::new(target.x - w + depth, target.y + offset, w, h),
        HitPosition::Right => Rect::new(target.right() - depth, target.y + offset, w, h),
        HitPosition::Top => Rect::new(target.x + offset, target.y - h + depth, w, h),
        HitPosition::Bottom => Rect::new(target.x + offset, target.bottom() - depth, w, h),
        HitPosition::None => unreachable!(),
    }
}

/// Velocity heading into `side` of the target
fn velocity_into(side: HitPosition, speed: f64) -> DVec2 {
    match side {
        HitPosition::Left => DVec2::new(speed, 0.0),
        HitPosition::Right => DVec2::new(-speed, 0.0),
        HitPosition::Top => DVec2::new(0.0, speed),
        HitPosition::Bottom => DVec2::new(0.0, -speed),
        HitPosition::None => DVec2::ZERO,
    }
}

proptest! {
    /// Property: rectangles that don't overlap never report a hit
    #[test]
    fn disjoint_rects_report_none(
        x in -500i32..500,
        y in -500i32..500,
        w in 1i32..200,
        h in 1i32..200,
        tw in 1i32..200,
        th in 1i32..200,
        gap in 0i32..50,
        horizontal in any::<bool>(),
        vx in -1.0f64..1.0,
        vy in -1.0f64..1.0,
    ) {
        let mover = Rect::new(x, y, w, h);
        let target = if horizontal {
            Rect::new(mover.right() + gap, y, tw, th)
        } else {
            Rect::new(x, mover.bottom() + gap, tw, th)
        };

        prop_assert_eq!(check_hit(&mover, &target), HitPosition::None);
        prop_assert_eq!(check_hit(&target, &mover), HitPosition::None);
        prop_assert_eq!(
            check_hit_moving(&mover, DVec2::new(vx, vy), &target),
            HitPosition::None
        );
    }

    /// Property: a rect moving along one axis into a stationary rect hits the
    /// side facing it, even when it only clips a corner
    #[test]
    fn single_axis_approach_hits_facing_side(
        side in side_strategy(),
        tx in -500i32..500,
        ty in -500i32..500,
        tw in 60i32..300,
        th in 60i32..300,
        size in 10i32..40,
        cross_frac in 0.0f64..1.0,
        depth_frac in 0.0f64..1.0,
        speed in 1e-6f64..1e-2,
    ) {
        let target = Rect::new(tx, ty, tw, th);
        let span = match side {
            HitPosition::Left | HitPosition::Right => th,
            _ => tw,
        };
        // Anywhere from 1px of overlap past one corner to 1px past the other
        let offset = -(size - 1) + (cross_frac * f64::from(span + size - 2)) as i32;
        let depth = 1 + (depth_frac * f64::from(size - 2)) as i32;
        let mover = mover_on_side(target, side, size, size, offset, depth);
        prop_assert!(mover.overlaps(&target));

        prop_assert_eq!(check_hit_moving(&mover, velocity_into(side, speed), &target), side);
        if offset >= 0 && offset + size <= span {
            prop_assert_eq!(check_hit(&mover, &target), side);
        }
    }

    /// Property: reflection flips only the hit axis, pointing away from the target
    #[test]
    fn reflect_flips_only_hit_axis(
        side in side_strategy(),
        vx in -1.0f64..1.0,
        vy in -1.0f64..1.0,
    ) {
        let v = DVec2::new(vx, vy);
        let r = reflect(v, side, 1.0);

        match side {
            HitPosition::Left | HitPosition::Right => {
                prop_assert_eq!(r.y, v.y);
                prop_assert_eq!(r.x.abs(), v.x.abs());
                if side == HitPosition::Left {
                    prop_assert!(r.x <= 0.0);
                } else {
                    prop_assert!(r.x >= 0.0);
                }
            }
            _ => {
                prop_assert_eq!(r.x, v.x);
                prop_assert_eq!(r.y.abs(), v.y.abs());
                if side == HitPosition::Top {
                    prop_assert!(r.y <= 0.0);
                } else {
                    prop_assert!(r.y >= 0.0);
                }
            }
        }
    }

    /// Property: a miss leaves the velocity untouched
    #[test]
    fn reflect_none_is_identity(vx in -1.0f64..1.0, vy in -1.0f64..1.0) {
        let v = DVec2::new(vx, vy);
        prop_assert_eq!(reflect(v, HitPosition::None, 0.5), v);
    }
}
