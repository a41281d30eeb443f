//! Collision response for circular bodies
//!
//! Every function here is pure: positions and velocities go in by value and
//! new values come out. Only the velocity component along the line joining
//! the two reference points changes; the tangential component is untouched,
//! which is what lets a ball roll off another one.
//!
//! Coincident reference points (zero separation) divide by zero and yield
//! NaN. That case is left unguarded on purpose; see DESIGN.md.

use glam::Vec2;

/// Push two overlapping circles apart along the line of centers.
///
/// The correction is split equally between both circles (position fix-up,
/// not a physical response), so afterwards the centers are exactly
/// `r1 + r2` apart. Circles that do not overlap are returned unchanged.
pub fn push_away(x1: Vec2, x2: Vec2, r1: f32, r2: f32) -> (Vec2, Vec2) {
    let diff = x1 - x2;
    let dist = diff.length();
    if dist >= r1 + r2 {
        return (x1, x2);
    }
    let off = diff * ((r1 + r2 - dist) / (2.0 * dist));
    (x1 + off, x2 - off)
}

/// Perfectly elastic collision between two moving bodies
#[inline]
pub fn collide_elastic(x1: Vec2, x2: Vec2, v1: Vec2, v2: Vec2, m1: f32, m2: f32) -> (Vec2, Vec2) {
    exchange(x1, x2, v1, v2, m1, m2, 2.0)
}

/// Inelastic collision with coefficient of restitution `cr` in `[0, 1]`.
///
/// `cr = 0` removes all relative normal velocity, `cr = 1` is elastic.
#[inline]
pub fn collide_inelastic(
    x1: Vec2,
    x2: Vec2,
    v1: Vec2,
    v2: Vec2,
    m1: f32,
    m2: f32,
    cr: f32,
) -> (Vec2, Vec2) {
    exchange(x1, x2, v1, v2, m1, m2, 1.0 + cr)
}

/// Inelastic collision of a body at `x1` against an immovable point `x2`
/// (a wall contact point) moving with `v2`. Returns the body's new velocity.
pub fn collide_inelastic_immovable(x1: Vec2, x2: Vec2, v1: Vec2, v2: Vec2, cr: f32) -> Vec2 {
    let diff = x1 - x2;
    v1 - diff * ((1.0 + cr) * (v1 - v2).dot(diff) / diff.length_squared())
}

/// Mass-weighted impulse exchange along the line of centers
fn exchange(x1: Vec2, x2: Vec2, v1: Vec2, v2: Vec2, m1: f32, m2: f32, k: f32) -> (Vec2, Vec2) {
    let diff = x1 - x2;
    let off = k * (v1 - v2).dot(diff) / ((m1 + m2) * diff.length_squared());
    (v1 - diff * (off * m2), v2 + diff * (off * m1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_push_away_restores_contact_distance() {
        let (a, b) = push_away(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 15.0, 15.0);
        assert!(approx(a, Vec2::new(-10.0, 0.0)));
        assert!(approx(b, Vec2::new(20.0, 0.0)));
        assert!(((a - b).length() - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_push_away_ignores_separated_circles() {
        let x1 = Vec2::new(0.0, 0.0);
        let x2 = Vec2::new(50.0, 0.0);
        assert_eq!(push_away(x1, x2, 15.0, 15.0), (x1, x2));
    }

    #[test]
    fn test_elastic_head_on_equal_mass_swaps() {
        let (v1, v2) = collide_elastic(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(-1.0, 0.0),
            1.0,
            1.0,
        );
        assert!(approx(v1, Vec2::new(-1.0, 0.0)));
        assert!(approx(v2, Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_inelastic_zero_restitution_kills_normal_velocity() {
        let (v1, v2) = collide_inelastic(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(-1.0, 0.0),
            1.0,
            1.0,
            0.0,
        );
        assert!(approx(v1, Vec2::ZERO));
        assert!(approx(v2, Vec2::ZERO));
    }

    #[test]
    fn test_inelastic_conserves_momentum() {
        let (m1, m2) = (225.0, 400.0);
        let (u1, u2) = (Vec2::new(30.0, 5.0), Vec2::new(-10.0, 2.0));
        let (v1, v2) = collide_inelastic(
            Vec2::new(0.0, 0.0),
            Vec2::new(20.0, 15.0),
            u1,
            u2,
            m1,
            m2,
            0.2,
        );
        let before = u1 * m1 + u2 * m2;
        let after = v1 * m1 + v2 * m2;
        assert!((before - after).length() < 1e-2);
    }

    #[test]
    fn test_tangential_velocity_untouched() {
        // Line of centers is horizontal, so vertical velocity must survive
        let (v1, v2) = collide_inelastic(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(2.0, 7.0),
            Vec2::new(-2.0, -3.0),
            1.0,
            1.0,
            0.5,
        );
        assert!((v1.y - 7.0).abs() < 1e-5);
        assert!((v2.y + 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_immovable_floor_bounce() {
        // Ball resting on the floor at y = 470 moving down at 100
        let v = collide_inelastic_immovable(
            Vec2::new(50.0, 455.0),
            Vec2::new(50.0, 470.0),
            Vec2::new(5.0, 100.0),
            Vec2::ZERO,
            0.5,
        );
        assert!(approx(v, Vec2::new(5.0, -50.0)));
    }
}
