//! Pure collision predicates
//!
//! Rectangles are top-left corner plus size. These functions carry no game
//! state so they stay trivially testable.

use glam::Vec2;

/// Axis-aligned overlap test between two rectangles.
pub fn overlaps(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

/// Landing test: a falling body whose bottom edge sits inside the tolerance
/// band below the platform's top surface, with horizontal overlap.
pub fn lands_on(
    pos: Vec2,
    size: Vec2,
    vel_y: f32,
    plat_pos: Vec2,
    plat_size: Vec2,
    tolerance: f32,
) -> bool {
    let bottom = pos.y + size.y;
    vel_y > 0.0
        && bottom > plat_pos.y
        && bottom < plat_pos.y + plat_size.y + tolerance
        && pos.x + size.x > plat_pos.x
        && pos.x < plat_pos.x + plat_size.x
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER: Vec2 = Vec2::new(75.0, 75.0);
    const PLAT: Vec2 = Vec2::new(100.0, 25.0);

    #[test]
    fn test_overlaps_requires_both_axes() {
        let size = Vec2::new(40.0, 40.0);
        assert!(overlaps(
            Vec2::new(0.0, 0.0),
            size,
            Vec2::new(30.0, 30.0),
            size
        ));
        // Off on x only
        assert!(!overlaps(
            Vec2::new(0.0, 0.0),
            size,
            Vec2::new(50.0, 30.0),
            size
        ));
        // Off on y only
        assert!(!overlaps(
            Vec2::new(0.0, 0.0),
            size,
            Vec2::new(30.0, 50.0),
            size
        ));
        // Touching edges do not overlap
        assert!(!overlaps(
            Vec2::new(0.0, 0.0),
            size,
            Vec2::new(40.0, 0.0),
            size
        ));
    }

    #[test]
    fn test_landing_requires_falling() {
        let plat = Vec2::new(100.0, 500.0);
        // Feet just through the platform top
        let pos = Vec2::new(110.0, plat.y - PLAYER.y + 5.0);

        assert!(lands_on(pos, PLAYER, 1.0, plat, PLAT, 8.0));
        assert!(!lands_on(pos, PLAYER, 0.0, plat, PLAT, 8.0));
        assert!(!lands_on(pos, PLAYER, -1.0, plat, PLAT, 8.0));
    }

    #[test]
    fn test_landing_tolerance_band() {
        let plat = Vec2::new(100.0, 500.0);
        let feet_at = |bottom: f32| Vec2::new(110.0, bottom - PLAYER.y);

        // Bottom exactly on the top surface: strict inequality, no hit
        assert!(!lands_on(feet_at(plat.y), PLAYER, 2.0, plat, PLAT, 8.0));
        // Inside the band
        assert!(lands_on(feet_at(plat.y + 1.0), PLAYER, 2.0, plat, PLAT, 8.0));
        assert!(lands_on(
            feet_at(plat.y + PLAT.y + 7.0),
            PLAYER,
            2.0,
            plat,
            PLAT,
            8.0
        ));
        // Past the band
        assert!(!lands_on(
            feet_at(plat.y + PLAT.y + 8.0),
            PLAYER,
            2.0,
            plat,
            PLAT,
            8.0
        ));
    }

    #[test]
    fn test_landing_requires_horizontal_overlap() {
        let plat = Vec2::new(100.0, 500.0);
        let y = plat.y - PLAYER.y + 5.0;

        assert!(!lands_on(Vec2::new(0.0, y), PLAYER, 2.0, plat, PLAT, 8.0));
        assert!(!lands_on(Vec2::new(200.0, y), PLAYER, 2.0, plat, PLAT, 8.0));
        assert!(lands_on(Vec2::new(26.0, y), PLAYER, 2.0, plat, PLAT, 8.0));
    }
}
