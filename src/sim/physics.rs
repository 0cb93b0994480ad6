//! Vertical physics and axis-aligned collision tests
//!
//! The player is the only dynamic body: gravity integrates its vertical
//! velocity each tick and the ground line is the single stop condition.
//! Everything else moves by the session scroll speed. Overlap tests are
//! strict AABB checks on all four half-planes.

use glam::Vec2;

use super::state::{Collectible, Obstacle, Player};
use crate::consts::*;

/// An axis-aligned bounding box (top-left anchored, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Strict overlap: every half-plane condition must hold with `<`/`>`.
    /// Touching edges do not collide. Symmetric by construction.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }
}

impl Player {
    /// Collision box (ignores rotation and scale - cosmetic only)
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }
}

impl Obstacle {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

impl Collectible {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// One tick of vertical integration: gravity, position, tumble rotation.
///
/// Rotation follows velocity to sell the tumbling-jump look; it never
/// affects collision. x is untouched - all horizontal motion is scrolling.
pub fn integrate(player: &mut Player) {
    player.vel_y += GRAVITY;
    player.pos.y += player.vel_y;
    player.rotation =
        (player.rotation + player.vel_y * ROTATION_RATE).clamp(-MAX_ROTATION, MAX_ROTATION);
}

/// Clamp the player to the ground line. Returns true when this resolved a
/// landing (the player was airborne).
pub fn ground_clamp(player: &mut Player, ground_y: f32) -> bool {
    if player.bottom() < ground_y {
        return false;
    }
    player.pos.y = ground_y - player.size;
    player.vel_y = 0.0;
    player.rotation = 0.0;
    let landed = player.airborne;
    player.airborne = false;
    landed
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grounded_player() -> Player {
        let mut player = Player::new(330.0);
        player.pos.y = 330.0 - player.size;
        player
    }

    #[test]
    fn integration_applies_gravity_then_velocity() {
        let mut player = grounded_player();
        player.vel_y = -18.0;
        let prev_vel = player.vel_y;
        let prev_y = player.pos.y;

        integrate(&mut player);

        assert_eq!(player.vel_y, prev_vel + GRAVITY);
        assert_eq!(player.pos.y, prev_y + player.vel_y);
    }

    #[test]
    fn integration_never_moves_x() {
        let mut player = grounded_player();
        player.vel_y = 5.0;
        let x = player.pos.x;
        for _ in 0..100 {
            integrate(&mut player);
        }
        assert_eq!(player.pos.x, x);
    }

    #[test]
    fn rotation_clamped_to_limits() {
        let mut player = grounded_player();
        player.vel_y = 200.0;
        integrate(&mut player);
        assert_eq!(player.rotation, MAX_ROTATION);

        player.rotation = 0.0;
        player.vel_y = -200.0;
        integrate(&mut player);
        // Gravity nudges velocity but the clamp still bites
        assert_eq!(player.rotation, -MAX_ROTATION);
    }

    #[test]
    fn ground_clamp_postconditions() {
        let ground_y = 330.0;
        let mut player = Player::new(ground_y);
        player.airborne = true;
        player.vel_y = 12.0;
        player.rotation = 17.0;
        player.pos.y = ground_y - player.size + 4.0; // bottom past the line

        let landed = ground_clamp(&mut player, ground_y);

        assert!(landed);
        assert_eq!(player.pos.y, ground_y - player.size);
        assert_eq!(player.vel_y, 0.0);
        assert!(!player.airborne);
        assert_eq!(player.rotation, 0.0);
    }

    #[test]
    fn ground_clamp_leaves_airborne_player_alone() {
        let ground_y = 330.0;
        let mut player = Player::new(ground_y);
        player.airborne = true;
        player.vel_y = -10.0;
        player.pos.y = 100.0;

        let landed = ground_clamp(&mut player, ground_y);

        assert!(!landed);
        assert!(player.airborne);
        assert_eq!(player.vel_y, -10.0);
    }

    #[test]
    fn no_ceiling() {
        let mut player = grounded_player();
        player.vel_y = -50.0;
        player.airborne = true;
        for _ in 0..10 {
            integrate(&mut player);
            ground_clamp(&mut player, 330.0);
        }
        // Far above the field top and still airborne
        assert!(player.pos.y < -100.0);
        assert!(player.airborne);
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));

        let c = Aabb::new(Vec2::new(9.999, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&c));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = Aabb::new(Vec2::new(ax, ay), Vec2::new(aw, ah));
            let b = Aabb::new(Vec2::new(bx, by), Vec2::new(bw, bh));
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn overlap_requires_all_four_half_planes(
            gap in 0.0f32..50.0,
        ) {
            let a = Aabb::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
            // Separated on x by `gap` - never overlaps, even at gap 0 (strict)
            let b = Aabb::new(Vec2::new(10.0 + gap, 0.0), Vec2::new(10.0, 10.0));
            prop_assert!(!a.overlaps(&b));
        }
    }
}
