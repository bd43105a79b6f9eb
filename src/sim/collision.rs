//! Collision detection
//!
//! Everything on the playfield is an axis-aligned square centred on its
//! position, so a hit is plain box overlap on both axes.

use glam::Vec2;

use super::entity::{Asteroid, Player};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of the given extents centred on `center`
    pub fn centered(center: Vec2, extents: Vec2) -> Self {
        let half = extents / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Square box of side `size` centred on `center`
    #[inline]
    pub fn square(center: Vec2, size: f32) -> Self {
        Self::centered(center, Vec2::splat(size))
    }

    /// Strict overlap on both axes; boxes that only touch do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Index of the first asteroid (in iteration order) touching the player
pub fn first_collision(player: &Player, asteroids: &[Asteroid]) -> Option<usize> {
    let player_box = player.bounds();
    asteroids
        .iter()
        .position(|asteroid| asteroid.bounds().overlaps(&player_box))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::path::{PathTag, Spawn};
    use crate::sim::state::Canvas;
    use proptest::prelude::*;

    fn asteroid(id: u32, x: f32, y: f32, size: f32) -> Asteroid {
        let spawn = Spawn {
            pos: Vec2::new(x, y),
            path: PathTag::TopLeft,
        };
        Asteroid::new(id, spawn, size, 1.0, 200)
    }

    #[test]
    fn test_touching_is_not_colliding() {
        let a = Aabb::square(Vec2::new(0.0, 0.0), 10.0);
        let b = Aabb::square(Vec2::new(10.0, 0.0), 10.0);
        assert!(!a.overlaps(&b));
        let c = Aabb::square(Vec2::new(9.9, 0.0), 10.0);
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_needs_overlap_on_both_axes() {
        let a = Aabb::square(Vec2::new(0.0, 0.0), 10.0);
        let b = Aabb::square(Vec2::new(5.0, 20.0), 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_first_collision_in_order() {
        let player = Player::new(Canvas::new(800.0, 600.0), 50.0);
        let asteroids = vec![
            asteroid(1, 10.0, 10.0, 30.0),
            asteroid(2, 420.0, 310.0, 30.0),
            asteroid(3, 400.0, 300.0, 30.0),
        ];
        assert_eq!(first_collision(&player, &asteroids), Some(1));
        assert_eq!(first_collision(&player, &asteroids[..1]), None);
        assert_eq!(first_collision(&player, &[]), None);
    }

    #[test]
    fn test_player_edge_contact() {
        // Player spans 375..425; asteroid spans 425..455
        let player = Player::new(Canvas::new(800.0, 600.0), 50.0);
        let touching = [asteroid(1, 440.0, 300.0, 30.0)];
        assert_eq!(first_collision(&player, &touching), None);
        let inside = [asteroid(1, 439.0, 300.0, 30.0)];
        assert_eq!(first_collision(&player, &inside), Some(0));
    }

    proptest! {
        #[test]
        fn identical_centres_collide(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            a in 0.5f32..200.0,
            b in 0.5f32..200.0,
        ) {
            let centre = Vec2::new(x, y);
            prop_assert!(Aabb::square(centre, a).overlaps(&Aabb::square(centre, b)));
        }

        #[test]
        fn separated_boxes_never_collide(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            a in 0.5f32..200.0,
            b in 0.5f32..200.0,
            gap in 0.01f32..500.0,
            other in -1000.0f32..1000.0,
            horizontal in any::<bool>(),
        ) {
            let first = Vec2::new(x, y);
            let distance = (a + b) / 2.0 + gap;
            let second = if horizontal {
                Vec2::new(x + distance, other)
            } else {
                Vec2::new(other, y - distance)
            };
            let box_a = Aabb::square(first, a);
            let box_b = Aabb::square(second, b);
            prop_assert!(!box_a.overlaps(&box_b));
            prop_assert!(!box_b.overlaps(&box_a));
        }

        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            a in 0.5f32..200.0, b in 0.5f32..200.0,
        ) {
            let box_a = Aabb::square(Vec2::new(ax, ay), a);
            let box_b = Aabb::square(Vec2::new(bx, by), b);
            prop_assert_eq!(box_a.overlaps(&box_b), box_b.overlaps(&box_a));
        }
    }
}
