//! Asteroid trajectories
//!
//! An asteroid enters from one of the four corners or four edges of the
//! canvas and keeps a fixed heading until it leaves again. The spawn
//! selector picks the entry point, and the entry point fixes the path.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Canvas;
use crate::consts::SPAWN_OFFSET;

/// Fixed heading of an asteroid, named after the side it entered from
///
/// The first half of the name is the horizontal behaviour, the second the
/// vertical one. An asteroid entering from the left travels right, from the
/// bottom travels up, and so on. Edge entries drift at half speed along the
/// edge they entered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathTag {
    /// Entered top-left, travels down-right
    TopLeft,
    /// Entered bottom-right, travels up-left
    BottomRight,
    /// Entered bottom-left, travels up-right
    BottomLeft,
    /// Entered top-right, travels down-left
    TopRight,
    /// Entered on the left edge, travels right and drifts down
    Left,
    /// Entered on the right edge, travels left and drifts up
    Right,
    /// Entered on the top edge, travels down and drifts right
    Top,
    /// Entered on the bottom edge, travels up and drifts left
    Bottom,
}

impl PathTag {
    /// Per-axis velocity multipliers; scaled by the asteroid's speed each tick
    pub fn multipliers(self) -> Vec2 {
        match self {
            PathTag::TopLeft => Vec2::new(1.0, 1.0),
            PathTag::BottomRight => Vec2::new(-1.0, -1.0),
            PathTag::BottomLeft => Vec2::new(1.0, -1.0),
            PathTag::TopRight => Vec2::new(-1.0, 1.0),
            PathTag::Left => Vec2::new(1.0, 0.5),
            PathTag::Right => Vec2::new(-1.0, -0.5),
            PathTag::Top => Vec2::new(0.5, 1.0),
            PathTag::Bottom => Vec2::new(-0.5, -1.0),
        }
    }

    /// Velocity for one tick at the given speed
    #[inline]
    pub fn velocity(self, speed: f32) -> Vec2 {
        self.multipliers() * speed
    }

    /// Two-letter code used in spawn logs
    ///
    /// `n` = entered on the negative side of the axis, `p` = positive side,
    /// `c` = half-speed drift along that axis.
    pub fn code(self) -> &'static str {
        match self {
            PathTag::TopLeft => "nn",
            PathTag::BottomRight => "pp",
            PathTag::BottomLeft => "np",
            PathTag::TopRight => "pn",
            PathTag::Left => "nc",
            PathTag::Right => "pc",
            PathTag::Top => "cn",
            PathTag::Bottom => "cp",
        }
    }
}

/// Number of distinct spawn selectors
pub const SELECTOR_COUNT: u8 = 8;

/// Resolved entry point of a new asteroid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub pos: Vec2,
    pub path: PathTag,
}

/// Pick a uniformly random selector in `1..=8`
pub fn random_selector<R: Rng>(rng: &mut R) -> u8 {
    rng.random_range(1..=SELECTOR_COUNT)
}

/// Resolve a spawn selector into an entry point and path
///
/// Selectors 1-4 are corners, 5-8 are edges. Anything else falls back to
/// the top-left corner. The RNG is only consumed for edge selectors, where
/// it picks the coordinate along the edge.
pub fn resolve_spawn<R: Rng>(selector: u8, size: f32, canvas: Canvas, rng: &mut R) -> Spawn {
    let outside = -SPAWN_OFFSET * size;
    let (x, y, path) = match selector {
        2 => (canvas.width, canvas.height, PathTag::BottomRight),
        3 => (outside, canvas.height, PathTag::BottomLeft),
        4 => (canvas.width, outside, PathTag::TopRight),
        5 => (outside, along_edge(canvas.height, size, rng), PathTag::Left),
        6 => (canvas.width, along_edge(canvas.height, size, rng), PathTag::Right),
        7 => (along_edge(canvas.width, size, rng), outside, PathTag::Top),
        8 => (along_edge(canvas.width, size, rng), canvas.height, PathTag::Bottom),
        _ => (outside, outside, PathTag::TopLeft),
    };

    Spawn {
        pos: Vec2::new(x, y),
        path,
    }
}

/// Whole-pixel coordinate in [0, dimension - size)
fn along_edge<R: Rng>(dimension: f32, size: f32, rng: &mut R) -> f32 {
    let span = dimension - size;
    if span <= 0.0 {
        return 0.0;
    }
    (rng.random::<f32>() * span).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn canvas() -> Canvas {
        Canvas::new(800.0, 600.0)
    }

    /// Centre is outside the open canvas rectangle
    fn outside_canvas(pos: Vec2, canvas: Canvas) -> bool {
        pos.x <= 0.0 || pos.x >= canvas.width || pos.y <= 0.0 || pos.y >= canvas.height
    }

    #[test]
    fn test_bottom_right_corner() {
        let mut rng = Pcg32::seed_from_u64(1);
        let spawn = resolve_spawn(2, 30.0, canvas(), &mut rng);
        assert_eq!(spawn.pos, Vec2::new(800.0, 600.0));
        assert_eq!(spawn.path, PathTag::BottomRight);
        assert_eq!(spawn.path.code(), "pp");
        assert_eq!(spawn.path.velocity(2.0), Vec2::new(-2.0, -2.0));
    }

    #[test]
    fn test_corner_offsets() {
        let mut rng = Pcg32::seed_from_u64(1);
        let spawn = resolve_spawn(1, 20.0, canvas(), &mut rng);
        assert_eq!(spawn.pos, Vec2::new(-30.0, -30.0));
        assert_eq!(spawn.path, PathTag::TopLeft);

        let spawn = resolve_spawn(3, 20.0, canvas(), &mut rng);
        assert_eq!(spawn.pos, Vec2::new(-30.0, 600.0));
        assert_eq!(spawn.path, PathTag::BottomLeft);

        let spawn = resolve_spawn(4, 20.0, canvas(), &mut rng);
        assert_eq!(spawn.pos, Vec2::new(800.0, -30.0));
        assert_eq!(spawn.path, PathTag::TopRight);
    }

    #[test]
    fn test_edge_coordinate_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let left = resolve_spawn(5, 40.0, canvas(), &mut rng);
            assert_eq!(left.pos.x, -60.0);
            assert!(left.pos.y >= 0.0 && left.pos.y < 560.0);
            assert_eq!(left.pos.y, left.pos.y.floor());

            let top = resolve_spawn(7, 40.0, canvas(), &mut rng);
            assert_eq!(top.pos.y, -60.0);
            assert!(top.pos.x >= 0.0 && top.pos.x < 760.0);
        }
    }

    #[test]
    fn test_edge_paths_are_half_speed_on_one_axis() {
        let mut rng = Pcg32::seed_from_u64(3);
        for selector in 5..=8 {
            let spawn = resolve_spawn(selector, 25.0, canvas(), &mut rng);
            let m = spawn.path.multipliers();
            assert!(m.x.abs() == 0.5 || m.y.abs() == 0.5);
            assert!(m.x.abs() == 1.0 || m.y.abs() == 1.0);
        }
    }

    #[test]
    fn test_out_of_range_selector_falls_back() {
        let mut rng = Pcg32::seed_from_u64(3);
        for selector in [0, 9, 200] {
            let spawn = resolve_spawn(selector, 10.0, canvas(), &mut rng);
            assert_eq!(spawn.path, PathTag::TopLeft);
            assert_eq!(spawn.pos, Vec2::new(-15.0, -15.0));
        }
    }

    #[test]
    fn test_degenerate_canvas_edge() {
        let mut rng = Pcg32::seed_from_u64(3);
        let spawn = resolve_spawn(7, 50.0, Canvas::new(30.0, 30.0), &mut rng);
        assert_eq!(spawn.pos.x, 0.0);
    }

    #[test]
    fn test_random_selector_covers_all() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut seen = [false; 8];
        for _ in 0..1000 {
            let s = random_selector(&mut rng);
            assert!((1..=8).contains(&s));
            seen[(s - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    proptest! {
        #[test]
        fn spawn_is_outside_and_heads_inward(
            selector in 1u8..=8,
            size in 20.0f32..50.0,
            width in 200.0f32..2000.0,
            height in 200.0f32..2000.0,
            seed in any::<u64>(),
        ) {
            let canvas = Canvas::new(width, height);
            let mut rng = Pcg32::seed_from_u64(seed);
            let spawn = resolve_spawn(selector, size, canvas, &mut rng);
            prop_assert!(outside_canvas(spawn.pos, canvas));

            // On every axis where the centre is outside, it heads back in
            let vel = spawn.path.velocity(1.0);
            if spawn.pos.x < 0.0 {
                prop_assert!(vel.x > 0.0);
            }
            if spawn.pos.x >= width {
                prop_assert!(vel.x < 0.0);
            }
            if spawn.pos.y < 0.0 {
                prop_assert!(vel.y > 0.0);
            }
            if spawn.pos.y >= height {
                prop_assert!(vel.y < 0.0);
            }
        }
    }
}
