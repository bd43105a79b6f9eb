//! Playfield entities
//!
//! Stars, asteroids and the player are plain records that own their
//! kinematic state. None of them hold a reference back to the game state;
//! whatever they need (canvas size, the player box) is passed in.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::path::{PathTag, Spawn};
use super::state::Canvas;
use crate::consts::GONE_MARGIN;

/// A background star drifting horizontally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    /// Side length in [0.5, 1.5)
    pub size: f32,
    /// Signed horizontal speed per tick
    pub speed: f32,
}

impl Star {
    pub fn new(x: f32, y: f32, size: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size,
            speed,
        }
    }

    /// One star per pixel row, scattered at random across the width
    pub fn field<R: Rng>(canvas: Canvas, speed: f32, rng: &mut R) -> Vec<Star> {
        let rows = canvas.height.max(0.0) as usize;
        (0..rows)
            .map(|row| {
                let x = rng.random::<f32>() * canvas.width;
                let size = rng.random::<f32>() + 0.5;
                Star::new(x, row as f32, size, speed)
            })
            .collect()
    }

    /// Advance one tick
    ///
    /// Near the left edge the star is pushed rightwards; once it reaches the
    /// right edge it jumps back to x = 0.
    pub fn advance(&mut self, canvas: Canvas) {
        let magnitude = self.speed.abs();
        if self.pos.x - self.size < 0.0 {
            self.speed = magnitude;
        } else if self.pos.x + self.size >= canvas.width {
            self.speed = -magnitude;
            self.pos.x = 0.0;
        }
        self.pos.x += self.speed;
    }
}

/// An asteroid crossing the screen on a fixed path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    /// Side length (whole pixels)
    pub size: f32,
    pub path: PathTag,
    /// Scalar speed per tick
    pub speed: f32,
    /// Grayscale level, cosmetic only
    pub shade: u8,
}

impl Asteroid {
    pub fn new(id: u32, spawn: Spawn, size: f32, speed: f32, shade: u8) -> Self {
        Self {
            id,
            pos: spawn.pos,
            size,
            path: spawn.path,
            speed,
            shade,
        }
    }

    /// Move one tick along the path
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.path.velocity(self.speed);
    }

    /// True once the asteroid has left the canvas for good
    pub fn is_gone(&self, canvas: Canvas) -> bool {
        let margin = -GONE_MARGIN * self.size;
        self.pos.x < margin
            || self.pos.x > canvas.width + 1.0
            || self.pos.y < margin
            || self.pos.y > canvas.height + 1.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

/// Discrete player move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

/// The player's square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
}

impl Player {
    /// Player centred on the canvas
    pub fn new(canvas: Canvas, size: f32) -> Self {
        Self {
            pos: Vec2::new(canvas.width / 2.0, canvas.height / 2.0),
            size,
        }
    }

    /// Step half a body length, never leaving the canvas
    pub fn move_toward(&mut self, direction: Direction, canvas: Canvas) {
        let step = self.size / 2.0;
        match direction {
            Direction::Left => self.pos.x -= step,
            Direction::Right => self.pos.x += step,
            Direction::Up => self.pos.y -= step,
            Direction::Down => self.pos.y += step,
        }
        self.pos.x = clamp_centre(self.pos.x, step, canvas.width);
        self.pos.y = clamp_centre(self.pos.y, step, canvas.height);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

/// Keep a centre coordinate at least `half` away from both ends of `extent`
///
/// When the canvas is narrower than the player the low bound wins.
fn clamp_centre(value: f32, half: f32, extent: f32) -> f32 {
    value.min(extent - half).max(half)
}

/// Borrowed view over any drawable entity
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Star(&'a Star),
    Asteroid(&'a Asteroid),
    Player(&'a Player),
}

impl Entity<'_> {
    pub fn center(&self) -> Vec2 {
        match self {
            Entity::Star(s) => s.pos,
            Entity::Asteroid(a) => a.pos,
            Entity::Player(p) => p.pos,
        }
    }

    pub fn size(&self) -> f32 {
        match self {
            Entity::Star(s) => s.size,
            Entity::Asteroid(a) => a.size,
            Entity::Player(p) => p.size,
        }
    }
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

    fn asteroid_at(x: f32, y: f32, size: f32) -> Asteroid {
        let spawn = Spawn {
            pos: Vec2::new(x, y),
            path: PathTag::TopLeft,
        };
        Asteroid::new(1, spawn, size, 1.0, 200)
    }

    #[test]
    fn test_star_field_one_per_row() {
        let mut rng = Pcg32::seed_from_u64(5);
        let stars = Star::field(canvas(), 0.5, &mut rng);
        assert_eq!(stars.len(), 600);
        for (row, star) in stars.iter().enumerate() {
            assert_eq!(star.pos.y, row as f32);
            assert!(star.pos.x >= 0.0 && star.pos.x < 800.0);
            assert!(star.size >= 0.5 && star.size < 1.5);
        }
    }

    #[test]
    fn test_star_wraps_at_right_edge() {
        let mut star = Star::new(799.5, 10.0, 1.0, 0.5);
        star.advance(canvas());
        assert_eq!(star.pos.x, -0.5);
        assert_eq!(star.speed, -0.5);

        // Next tick it is pushed back to the right
        star.advance(canvas());
        assert_eq!(star.pos.x, 0.0);
        assert_eq!(star.speed, 0.5);
        assert_eq!(star.pos.y, 10.0);
    }

    #[test]
    fn test_star_drifts_right() {
        let mut star = Star::new(100.0, 3.0, 1.0, 0.5);
        for _ in 0..10 {
            star.advance(canvas());
        }
        assert_eq!(star.pos.x, 105.0);
    }

    #[test]
    fn test_asteroid_advance_bottom_right() {
        let mut rng = Pcg32::seed_from_u64(1);
        let spawn = super::super::path::resolve_spawn(2, 30.0, canvas(), &mut rng);
        let mut asteroid = Asteroid::new(1, spawn, 30.0, 2.0, 180);
        assert!(!asteroid.is_gone(canvas()));
        asteroid.advance();
        assert_eq!(asteroid.pos, Vec2::new(798.0, 598.0));
    }

    #[test]
    fn test_asteroid_half_speed_axis() {
        let spawn = Spawn {
            pos: Vec2::new(-30.0, 100.0),
            path: PathTag::Left,
        };
        let mut asteroid = Asteroid::new(1, spawn, 20.0, 3.0, 180);
        asteroid.advance();
        assert_eq!(asteroid.pos, Vec2::new(-27.0, 101.5));
    }

    #[test]
    fn test_asteroid_gone_margin() {
        assert!(asteroid_at(-200.0, 300.0, 50.0).is_gone(canvas()));
        assert!(!asteroid_at(-90.0, 300.0, 50.0).is_gone(canvas()));
        assert!(asteroid_at(400.0, -101.0, 50.0).is_gone(canvas()));
        assert!(!asteroid_at(801.0, 300.0, 50.0).is_gone(canvas()));
        assert!(asteroid_at(801.5, 300.0, 50.0).is_gone(canvas()));
        assert!(asteroid_at(400.0, 601.5, 50.0).is_gone(canvas()));
    }

    #[test]
    fn test_player_starts_centred() {
        let player = Player::new(canvas(), 50.0);
        assert_eq!(player.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_player_moves_half_size() {
        let mut player = Player::new(canvas(), 50.0);
        player.move_toward(Direction::Up, canvas());
        assert_eq!(player.pos, Vec2::new(400.0, 275.0));
        player.move_toward(Direction::Right, canvas());
        assert_eq!(player.pos, Vec2::new(425.0, 275.0));
        player.move_toward(Direction::Down, canvas());
        player.move_toward(Direction::Left, canvas());
        assert_eq!(player.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_player_clamps_at_edges() {
        let mut player = Player::new(canvas(), 80.0);
        for _ in 0..50 {
            player.move_toward(Direction::Right, canvas());
            player.move_toward(Direction::Down, canvas());
        }
        assert_eq!(player.pos, Vec2::new(760.0, 560.0));
        for _ in 0..50 {
            player.move_toward(Direction::Left, canvas());
            player.move_toward(Direction::Up, canvas());
        }
        assert_eq!(player.pos, Vec2::new(40.0, 40.0));
    }

    #[test]
    fn test_entity_view() {
        let player = Player::new(canvas(), 80.0);
        let entity = Entity::Player(&player);
        assert_eq!(entity.center(), Vec2::new(400.0, 300.0));
        assert_eq!(entity.size(), 80.0);
    }

    proptest! {
        #[test]
        fn moving_left_converges_to_half_size(
            start_x in 0.0f32..800.0,
            size in 10.0f32..100.0,
            presses in 1usize..200,
        ) {
            let mut player = Player::new(canvas(), size);
            player.pos.x = start_x;
            for _ in 0..presses {
                player.move_toward(Direction::Left, canvas());
                prop_assert!(player.pos.x >= size / 2.0);
            }
            for _ in 0..(800.0 / (size / 2.0)) as usize + 2 {
                player.move_toward(Direction::Left, canvas());
            }
            prop_assert_eq!(player.pos.x, size / 2.0);
        }

        #[test]
        fn player_box_stays_on_canvas(
            moves in proptest::collection::vec(0u8..4, 0..300),
            size in 10.0f32..120.0,
        ) {
            let mut player = Player::new(canvas(), size);
            for m in moves {
                let dir = match m {
                    0 => Direction::Left,
                    1 => Direction::Up,
                    2 => Direction::Right,
                    _ => Direction::Down,
                };
                player.move_toward(dir, canvas());
                let b = player.bounds();
                prop_assert!(b.min.x >= -0.001 && b.max.x <= 800.001);
                prop_assert!(b.min.y >= -0.001 && b.max.y <= 600.001);
            }
        }
    }
}
