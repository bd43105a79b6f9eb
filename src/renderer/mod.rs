//! Rendering module
//!
//! The game only needs two primitives: a filled square centred on a point
//! and a line of text. Anything that can do both is a [`Surface`].

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::format_duration;
use crate::sim::{Canvas, Entity, GamePhase, GameState};

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);

    pub fn gray(level: u8) -> Rgb {
        Rgb(level, level, level)
    }

    /// CSS colour string
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

/// Shadow drawn around a rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Rgb,
    pub blur: f32,
}

/// Fill and optional glow for a rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    pub fill: Rgb,
    pub glow: Option<Glow>,
}

/// 2D drawing target
pub trait Surface {
    /// Wipe the whole canvas
    fn clear(&mut self, canvas: Canvas);
    /// Filled square of side `size` centred on `center`
    fn fill_rect(&mut self, center: Vec2, size: f32, style: RectStyle);
    /// Text with its baseline starting at `pos`
    fn fill_text(&mut self, text: &str, pos: Vec2, color: Rgb);
}

/// Look of each kind of entity
pub fn style_for(entity: Entity<'_>) -> RectStyle {
    match entity {
        Entity::Star(_) => RectStyle {
            fill: Rgb::WHITE,
            glow: None,
        },
        Entity::Asteroid(asteroid) => RectStyle {
            fill: Rgb::gray(asteroid.shade),
            glow: Some(Glow {
                color: Rgb::YELLOW,
                blur: 50.0,
            }),
        },
        Entity::Player(_) => RectStyle {
            fill: Rgb::RED,
            glow: Some(Glow {
                color: Rgb::YELLOW,
                blur: 20.0,
            }),
        },
    }
}

/// HUD text anchor
const HUD_POS: Vec2 = Vec2::new(12.0, 24.0);

/// Draw one frame: stars, asteroids, player, then the HUD
pub fn draw_scene(state: &GameState, surface: &mut impl Surface) {
    surface.clear(state.canvas);

    for entity in state.entities() {
        surface.fill_rect(entity.center(), entity.size(), style_for(entity));
    }

    if state.phase == GamePhase::Running {
        let hud = format!(
            "{}  asteroids {}",
            format_duration(state.elapsed_ms() as u64),
            state.spawner.target()
        );
        surface.fill_text(&hud, HUD_POS, Rgb::WHITE);
    }
}
