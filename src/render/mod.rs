//! Rendering seam
//!
//! The renderer is a pure consumer of sim state: it reads a `&GameState`
//! snapshot each tick and produces no gameplay-affecting output. Entities
//! are exposed to it through a closed capability interface (bounds plus a
//! visual id) rather than any drawable base type.

pub mod terminal;

pub use terminal::TerminalRenderer;

use std::io;

use glam::Vec2;

use crate::Rect;
use crate::consts::{SCREEN_H, SCREEN_W};
use crate::sim::{GamePhase, GameState, Half, Obstacle, Player, Widget, WidgetKind};

/// Closed set of things the renderer knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualId {
    Bird,
    PipeUpper,
    PipeLower,
    PauseButton,
}

/// Capability interface for renderable entities: position and visual id.
/// Renderers look up per-kind detail (animation frame, tilt, pause state)
/// from the game state themselves.
pub trait Sprite {
    fn bounds(&self) -> Rect;
    fn visual(&self) -> VisualId;
}

impl Sprite for Player {
    fn bounds(&self) -> Rect {
        Player::bounds(self)
    }

    fn visual(&self) -> VisualId {
        VisualId::Bird
    }
}

impl Sprite for Obstacle {
    fn bounds(&self) -> Rect {
        Obstacle::bounds(self)
    }

    fn visual(&self) -> VisualId {
        match self.half {
            Half::Upper => VisualId::PipeUpper,
            Half::Lower => VisualId::PipeLower,
        }
    }
}

impl Sprite for Widget {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn visual(&self) -> VisualId {
        match self.kind {
            WidgetKind::PauseToggle => VisualId::PauseButton,
        }
    }
}

/// Draw-ordered sprites for the current phase: obstacles behind the player,
/// widgets on top, pause button only during an active run.
pub fn scene(state: &GameState) -> Vec<&dyn Sprite> {
    let mut sprites: Vec<&dyn Sprite> = Vec::with_capacity(state.obstacles.len() + 2);
    for obstacle in &state.obstacles {
        sprites.push(obstacle);
    }
    sprites.push(&state.player);
    if state.phase == GamePhase::Playing {
        sprites.push(&state.pause_widget);
    }
    sprites
}

/// Mapping between the 500x700 game space and terminal half-block pixels
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Pixel width (one per terminal column)
    pub pw: u32,
    /// Pixel height (two per terminal row)
    pub ph: u32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            pw: u32::from(cols.max(1)),
            ph: u32::from(rows.max(1)) * 2,
        }
    }

    #[inline]
    pub fn scale_x(&self) -> f32 {
        self.pw as f32 / SCREEN_W
    }

    #[inline]
    pub fn scale_y(&self) -> f32 {
        self.ph as f32 / SCREEN_H
    }

    /// Game point to pixel coordinates
    pub fn to_px(&self, p: Vec2) -> (i32, i32) {
        ((p.x * self.scale_x()) as i32, (p.y * self.scale_y()) as i32)
    }

    /// Game rect to pixel rect (x, y, w, h), at least one pixel in each axis
    pub fn rect_to_px(&self, r: &Rect) -> (i32, i32, i32, i32) {
        let (x, y) = self.to_px(Vec2::new(r.x, r.y));
        let w = ((r.w * self.scale_x()) as i32).max(1);
        let h = ((r.h * self.scale_y()) as i32).max(1);
        (x, y, w, h)
    }

    /// Terminal cell (mouse event coordinates) back to game units, using
    /// the cell's center
    pub fn cell_to_game(&self, col: u16, row: u16) -> Vec2 {
        let px = f32::from(col) + 0.5;
        let py = f32::from(row) * 2.0 + 1.0;
        Vec2::new(px / self.scale_x(), py / self.scale_y())
    }
}

/// A renderer consumes state read-only once per tick
pub trait Renderer {
    fn draw(&mut self, state: &GameState) -> io::Result<()>;
    fn viewport(&self) -> Viewport;
    fn resize(&mut self, cols: u16, rows: u16);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_mapping_round_trips() {
        let vp = Viewport::new(100, 35);
        // A press in the top-left cell lands inside the pause hit region
        let p = vp.cell_to_game(0, 0);
        assert!(p.x < crate::consts::PAUSE_HIT_SIZE);
        assert!(p.y < crate::consts::PAUSE_HIT_SIZE);
        // A press mid-screen maps near the game-space center
        let c = vp.cell_to_game(50, 17);
        assert!((c.x - SCREEN_W / 2.0).abs() < 10.0);
        assert!((c.y - SCREEN_H / 2.0).abs() < 15.0);
    }

    #[test]
    fn scene_order_and_widget_visibility() {
        let mut state = GameState::new(0);
        let sprites = scene(&state);
        // Title screen: just the player
        assert_eq!(sprites.len(), 1);
        assert_eq!(sprites[0].visual(), VisualId::Bird);

        state.phase = GamePhase::Playing;
        crate::sim::spawner::spawn_pair(&mut state, 0);
        let sprites = scene(&state);
        assert_eq!(sprites.len(), 4);
        assert_eq!(sprites[2].visual(), VisualId::Bird);
        assert_eq!(sprites[3].visual(), VisualId::PauseButton);
    }
}
