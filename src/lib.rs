//! Flappy Bird for the terminal
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `render`: Terminal half-block renderer, a pure consumer of sim state
//! - `clock`: Fixed 60 Hz frame clock with monotonic millisecond timestamps
//! - `input`: Terminal event drain
//! - `score`: Best-score persistence

pub mod clock;
pub mod input;
pub mod render;
pub mod score;
pub mod sim;

pub use score::BestScoreStore;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation tick rate
    pub const TICK_HZ: u32 = 60;

    /// Playfield dimensions (game units)
    pub const SCREEN_W: f32 = 500.0;
    pub const SCREEN_H: f32 = 700.0;
    /// Height of the scrolling ground strip
    pub const GROUND_H: f32 = 168.0;
    /// Top of the ground; the player's bottom edge may never reach this
    pub const GROUND_Y: f32 = SCREEN_H - GROUND_H;

    /// Player defaults
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_W: f32 = 34.0;
    pub const PLAYER_H: f32 = 24.0;
    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.3;
    /// Terminal fall speed
    pub const MAX_FALL_SPEED: f32 = 5.0;
    /// Velocity set by a jump impulse
    pub const JUMP_IMPULSE: f32 = -7.0;
    /// Ticks between flap animation frames
    pub const FLAP_PERIOD_TICKS: u32 = 5;
    /// Number of flap animation frames
    pub const FLAP_FRAMES: usize = 3;

    /// Obstacle defaults
    pub const PIPE_W: f32 = 52.0;
    /// Vertical opening between the two halves of a pair
    pub const PIPE_GAP: f32 = 160.0;
    /// Leftward travel per tick (also drives the ground scroll)
    pub const SCROLL_SPEED: f32 = 3.0;
    /// Milliseconds between pair spawns
    pub const SPAWN_INTERVAL_MS: u64 = 1800;
    /// Gap center jitter, uniform in [-SPAWN_JITTER, +SPAWN_JITTER]
    pub const SPAWN_JITTER: i32 = 75;

    /// Ground scroll offset wraps within [0, GROUND_SCROLL_WRAP)
    pub const GROUND_SCROLL_WRAP: f32 = 35.0;

    /// Restart inputs are ignored until this many game-over ticks have passed
    pub const FADE_RESTART_TICKS: u32 = 20;

    /// Square hit region (from the top-left corner) of the pause widget
    pub const PAUSE_HIT_SIZE: f32 = 60.0;
}

/// Axis-aligned rectangle in game units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// AABB overlap test; shared edges do not count as overlap
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// Rect of the same size centered at `center`
    pub fn centered_at(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }
}
