//! Game state and core simulation types
//!
//! Everything the renderer reads and the tick function mutates lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Idle title screen; the player bobs in place, gravity inactive
    Start,
    /// Active run (with an orthogonal `paused` flag on [`GameState`])
    Playing,
    /// Run ended; waiting for a restart input
    GameOver,
}

/// Things that happened during a tick, for the shell to log or persist.
/// The sim itself performs no I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Left the title screen and entered active play
    Launched,
    /// A jump impulse fired
    Flapped,
    /// An obstacle pair was credited
    Scored,
    /// Fatal collision; the run is over
    Collided,
    /// Best score strictly improved over the persisted value
    BestImproved(u32),
    /// A qualifying restart input was accepted
    Restarted,
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    /// Center position; x stays at the spawn column
    pub pos: Vec2,
    /// Vertical velocity, positive is downward
    pub vel: f32,
    /// Current flap animation frame
    pub frame: usize,
    flap_timer: u32,
    /// Jump input latch: set while the current press has already fired
    jump_latched: bool,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, SCREEN_H / 2.0),
            vel: 0.0,
            frame: 0,
            flap_timer: 0,
            jump_latched: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered_at(self.pos, PLAYER_W, PLAYER_H)
    }

    /// Tilt in degrees, derived from velocity (never stored).
    /// Points at the ground once the run is over.
    pub fn rotation_deg(&self, run_over: bool) -> f32 {
        if run_over { -90.0 } else { self.vel * -2.0 }
    }

    /// Back to the spawn point with zeroed motion and animation
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance the flap animation by one tick
    pub fn step_animation(&mut self) {
        self.flap_timer += 1;
        if self.flap_timer > FLAP_PERIOD_TICKS {
            self.flap_timer = 0;
            self.frame = (self.frame + 1) % FLAP_FRAMES;
        }
    }

    /// Apply the jump latch for this tick's held state.
    /// Returns true when an impulse fired (at most once per press-release cycle).
    pub fn jump(&mut self, held: bool) -> bool {
        let mut fired = false;
        if held && !self.jump_latched {
            self.vel = JUMP_IMPULSE;
            self.jump_latched = true;
            fired = true;
        }
        if !held {
            self.jump_latched = false;
        }
        fired
    }

    /// One tick of gravity: accelerate, clamp the fall speed, move unless
    /// already resting on the ground boundary.
    pub fn fall(&mut self) {
        self.vel = (self.vel + GRAVITY).min(MAX_FALL_SPEED);
        if self.bounds().bottom() < GROUND_Y {
            self.pos.y += self.vel.floor();
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Which half of an obstacle pair this instance is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    Upper,
    Lower,
}

/// One half of a scrolling obstacle pair
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Left edge; decreases every tick
    pub x: f32,
    /// Midpoint of the passable gap, shared by both halves of the pair
    pub gap_center: f32,
    pub half: Half,
    /// Spawn index of the pair this half belongs to
    pub pair: u32,
}

impl Obstacle {
    pub fn new(x: f32, gap_center: f32, half: Half, pair: u32) -> Self {
        Self {
            x,
            gap_center,
            half,
            pair,
        }
    }

    /// Body rectangle. Halves extend a full screen height beyond the gap
    /// edge so there is no way over or under them.
    pub fn bounds(&self) -> Rect {
        match self.half {
            Half::Upper => Rect::new(
                self.x,
                self.gap_center - PIPE_GAP / 2.0 - SCREEN_H,
                PIPE_W,
                SCREEN_H,
            ),
            Half::Lower => Rect::new(self.x, self.gap_center + PIPE_GAP / 2.0, PIPE_W, SCREEN_H),
        }
    }

    /// Scroll left by one tick
    pub fn advance(&mut self) {
        self.x -= SCROLL_SPEED;
    }

    /// True once the right edge has fully left the screen
    pub fn off_screen(&self) -> bool {
        self.x + PIPE_W < 0.0
    }
}

/// Transient UI widget kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    PauseToggle,
}

/// A transient UI widget (hit region + kind); rendered like any sprite
#[derive(Debug, Clone)]
pub struct Widget {
    pub rect: Rect,
    pub kind: WidgetKind,
}

impl Widget {
    pub fn pause_toggle() -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, PAUSE_HIT_SIZE, PAUSE_HIT_SIZE),
            kind: WidgetKind::PauseToggle,
        }
    }

    pub fn hit(&self, p: Vec2) -> bool {
        self.rect.contains_point(p)
    }
}

/// Complete game state, owned by the shell and threaded through `tick`.
/// No ambient globals anywhere.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducible spawn jitter
    pub seed: u64,
    pub phase: GamePhase,
    /// Orthogonal pause flag; only meaningful while Playing
    pub paused: bool,
    /// Gravity/spawning/scrolling active (as opposed to idling in place)
    pub flying: bool,
    pub player: Player,
    /// Live obstacles in spawn order; halves of a pair are adjacent
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    /// Best score seen this session (kept current in memory during play)
    pub best: u32,
    /// Pass flag: inside the nearest pair's span, not yet credited
    pub inside_pair: bool,
    /// Ticks since entering GameOver; drives overlay fade and restart debounce
    pub fade_ticks: u32,
    /// Cosmetic ground scroll offset, wrapped within [0, GROUND_SCROLL_WRAP)
    pub ground_scroll: f32,
    /// Timestamp of the most recent pair spawn
    pub last_spawn_ms: u64,
    /// Total simulated ticks
    pub time_ticks: u64,
    pub pause_widget: Widget,
    /// Best score known to be on disk; persistence is gated on beating this
    persisted_best: u32,
    next_pair: u32,
    pub(crate) rng: Pcg32,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Start,
            paused: false,
            flying: false,
            player: Player::new(),
            obstacles: Vec::new(),
            score: 0,
            best: 0,
            inside_pair: false,
            fade_ticks: 0,
            ground_scroll: 0.0,
            last_spawn_ms: 0,
            time_ticks: 0,
            pause_widget: Widget::pause_toggle(),
            persisted_best: 0,
            next_pair: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed the in-memory best from the store's value at startup
    pub fn set_persisted_best(&mut self, best: u32) {
        self.best = best;
        self.persisted_best = best;
    }

    /// If the in-memory best strictly beats what is on disk, mark it
    /// persisted and return it so the shell can save.
    pub fn take_best_improvement(&mut self) -> Option<u32> {
        if self.best > self.persisted_best {
            self.persisted_best = self.best;
            Some(self.best)
        } else {
            None
        }
    }

    /// Allocate the next pair spawn index
    pub fn next_pair_index(&mut self) -> u32 {
        let idx = self.next_pair;
        self.next_pair += 1;
        idx
    }

    /// Clear the run: player back at spawn, no obstacles, score zeroed
    pub fn reset_run(&mut self) {
        self.player.reset();
        self.obstacles.clear();
        self.score = 0;
        self.inside_pair = false;
        self.fade_ticks = 0;
        self.ground_scroll = 0.0;
    }
}
