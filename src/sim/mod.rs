//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick = 1/60 s)
//! - Seeded RNG only
//! - Stable obstacle order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use state::{GameEvent, GamePhase, GameState, Half, Obstacle, Player, Widget, WidgetKind};
pub use tick::{TickInput, tick};
