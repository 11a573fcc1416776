//! Fixed timestep simulation tick
//!
//! One call advances the whole game by a single 60 Hz tick: state machine
//! transitions first, then physics, spawning, scoring, and collisions.

use glam::Vec2;

use super::collision;
use super::spawner;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick, already drained from the platform
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump key went down this tick
    pub jump_pressed: bool,
    /// Jump key is held this tick (drives the impulse latch)
    pub jump_held: bool,
    /// Confirm/restart key went down this tick
    pub confirm_pressed: bool,
    /// Dedicated pause toggle key went down this tick
    pub toggle_pause: bool,
    /// Pointer press position this tick, in game units
    pub pointer: Option<Vec2>,
}

/// Advance the game state by one fixed tick.
///
/// `now_ms` is the clock's monotonic millisecond timestamp, used only for
/// the spawn interval. Returns the events the shell should react to; the
/// sim itself never touches storage or the terminal.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::Start => {
            state.time_ticks += 1;
            state.player.step_animation();

            // Launch on a pointer press or the jump key
            if input.jump_pressed || input.pointer.is_some() {
                launch(state, now_ms);
                events.push(GameEvent::Launched);
                events.push(GameEvent::Flapped);
            }
        }

        GamePhase::Playing => {
            let widget_pressed = input
                .pointer
                .is_some_and(|p| state.pause_widget.hit(p));
            let pointer_jump = input.pointer.is_some() && !widget_pressed;
            let toggle = input.toggle_pause || input.confirm_pressed || widget_pressed;

            if state.paused {
                // Suspended: only a resume input changes anything
                if toggle || input.jump_pressed {
                    state.paused = false;
                    log::debug!("resumed at tick {}", state.time_ticks);
                }
                return events;
            }
            if toggle {
                state.paused = true;
                log::debug!("paused at tick {}", state.time_ticks);
                return events;
            }

            state.time_ticks += 1;

            // After a restart the run idles in place until the next jump
            if !state.flying && (input.jump_pressed || pointer_jump) {
                state.flying = true;
                state.last_spawn_ms = now_ms;
            }

            if state.player.jump(input.jump_held || pointer_jump) {
                events.push(GameEvent::Flapped);
            }
            state.player.step_animation();

            if state.flying {
                state.player.fall();

                if spawner::due(now_ms, state.last_spawn_ms) {
                    spawner::spawn_pair(state, now_ms);
                }
                for o in &mut state.obstacles {
                    o.advance();
                }
                state.obstacles.retain(|o| !o.off_screen());

                state.ground_scroll = (state.ground_scroll + SCROLL_SPEED) % GROUND_SCROLL_WRAP;
            }

            if collision::update_pass_and_score(state) {
                events.push(GameEvent::Scored);
            }

            if collision::fatal(&state.player, &state.obstacles) {
                state.phase = GamePhase::GameOver;
                state.flying = false;
                state.paused = false;
                state.fade_ticks = 0;
                events.push(GameEvent::Collided);
                if let Some(best) = state.take_best_improvement() {
                    events.push(GameEvent::BestImproved(best));
                }
            }
        }

        GamePhase::GameOver => {
            state.fade_ticks += 1;

            // Debounce: the press that killed the run must not restart it
            let restart =
                input.pointer.is_some() || input.jump_pressed || input.confirm_pressed;
            if state.fade_ticks > FADE_RESTART_TICKS && restart {
                if let Some(best) = state.take_best_improvement() {
                    events.push(GameEvent::BestImproved(best));
                }
                state.reset_run();
                state.phase = GamePhase::Playing;
                state.flying = false;
                state.paused = false;
                state.last_spawn_ms = now_ms;
                events.push(GameEvent::Restarted);
            }
        }
    }

    events
}

/// Leave the title screen: fresh run, gravity on, first flap applied
fn launch(state: &mut GameState, now_ms: u64) {
    state.reset_run();
    state.phase = GamePhase::Playing;
    state.flying = true;
    state.paused = false;
    state.last_spawn_ms = now_ms;
    state.player.jump(true);
}
