//! Timer-driven obstacle pair factory
//!
//! One pair per interval while flying, with the gap center jittered by the
//! run's seeded RNG so spawns are reproducible in tests.

use rand::Rng;

use super::state::{GameState, Half, Obstacle};
use crate::consts::*;

/// True once the spawn interval has elapsed since the last pair
pub fn due(now_ms: u64, last_spawn_ms: u64) -> bool {
    now_ms.saturating_sub(last_spawn_ms) > SPAWN_INTERVAL_MS
}

/// Emit one obstacle pair at the right edge of the screen.
/// Both halves share the same gap center and pair index.
pub fn spawn_pair(state: &mut GameState, now_ms: u64) {
    let jitter = state.rng.random_range(-SPAWN_JITTER..=SPAWN_JITTER) as f32;
    let gap_center = SCREEN_H / 2.0 + jitter;
    let pair = state.next_pair_index();

    state
        .obstacles
        .push(Obstacle::new(SCREEN_W, gap_center, Half::Lower, pair));
    state
        .obstacles
        .push(Obstacle::new(SCREEN_W, gap_center, Half::Upper, pair));
    state.last_spawn_ms = now_ms;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_gate() {
        assert!(!due(0, 0));
        assert!(!due(SPAWN_INTERVAL_MS, 0));
        assert!(due(SPAWN_INTERVAL_MS + 1, 0));
        assert!(due(5000, 3000 - 1801));
    }

    #[test]
    fn pair_halves_share_gap_and_index() {
        let mut state = GameState::new(7);
        spawn_pair(&mut state, 2000);
        spawn_pair(&mut state, 4000);

        assert_eq!(state.obstacles.len(), 4);
        for pair in state.obstacles.chunks(2) {
            assert_eq!(pair[0].gap_center, pair[1].gap_center);
            assert_eq!(pair[0].pair, pair[1].pair);
            assert_ne!(pair[0].half, pair[1].half);
        }
        assert_ne!(state.obstacles[0].pair, state.obstacles[2].pair);
        assert_eq!(state.last_spawn_ms, 4000);
    }

    #[test]
    fn jitter_stays_in_band() {
        let mut state = GameState::new(42);
        for i in 0..200 {
            spawn_pair(&mut state, i * 2000);
        }
        for o in &state.obstacles {
            let offset = o.gap_center - SCREEN_H / 2.0;
            assert!((-(SPAWN_JITTER as f32)..=SPAWN_JITTER as f32).contains(&offset));
        }
    }

    #[test]
    fn same_seed_same_spawns() {
        let mut a = GameState::new(99);
        let mut b = GameState::new(99);
        for i in 0..10 {
            spawn_pair(&mut a, i * 2000);
            spawn_pair(&mut b, i * 2000);
        }
        let gaps_a: Vec<f32> = a.obstacles.iter().map(|o| o.gap_center).collect();
        let gaps_b: Vec<f32> = b.obstacles.iter().map(|o| o.gap_center).collect();
        assert_eq!(gaps_a, gaps_b);
    }

    #[test]
    fn halves_removed_independently() {
        // Removal is per instance; one half going off screen never drags
        // its partner along.
        let mut state = GameState::new(1);
        spawn_pair(&mut state, 2000);
        // Push only the lower half past the left edge
        state.obstacles[0].x = -PIPE_W - 1.0;
        assert!(state.obstacles[0].off_screen());
        assert!(!state.obstacles[1].off_screen());

        state.obstacles.retain(|o| !o.off_screen());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].half, Half::Upper);
    }
}
