//! Flappy Bird entry point
//!
//! One thread, one loop: wait for the tick boundary, drain input, advance
//! the sim, react to its events, draw. The sim never does I/O; persistence
//! and logging happen here.

use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

use flappy_term::clock::FrameClock;
use flappy_term::consts::TICK_HZ;
use flappy_term::input;
use flappy_term::render::{Renderer, TerminalRenderer};
use flappy_term::score::BestScoreStore;
use flappy_term::sim::{GameEvent, GameState, tick};

fn main() -> io::Result<()> {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let store = BestScoreStore::default();
    let mut state = GameState::new(seed);
    state.set_persisted_best(store.load());
    log::info!("starting with seed {seed}, best {}", state.best);

    let mut renderer = TerminalRenderer::new()?;
    let mut clock = FrameClock::new(TICK_HZ);

    loop {
        let now_ms = clock.tick();
        let polled = input::drain(renderer.viewport())?;
        if polled.quit {
            break;
        }
        if let Some((cols, rows)) = polled.resize {
            renderer.resize(cols, rows);
        }

        for event in tick(&mut state, &polled.tick, now_ms) {
            match event {
                GameEvent::BestImproved(best) => store.save(best),
                GameEvent::Scored => log::debug!("score {}", state.score),
                GameEvent::Collided => log::info!("run ended at {}", state.score),
                GameEvent::Launched | GameEvent::Restarted => {
                    log::debug!("run started (seed {seed})");
                }
                GameEvent::Flapped => {}
            }
        }

        renderer.draw(&state)?;
    }

    // Restore the terminal before any final store write logs
    drop(renderer);
    if let Some(best) = state.take_best_improvement() {
        store.save(best);
    }
    Ok(())
}
