//! Terminal input drain
//!
//! All queued events are drained once per tick and folded into a single
//! `TickInput` before the physics step. Terminal key events carry no
//! release, so a key press becomes a one-tick press-release cycle; the
//! sim's latch still guards platforms that do report holds.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

use crate::render::Viewport;
use crate::sim::TickInput;

/// Everything the shell needs from one tick's worth of events
#[derive(Debug, Default)]
pub struct PolledInput {
    pub tick: TickInput,
    pub quit: bool,
    pub resize: Option<(u16, u16)>,
}

/// Drain all pending terminal events without blocking.
/// Pointer positions are mapped from cell space into game units.
pub fn drain(viewport: Viewport) -> io::Result<PolledInput> {
    let mut polled = PolledInput::default();

    while event::poll(Duration::ZERO)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    polled.quit = true;
                }
                KeyCode::Char('q') | KeyCode::Esc => polled.quit = true,
                KeyCode::Char(' ') | KeyCode::Up => {
                    polled.tick.jump_pressed = true;
                    polled.tick.jump_held = true;
                }
                KeyCode::Enter => polled.tick.confirm_pressed = true,
                KeyCode::Char('p') | KeyCode::Char('P') => polled.tick.toggle_pause = true,
                _ => {}
            },
            Event::Mouse(mouse) => {
                if let MouseEventKind::Down(_) = mouse.kind {
                    polled.tick.pointer = Some(viewport.cell_to_game(mouse.column, mouse.row));
                }
            }
            Event::Resize(cols, rows) => polled.resize = Some((cols, rows)),
            _ => {}
        }
    }

    Ok(polled)
}
