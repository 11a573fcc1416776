//! Crossterm terminal renderer
//!
//! Draws the 500x700 game space into a half-block pixel buffer (two pixels
//! per terminal row via the upper-half-block glyph) and flushes it once per
//! tick. Raw mode and the alternate screen are restored on drop.

use std::io::{self, Stdout, Write, stdout};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{self, Color},
    terminal,
};

use super::{Renderer, Viewport, VisualId, scene};
use crate::consts::*;
use crate::sim::{GamePhase, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rgb(u8, u8, u8);

impl Rgb {
    fn dim(self, keep_num: u16, keep_den: u16) -> Rgb {
        let scale = |c: u8| ((u16::from(c) * keep_num) / keep_den) as u8;
        Rgb(scale(self.0), scale(self.1), scale(self.2))
    }
}

const SKY: Rgb = Rgb(96, 182, 230);
const GRASS: Rgb = Rgb(92, 176, 60);
const GRASS_DARK: Rgb = Rgb(70, 140, 46);
const DIRT: Rgb = Rgb(205, 178, 108);
const PIPE: Rgb = Rgb(96, 168, 44);
const PIPE_EDGE: Rgb = Rgb(58, 108, 24);
const BIRD_BODY: Rgb = Rgb(246, 200, 66);
const BIRD_WING: Rgb = Rgb(216, 166, 38);
const BIRD_BEAK: Rgb = Rgb(228, 86, 38);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const WHITE: Rgb = Rgb(255, 255, 255);
const GOLD: Rgb = Rgb(255, 220, 90);
const PANEL: Rgb = Rgb(75, 61, 96);
const PANEL_EDGE: Rgb = Rgb(0, 183, 193);

/// Pixel buffer; height is twice the terminal row count
struct Canvas {
    w: usize,
    h: usize,
    px: Vec<Rgb>,
}

impl Canvas {
    fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![SKY; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px = vec![SKY; w * h];
    }

    fn clear(&mut self, c: Rgb) {
        self.px.fill(c);
    }

    fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Darken every pixel; `keep` is the numerator over 255
    fn dim_all(&mut self, keep: u16) {
        for p in &mut self.px {
            *p = p.dim(keep, 255);
        }
    }

    fn flush(&self, out: &mut Stdout) -> io::Result<()> {
        let rows = self.h / 2;
        let mut fg = None;
        let mut bg = None;
        for row in 0..rows {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);
                if fg != Some(top) {
                    queue!(out, style::SetForegroundColor(color(top)))?;
                    fg = Some(top);
                }
                if bg != Some(bot) {
                    queue!(out, style::SetBackgroundColor(color(bot)))?;
                    bg = Some(bot);
                }
                queue!(out, style::Print('\u{2580}'))?;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

fn color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// 3x5 bitmap digits, low three bits per row
#[rustfmt::skip]
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b011, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b010, 0b010, 0b010], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];

// 3x5 letters for the handful of HUD strings
fn glyph(ch: char) -> [u8; 5] {
    match ch {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        _ => [0; 5],
    }
}

fn draw_cells(canvas: &mut Canvas, rows: &[u8; 5], x: i32, y: i32, c: Rgb) {
    for (row, bits) in rows.iter().enumerate() {
        for col in 0..3 {
            if bits >> (2 - col) & 1 == 1 {
                canvas.set(x + col, y + row as i32, c);
            }
        }
    }
}

/// Draw `text` (digits, the supported letters, spaces) centered on `cx`
fn draw_text(canvas: &mut Canvas, cx: i32, y: i32, text: &str, c: Rgb) {
    let total = text.chars().count() as i32 * 4 - 1;
    let mut x = cx - total / 2;
    for ch in text.chars() {
        match ch {
            '0'..='9' => draw_cells(canvas, &DIGITS[ch as usize - '0' as usize], x, y, c),
            ' ' => {}
            _ => draw_cells(canvas, &glyph(ch), x, y, c),
        }
        x += 4;
    }
}

pub struct TerminalRenderer {
    out: Stdout,
    canvas: Canvas,
    viewport: Viewport,
}

impl TerminalRenderer {
    /// Take over the terminal: raw mode, alternate screen, mouse capture
    pub fn new() -> io::Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture,
        )?;
        let (cols, rows) = terminal::size()?;
        let viewport = Viewport::new(cols, rows);
        Ok(Self {
            out,
            canvas: Canvas::new(viewport.pw as usize, viewport.ph as usize),
            viewport,
        })
    }

    fn ground_px(&self) -> i32 {
        (GROUND_Y * self.viewport.scale_y()) as i32
    }

    fn draw_ground(&mut self, scroll: f32) {
        let gy = self.ground_px();
        let pw = self.viewport.pw as i32;
        let ph = self.viewport.ph as i32;
        self.canvas.fill_rect(0, gy, pw, ph - gy, DIRT);
        self.canvas.fill_rect(0, gy, pw, 2, GRASS);
        // Scrolling stripe pattern makes the ground motion visible
        let offset = (scroll * self.viewport.scale_x()) as i32;
        let mut x = -offset;
        while x < pw {
            self.canvas.fill_rect(x, gy, 3, 2, GRASS_DARK);
            x += 7;
        }
    }

    fn draw_pipe(&mut self, x: i32, y: i32, w: i32, h: i32, cap_at_bottom: bool) {
        self.canvas.fill_rect(x, y, w, h, PIPE);
        self.canvas.fill_rect(x, y, 1, h, PIPE_EDGE);
        self.canvas.fill_rect(x + w - 1, y, 1, h, PIPE_EDGE);
        // Cap band on the gap-facing end
        let cap_y = if cap_at_bottom { y + h - 2 } else { y };
        self.canvas.fill_rect(x - 1, cap_y, w + 2, 2, PIPE_EDGE);
    }

    fn draw_bird(&mut self, state: &GameState, x: i32, y: i32, w: i32, h: i32) {
        self.canvas.fill_rect(x, y, w, h, BIRD_BODY);
        // Wing position cycles with the flap frame
        let wing_y = y + state.player.frame as i32 % h.max(1);
        self.canvas.fill_rect(x + 1, wing_y, (w / 2).max(1), 1, BIRD_WING);
        // Beak tilts with velocity-derived rotation
        let rot = state.player.rotation_deg(state.phase == GamePhase::GameOver);
        let beak_dy = if rot > 5.0 {
            -1
        } else if rot < -5.0 {
            1
        } else {
            0
        };
        self.canvas
            .fill_rect(x + w, y + h / 2 + beak_dy, 2, 1, BIRD_BEAK);
        self.canvas.set(x + w - 2, y + 1, BIRD_EYE);
    }

    fn draw_pause_button(&mut self, x: i32, y: i32, paused: bool) {
        self.canvas.fill_rect(x + 1, y + 1, 8, 6, PANEL);
        if paused {
            // Play triangle
            self.canvas.fill_rect(x + 4, y + 2, 1, 4, WHITE);
            self.canvas.fill_rect(x + 5, y + 3, 1, 2, WHITE);
            self.canvas.set(x + 6, y + 4, WHITE);
        } else {
            self.canvas.fill_rect(x + 3, y + 2, 1, 4, WHITE);
            self.canvas.fill_rect(x + 6, y + 2, 1, 4, WHITE);
        }
    }

    fn draw_panel(&mut self, cx: i32, y: i32, w: i32, h: i32) {
        let x = cx - w / 2;
        self.canvas.fill_rect(x - 1, y - 1, w + 2, h + 2, PANEL_EDGE);
        self.canvas.fill_rect(x, y, w, h, PANEL);
    }

    fn draw_overlays(&mut self, state: &GameState) {
        let cx = self.viewport.pw as i32 / 2;
        let ch = self.viewport.ph as i32;
        match state.phase {
            GamePhase::Start => {
                draw_text(&mut self.canvas, cx, ch / 4, "FLAPPY BIRD", GOLD);
                draw_text(&mut self.canvas, cx, ch / 2, "SPACE TO START", WHITE);
            }
            GamePhase::Playing if state.paused => {
                self.canvas.dim_all(135);
                self.draw_panel(cx, ch / 2 - 8, 70, 20);
                draw_text(&mut self.canvas, cx, ch / 2 - 5, "PAUSED", WHITE);
                draw_text(&mut self.canvas, cx, ch / 2 + 4, "SPACE TO RESUME", GOLD);
            }
            GamePhase::GameOver => {
                // Overlay fades in over the first 30 ticks
                let fade = state.fade_ticks.min(30) as u16;
                self.canvas.dim_all(255 - fade * 4);
                self.draw_panel(cx, ch / 4, 78, 34);
                draw_text(&mut self.canvas, cx, ch / 4 + 3, "GAME OVER", WHITE);
                draw_text(&mut self.canvas, cx, ch / 4 + 11, "SCORE", WHITE);
                draw_text(
                    &mut self.canvas,
                    cx,
                    ch / 4 + 17,
                    &state.score.to_string(),
                    GOLD,
                );
                if state.fade_ticks > 10 {
                    draw_text(&mut self.canvas, cx, ch / 4 + 24, "BEST", WHITE);
                    draw_text(
                        &mut self.canvas,
                        cx,
                        ch / 4 + 29,
                        &state.best.to_string(),
                        PANEL_EDGE,
                    );
                }
                if state.fade_ticks > 30 {
                    draw_text(&mut self.canvas, cx, ch - 8, "SPACE TO RESTART", GOLD);
                }
            }
            GamePhase::Playing => {}
        }
    }
}

impl Renderer for TerminalRenderer {
    fn draw(&mut self, state: &GameState) -> io::Result<()> {
        self.canvas.clear(SKY);
        self.draw_ground(state.ground_scroll);

        for sprite in scene(state) {
            let (x, y, w, h) = self.viewport.rect_to_px(&sprite.bounds());
            match sprite.visual() {
                VisualId::PipeUpper => self.draw_pipe(x, y, w, h, true),
                VisualId::PipeLower => self.draw_pipe(x, y, w, h, false),
                VisualId::Bird => self.draw_bird(state, x, y, w, h),
                VisualId::PauseButton => self.draw_pause_button(x, y, state.paused),
            }
        }

        if state.phase == GamePhase::Playing {
            let cx = self.viewport.pw as i32 / 2;
            draw_text(&mut self.canvas, cx, 2, &state.score.to_string(), WHITE);
            let best = format!("BEST {}", state.best);
            let bx = self.viewport.pw as i32 - (best.chars().count() as i32 * 4) / 2 - 2;
            draw_text(&mut self.canvas, bx, 2, &best, WHITE);
        }

        self.draw_overlays(state);
        self.canvas.flush(&mut self.out)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.viewport = Viewport::new(cols, rows);
        self.canvas
            .resize(self.viewport.pw as usize, self.viewport.ph as usize);
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen,
        );
        let _ = terminal::disable_raw_mode();
    }
}
