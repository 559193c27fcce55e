//! Rendering layer — all terminal I/O lives here.
//!
//! Scene drawing targets a `Canvas`, a plain cell buffer scaled from game
//! coordinates, so whole frames can be inspected in tests without a
//! terminal.  `present` is the only function that talks to crossterm.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::entities::{
    GameState, GameStatus, BIRD_HEIGHT, BIRD_WIDTH, BIRD_X, PIPE_WIDTH, PLAY_HEIGHT, PLAY_WIDTH,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BIRD: Color = Color::Yellow;
const C_PIPE: Color = Color::Green;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HIGH: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;
const C_OVERLAY: Color = Color::Red;
const C_PROMPT: Color = Color::White;

// ── Canvas ────────────────────────────────────────────────────────────────────

/// One terminal cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::Reset,
};

/// A cell buffer covering the whole terminal.  Rectangles are given in
/// game pixels (the 400×600 play area) and scaled to cells; text is placed
/// directly in cell coordinates.
pub struct Canvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![BLANK; cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Cell at (col, row) — used by `present` and by tests.
    pub fn cell(&self, col: u16, row: u16) -> Cell {
        self.cells[row as usize * self.cols as usize + col as usize]
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn set(&mut self, col: i32, row: i32, cell: Cell) {
        if col >= 0 && row >= 0 && (col as u16) < self.cols && (row as u16) < self.rows {
            self.cells[row as usize * self.cols as usize + col as usize] = cell;
        }
    }

    /// Filled rectangle in game coordinates, clipped to the buffer.  A
    /// rectangle thinner than one cell still paints a single cell so small
    /// sprites never vanish at coarse terminal sizes.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, ch: char, fg: Color) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let sx = self.cols as f64 / PLAY_WIDTH;
        let sy = self.rows as f64 / PLAY_HEIGHT;
        let c0 = (x * sx).round() as i32;
        let c1 = ((x + w) * sx).round() as i32;
        let r0 = (y * sy).round() as i32;
        let r1 = ((y + h) * sy).round() as i32;
        for row in r0..r1.max(r0 + 1) {
            for col in c0..c1.max(c0 + 1) {
                self.set(col, row, Cell { ch, fg });
            }
        }
    }

    /// Text at a fixed cell position.
    pub fn draw_text(&mut self, col: u16, row: u16, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.set(col as i32 + i as i32, row as i32, Cell { ch, fg });
        }
    }
}

// ── Scene drawing (pure) ──────────────────────────────────────────────────────

/// Draw one complete frame of game state into the canvas.
pub fn draw_frame(canvas: &mut Canvas, state: &GameState) {
    canvas.clear();

    // Both pipe rectangles are shifted by the drift offset.  The hitbox in
    // `compute::check_collision` is not; the drift is cosmetic only.
    for pipe in &state.pipes {
        canvas.fill_rect(pipe.x, pipe.y_offset, PIPE_WIDTH, pipe.top, '█', C_PIPE);
        canvas.fill_rect(
            pipe.x,
            PLAY_HEIGHT - pipe.bottom + pipe.y_offset,
            PIPE_WIDTH,
            pipe.bottom,
            '█',
            C_PIPE,
        );
    }

    canvas.fill_rect(BIRD_X, state.bird.y, BIRD_WIDTH, BIRD_HEIGHT, '█', C_BIRD);

    // HUD — score left, high score right, both on the top row.
    canvas.draw_text(1, 0, &format!("Score: {}", state.score), C_HUD_SCORE);
    let high = format!("High Score: {}", state.high_score);
    let col = canvas.cols().saturating_sub(high.chars().count() as u16 + 1);
    canvas.draw_text(col, 0, &high, C_HUD_HIGH);

    let last_row = canvas.rows().saturating_sub(1);
    canvas.draw_text(1, last_row, "SPACE : Flap   Q : Quit", C_HINT);

    if state.status == GameStatus::GameOver {
        draw_game_over(canvas, state);
    }
}

fn draw_game_over(canvas: &mut Canvas, state: &GameState) {
    let score_line = format!("Final Score: {}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", C_OVERLAY),
        ("║    GAME  OVER    ║", C_OVERLAY),
        ("╚══════════════════╝", C_OVERLAY),
        (&score_line, C_HUD_SCORE),
        ("ENTER - Play Again  Q - Quit", C_PROMPT),
    ];

    let cx = canvas.cols() / 2;
    let start_row = (canvas.rows() / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        canvas.draw_text(col, start_row + i as u16, msg, *color);
    }
}

// ── Terminal blit ─────────────────────────────────────────────────────────────

/// Write the whole canvas out with queued crossterm commands.  Every cell
/// is overwritten each frame, so no screen clear is needed in between.
pub fn present<W: Write>(out: &mut W, canvas: &Canvas) -> std::io::Result<()> {
    let mut fg = Color::Reset;
    for row in 0..canvas.rows() {
        out.queue(cursor::MoveTo(0, row))?;
        for col in 0..canvas.cols() {
            let cell = canvas.cell(col, row);
            if cell.fg != fg {
                out.queue(style::SetForegroundColor(cell.fg))?;
                fg = cell.fg;
            }
            out.queue(Print(cell.ch))?;
        }
    }
    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}
