use flappy_term::compute::init_state;
use flappy_term::display::{draw_frame, present, Canvas};
use flappy_term::entities::{GameStatus, Pipe};

use crossterm::style::Color;

/// A canvas the exact size of the play area, so game pixels map to cells
/// one-to-one and positions can be asserted exactly.
fn full_canvas() -> Canvas {
    Canvas::new(400, 600)
}

fn make_pipe(x: f64, top: f64, y_offset: f64) -> Pipe {
    Pipe {
        x,
        top,
        bottom: 600.0 - top - 100.0,
        oscillates: y_offset != 0.0,
        y_offset,
    }
}

fn row_text(canvas: &Canvas, row: u16, cols: std::ops::Range<u16>) -> String {
    cols.map(|c| canvas.cell(c, row).ch).collect()
}

// ── Bird ──────────────────────────────────────────────────────────────────────

#[test]
fn bird_drawn_as_filled_rect() {
    let mut canvas = full_canvas();
    let state = init_state(0); // bird at (50, 150), 20×20
    draw_frame(&mut canvas, &state);

    assert_eq!(canvas.cell(50, 150).ch, '█');
    assert_eq!(canvas.cell(50, 150).fg, Color::Yellow);
    assert_eq!(canvas.cell(69, 169).ch, '█');
    // Right and bottom edges are exclusive.
    assert_eq!(canvas.cell(70, 150).ch, ' ');
    assert_eq!(canvas.cell(50, 170).ch, ' ');
}

#[test]
fn frame_is_cleared_between_draws() {
    let mut canvas = full_canvas();
    let mut state = init_state(0);
    draw_frame(&mut canvas, &state);
    assert_eq!(canvas.cell(50, 150).ch, '█');

    state.bird.y = 300.0;
    draw_frame(&mut canvas, &state);
    assert_eq!(canvas.cell(50, 150).ch, ' '); // old position gone
    assert_eq!(canvas.cell(50, 300).ch, '█');
}

// ── Pipes ─────────────────────────────────────────────────────────────────────

#[test]
fn pipe_segments_leave_the_gap_open() {
    let mut canvas = full_canvas();
    let mut state = init_state(0);
    state.pipes.push(make_pipe(200.0, 300.0, 0.0)); // gap 300..400
    draw_frame(&mut canvas, &state);

    assert_eq!(canvas.cell(200, 0).fg, Color::Green); // top segment
    assert_eq!(canvas.cell(200, 299).ch, '█');
    assert_eq!(canvas.cell(200, 350).ch, ' '); // the gap
    assert_eq!(canvas.cell(200, 400).ch, '█'); // bottom segment
    assert_eq!(canvas.cell(200, 599).ch, '█');
}

#[test]
fn drifting_pipe_is_drawn_shifted() {
    let mut canvas = full_canvas();
    let mut state = init_state(0);
    state.pipes.push(make_pipe(200.0, 300.0, 30.0));
    draw_frame(&mut canvas, &state);

    // Top segment now spans 30..330, bottom 430..600.
    assert_eq!(canvas.cell(200, 29).ch, ' ');
    assert_eq!(canvas.cell(200, 30).ch, '█');
    assert_eq!(canvas.cell(200, 329).ch, '█');
    assert_eq!(canvas.cell(200, 400).ch, ' ');
    assert_eq!(canvas.cell(200, 430).ch, '█');
}

// ── HUD & overlay ─────────────────────────────────────────────────────────────

#[test]
fn hud_shows_score_and_high_score() {
    let mut canvas = full_canvas();
    let mut state = init_state(12);
    state.score = 3;
    draw_frame(&mut canvas, &state);

    assert_eq!(row_text(&canvas, 0, 1..9), "Score: 3");
    // Right-aligned with a one-cell margin.
    assert_eq!(row_text(&canvas, 0, 385..399), "High Score: 12");
}

#[test]
fn game_over_overlay_only_when_run_has_ended() {
    let mut canvas = full_canvas();
    let mut state = init_state(0);
    draw_frame(&mut canvas, &state);
    assert!(!canvas_contains(&canvas, '╔'));

    state.status = GameStatus::GameOver;
    draw_frame(&mut canvas, &state);
    assert!(canvas_contains(&canvas, '╔'));
}

fn canvas_contains(canvas: &Canvas, ch: char) -> bool {
    (0..canvas.rows())
        .any(|row| (0..canvas.cols()).any(|col| canvas.cell(col, row).ch == ch))
}

// ── Terminal blit ─────────────────────────────────────────────────────────────

#[test]
fn present_writes_frame_to_any_writer() {
    let mut canvas = Canvas::new(40, 20);
    let state = init_state(0);
    draw_frame(&mut canvas, &state);

    let mut sink: Vec<u8> = Vec::new();
    present(&mut sink, &canvas).unwrap();

    let text = String::from_utf8_lossy(&sink);
    assert!(text.contains("Score: 0"));
}
