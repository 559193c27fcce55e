use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use flappy_term::compute::{flap, init_state, reset, tick};
use flappy_term::display::{self, Canvas};
use flappy_term::entities::{GameState, GameStatus};
use flappy_term::store::HighScoreFile;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Pause between the collision frame and the restart prompt, so the
/// game-over overlay is on screen before input is awaited.
const GAME_OVER_DELAY: Duration = Duration::from_millis(100);

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run one life.  Returns `true` → quit program, `false` → the run ended
/// in a collision and the game-over overlay has been drawn.
fn game_loop<W: Write>(
    out: &mut W,
    canvas: &mut Canvas,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    modifiers,
                    ..
                }) => match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        return Ok(true);
                    }
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(true);
                    }
                    // Raw mode swallows the keys' normal terminal behaviour,
                    // so a flap never echoes or scrolls.
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
                        *state = flap(state);
                    }
                    _ => {}
                },
                Event::Resize(cols, rows) => {
                    *canvas = Canvas::new(cols, rows);
                }
                _ => {}
            }
        }

        *state = tick(state, &mut rng);

        display::draw_frame(canvas, state);
        display::present(out, canvas)?;

        if state.status == GameStatus::GameOver {
            return Ok(false);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let store = HighScoreFile::default_location();
    let mut stored = store.load();

    let (cols, rows) = terminal::size()?;
    let mut canvas = Canvas::new(cols, rows);
    let mut state = init_state(stored);

    loop {
        if game_loop(out, &mut canvas, &mut state, rx)? {
            return Ok(());
        }

        // Persist at the moment the run ended, before any reset.
        if state.high_score > stored {
            stored = state.high_score;
            store.save(stored);
        }

        // Let the overlay sit on screen briefly, then discard anything
        // typed before the prompt was visible.
        thread::sleep(GAME_OVER_DELAY);
        while rx.try_recv().is_ok() {}

        // Modal acknowledgement: block until the player restarts or quits.
        loop {
            match rx.recv() {
                Ok(Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    ..
                })) => match code {
                    KeyCode::Enter | KeyCode::Char(' ') => break,
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        return Ok(());
                    }
                    _ => {}
                },
                Ok(Event::Resize(cols, rows)) => {
                    canvas = Canvas::new(cols, rows);
                    display::draw_frame(&mut canvas, &state);
                    display::present(out, &canvas)?;
                }
                Ok(_) => {}
                Err(_) => return Ok(()), // event thread gone → exit
            }
        }

        state = reset(&state);
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
