//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::entities::{
    Bird, GameState, GameStatus, Pipe, BIRD_HEIGHT, BIRD_START_Y, BIRD_WIDTH, BIRD_X, PIPE_GAP,
    PIPE_WIDTH, PLAY_HEIGHT, PLAY_WIDTH,
};

// ── Tuning constants ─────────────────────────────────────────────────────────

/// Downward acceleration added to the bird's velocity every frame.
pub const GRAVITY: f64 = 0.2;
/// Velocity the bird is set to (not nudged by) on a jump input.
pub const LIFT: f64 = -5.0;
/// Leftward distance every pipe travels per frame.
pub const PIPE_SPEED: f64 = 2.0;
/// A pipe pair spawns whenever `frame % SPAWN_INTERVAL == 0`.
pub const SPAWN_INTERVAL: u64 = 90;
/// Pipes spawned at or above this score drift vertically.
pub const OSCILLATION_SCORE: u32 = 10;
/// Per-frame vertical drift of an oscillating pipe.
const OSCILLATION_STEP: f64 = 1.0;
/// Drift bound. The offset pins here once reached — it does not reverse.
const OSCILLATION_LIMIT: f64 = 30.0;

/// Lowest y the bird's top edge can reach.
pub const FLOOR_Y: f64 = PLAY_HEIGHT - BIRD_HEIGHT;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state. `high_score` comes from the store.
pub fn init_state(high_score: u32) -> GameState {
    GameState {
        bird: Bird {
            y: BIRD_START_Y,
            vy: 0.0,
        },
        pipes: Vec::new(),
        score: 0,
        high_score,
        frame: 0,
        status: GameStatus::Running,
    }
}

/// Start a fresh run after a collision: everything back to its initial
/// value except the high score, which survives across runs.
pub fn reset(state: &GameState) -> GameState {
    init_state(state.high_score)
}

// ── Input-driven state transition (pure) ────────────────────────────────────

/// Jump: the bird's velocity is set to `LIFT` outright, regardless of its
/// prior value.  Ignored once the run has ended.
pub fn flap(state: &GameState) -> GameState {
    if state.status != GameStatus::Running {
        return state.clone();
    }
    GameState {
        bird: Bird {
            vy: LIFT,
            ..state.bird.clone()
        },
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    let frame = state.frame + 1;

    // ── 1. Integrate the bird ────────────────────────────────────────────────
    let mut vy = state.bird.vy + GRAVITY;
    let mut y = state.bird.y + vy;
    // Floor clamp only — the bird may leave the top of the play area.
    if y > FLOOR_Y {
        y = FLOOR_Y;
        vy = 0.0;
    }
    let bird = Bird { y, vy };

    // ── 2. Spawn a pipe pair on the cadence ──────────────────────────────────
    let mut pipes = state.pipes.clone();
    if frame % SPAWN_INTERVAL == 0 {
        let top = rng.gen_range(0..(PLAY_HEIGHT - PIPE_GAP) as u32) as f64;
        pipes.push(Pipe {
            x: PLAY_WIDTH,
            top,
            bottom: PLAY_HEIGHT - top - PIPE_GAP,
            oscillates: state.score >= OSCILLATION_SCORE,
            y_offset: 0.0,
        });
    }

    // ── 3. Advance pipes (the one just spawned moves this frame too) ─────────
    let pipes: Vec<Pipe> = pipes
        .iter()
        .filter_map(|p| {
            let x = p.x - PIPE_SPEED;
            let mut y_offset = p.y_offset;
            if p.oscillates {
                y_offset += OSCILLATION_STEP;
                // Pins at the bound matching its sign; never reverses.
                if y_offset > OSCILLATION_LIMIT || y_offset < -OSCILLATION_LIMIT {
                    y_offset = if y_offset > 0.0 {
                        OSCILLATION_LIMIT
                    } else {
                        -OSCILLATION_LIMIT
                    };
                }
            }
            if x + PIPE_WIDTH < 0.0 {
                None
            } else {
                Some(Pipe {
                    x,
                    y_offset,
                    ..p.clone()
                })
            }
        })
        .collect();

    // ── 4. Pass check — front pipe only ──────────────────────────────────────
    let mut pipes = pipes;
    let mut score = state.score;
    if pipes
        .first()
        .map_or(false, |p| p.x + PIPE_WIDTH < BIRD_X)
    {
        score += 1;
        pipes.remove(0);
    }

    // ── 5. Collision ends the run ────────────────────────────────────────────
    let next = GameState {
        bird,
        pipes,
        score,
        frame,
        ..state.clone()
    };
    if check_collision(&next) {
        return GameState {
            status: GameStatus::GameOver,
            high_score: next.high_score.max(next.score),
            ..next
        };
    }
    next
}

/// A collision exists iff the bird's horizontal extent overlaps a pipe's
/// and the bird pokes into either segment.  The thresholds are the
/// unshifted segment heights: `y_offset` moves the drawn rectangles but
/// not the hitbox.
pub fn check_collision(state: &GameState) -> bool {
    let bird = &state.bird;
    state.pipes.iter().any(|p| {
        BIRD_X + BIRD_WIDTH > p.x
            && BIRD_X < p.x + PIPE_WIDTH
            && (bird.y < p.top || bird.y + BIRD_HEIGHT > PLAY_HEIGHT - p.bottom)
    })
}
