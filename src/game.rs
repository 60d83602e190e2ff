//! Core game state and the timing/state-machine contract
//!
//! One `Game` value owns the whole engine: board, active piece, lookahead,
//! counters and phase. The host drives it with `apply` for input signals and
//! `tick` once per frame with the elapsed time; the engine never schedules
//! anything itself. Notifications for the host come out of a drainable event
//! queue rather than stored callbacks.

use crate::board::Board;
use crate::piece::Piece;
use crate::randomizer::Randomizer;
use crate::rotation::RotationDirection;
use crate::score::Progress;
use crate::tetromino::PieceKind;
use std::time::Duration;

/// Gravity interval while soft drop is held, regardless of level
const SOFT_DROP_INTERVAL: Duration = Duration::from_millis(50);

/// Game phase
///
/// Running is entered only from Inactive or Paused via an explicit start;
/// Over is terminal until a reset re-creates all state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Inactive,
    Running,
    Paused,
    Over,
}

/// Input signals the game can process
///
/// Control signals are silently absorbed unless the game is Running; Start
/// and Reset are lifecycle signals and work from the phases noted on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    RotateCw,
    RotateCcw,
    SoftDropStart,
    SoftDropEnd,
    HardDrop,
    /// Inactive/Paused -> Running
    Start,
    /// Running -> Paused
    Pause,
    /// Any phase -> freshly initialized, Inactive
    Reset,
    /// Handled by the host, not the engine
    Quit,
}

/// Notifications drained by the host once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Progression changed; also emitted once per lock and on (re)init
    StatsUpdated { score: u64, level: u32, lines: u32 },
    /// Fired exactly once per game, at the Running -> Over transition
    GameOver { score: u64 },
}

/// The engine context: one value per concurrent game
pub struct Game {
    pub board: Board,
    pub piece: Piece,
    /// Read-only lookahead shown as the next piece
    pub next: PieceKind,
    pub progress: Progress,
    pub phase: Phase,
    randomizer: Randomizer,
    drop_counter: Duration,
    soft_dropping: bool,
    events: Vec<GameEvent>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Create a new game with a random seed
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a new game with a fixed piece sequence
    pub fn with_seed(seed: u64) -> Self {
        let mut randomizer = Randomizer::with_seed(seed);
        let piece = Piece::spawn(randomizer.next_kind());
        let next = randomizer.next_kind();
        let mut game = Self {
            board: Board::new(),
            piece,
            next,
            progress: Progress::new(),
            phase: Phase::Inactive,
            randomizer,
            drop_counter: Duration::ZERO,
            soft_dropping: false,
            events: Vec::new(),
        };
        game.push_stats();
        game
    }

    /// Process one input signal
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Start => {
                if matches!(self.phase, Phase::Inactive | Phase::Paused) {
                    self.phase = Phase::Running;
                }
            }
            Action::Pause => {
                if self.phase == Phase::Running {
                    self.phase = Phase::Paused;
                }
            }
            Action::Reset => self.reset(),
            Action::Quit => {}
            _ if self.phase != Phase::Running => {}
            Action::MoveLeft => {
                self.piece.shift(-1, &self.board);
            }
            Action::MoveRight => {
                self.piece.shift(1, &self.board);
            }
            Action::RotateCw => {
                self.piece.rotate(RotationDirection::Clockwise, &self.board);
            }
            Action::RotateCcw => {
                self.piece
                    .rotate(RotationDirection::CounterClockwise, &self.board);
            }
            Action::SoftDropStart => self.soft_dropping = true,
            Action::SoftDropEnd => self.soft_dropping = false,
            Action::HardDrop => self.hard_drop(),
        }
    }

    /// Advance time by one frame's elapsed delta
    ///
    /// Accumulates into the drop counter and runs a single gravity step once
    /// the active interval is exceeded: the fixed soft-drop interval while
    /// acceleration is held, the level-derived interval otherwise.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.phase != Phase::Running {
            return;
        }
        self.drop_counter += elapsed;
        let interval = if self.soft_dropping {
            SOFT_DROP_INTERVAL
        } else {
            self.progress.drop_interval()
        };
        if self.drop_counter > interval {
            self.gravity_step();
        }
    }

    /// Drain pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// The unified gravity step: descend once, or lock and respawn
    fn gravity_step(&mut self) {
        if !self.piece.descend(&self.board) {
            self.lock_piece();
        }
        self.drop_counter = Duration::ZERO;
    }

    /// Drop to the last valid row, then lock immediately
    fn hard_drop(&mut self) {
        while self.piece.descend(&self.board) {}
        self.lock_piece();
        self.drop_counter = Duration::ZERO;
    }

    /// Commit the piece to the board, sweep, score and respawn
    fn lock_piece(&mut self) {
        self.board.merge(&self.piece.matrix, self.piece.row, self.piece.col);
        let cleared = self.board.sweep_full_rows();
        self.progress.record_clears(cleared);
        self.push_stats();
        self.spawn_next();
    }

    /// Promote the lookahead to active and draw a new one
    ///
    /// A spawn that already collides ends the game; the colliding piece is
    /// left in place for the renderer.
    fn spawn_next(&mut self) {
        self.piece = Piece::spawn(self.next);
        self.next = self.randomizer.next_kind();
        if self
            .board
            .collides(&self.piece.matrix, self.piece.row, self.piece.col)
        {
            self.phase = Phase::Over;
            self.events.push(GameEvent::GameOver {
                score: self.progress.score,
            });
        }
    }

    /// Re-create all state; the game is start-eligible again afterwards
    fn reset(&mut self) {
        self.board.reset();
        self.progress = Progress::new();
        self.piece = Piece::spawn(self.randomizer.next_kind());
        self.next = self.randomizer.next_kind();
        self.phase = Phase::Inactive;
        self.drop_counter = Duration::ZERO;
        self.soft_dropping = false;
        self.push_stats();
    }

    fn push_stats(&mut self) {
        self.events.push(GameEvent::StatsUpdated {
            score: self.progress.score,
            level: self.progress.level,
            lines: self.progress.lines,
        });
    }
}
