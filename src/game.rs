//! Core game state and logic
//!
//! A `Game` runs the spawn, fall, lock, clear, respawn cycle. The driver
//! feeds it frame time through [`Game::advance`] and player input through
//! [`Game::apply`], then reads the board, pieces, and counters back out to
//! draw them.

use crate::bag::Bag;
use crate::board::Board;
use crate::gravity::DropScheduler;
use crate::piece::ActivePiece;
use crate::score::Score;
use crate::tetromino::{RotationDirection, TetrominoType};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tracing::{debug, info};

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Paused,
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    TogglePause,
    Restart,
}

/// Counters and flags for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub score: u64,
    pub lines: u32,
    pub level: u32,
    pub paused: bool,
    pub game_over: bool,
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game<R = ChaCha8Rng> {
    board: Board,
    /// Current falling piece; after a top out it stays where it spawned
    current_piece: Option<ActivePiece>,
    bag: Bag<R>,
    score: Score,
    state: GameState,
    gravity: DropScheduler,
}

impl Game {
    /// Start a game with an entropy-seeded piece sequence
    pub fn new() -> Self {
        Self::with_bag(Bag::new())
    }

    /// Start a game whose piece sequence is fixed by `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::with_bag(Bag::with_seed(seed))
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Game<R> {
    /// Start a game drawing pieces from the given bag
    pub fn with_bag(bag: Bag<R>) -> Self {
        Self::with_board(Board::new(), bag)
    }

    /// Start a game on a prepared board, for puzzles and tests
    pub fn with_board(board: Board, bag: Bag<R>) -> Self {
        let mut game = Self {
            board,
            current_piece: None,
            bag,
            score: Score::new(),
            state: GameState::Playing,
            gravity: DropScheduler::new(),
        };
        game.spawn_next();
        info!(first = ?game.current_piece.map(|p| p.kind), "game started");
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_piece(&self) -> Option<&ActivePiece> {
        self.current_piece.as_ref()
    }

    /// Landing position of the active piece
    pub fn ghost(&self) -> Option<ActivePiece> {
        self.current_piece.map(|piece| piece.ghost(&self.board))
    }

    /// The piece the next spawn will use
    pub fn next_piece(&self) -> Option<TetrominoType> {
        self.bag.peek()
    }

    /// Preview of upcoming pieces
    pub fn preview(&self, count: usize) -> impl Iterator<Item = TetrominoType> + '_ {
        self.bag.preview(count)
    }

    pub fn game_state(&self) -> GameState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == GameState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Snapshot of counters and flags
    pub fn state(&self) -> SessionState {
        SessionState {
            score: self.score.points,
            lines: self.score.lines,
            level: self.score.level,
            paused: self.is_paused(),
            game_over: self.is_game_over(),
        }
    }

    /// Advance the simulation by one frame's worth of time
    pub fn advance(&mut self, elapsed: Duration) {
        // Pause freezes gravity before any time is banked
        if self.state != GameState::Playing {
            return;
        }
        if self.current_piece.is_none() {
            return;
        }
        if self.gravity.tick(elapsed, self.score.level) {
            self.step_down();
        }
    }

    /// Process an action
    ///
    /// Pausing only stops gravity; moves still apply. After a top out only
    /// a restart is accepted.
    pub fn apply(&mut self, action: Action) {
        if self.state == GameState::GameOver {
            if action == Action::Restart {
                self.restart();
            }
            return;
        }
        match action {
            Action::MoveLeft => self.shift(-1),
            Action::MoveRight => self.shift(1),
            Action::SoftDrop => self.soft_drop(),
            Action::HardDrop => self.hard_drop(),
            Action::RotateCw => self.rotate(RotationDirection::Clockwise),
            Action::RotateCcw => self.rotate(RotationDirection::CounterClockwise),
            Action::TogglePause => self.toggle_pause(),
            Action::Restart => self.restart(),
        }
    }

    fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::Playing => {
                debug!("paused");
                GameState::Paused
            }
            GameState::Paused => {
                debug!("resumed");
                GameState::Playing
            }
            GameState::GameOver => GameState::GameOver,
        };
    }

    /// Reset everything and deal a fresh first piece
    pub fn restart(&mut self) {
        self.board = Board::new();
        self.current_piece = None;
        self.bag.reset();
        self.score = Score::new();
        self.gravity.reset();
        self.state = GameState::Playing;
        self.spawn_next();
        info!("game restarted");
    }

    fn shift(&mut self, d_col: i32) {
        if let Some(piece) = &mut self.current_piece {
            piece.try_move(&self.board, 0, d_col);
        }
    }

    fn rotate(&mut self, direction: RotationDirection) {
        if let Some(piece) = &mut self.current_piece {
            piece.rotate(direction, &self.board);
        }
    }

    fn soft_drop(&mut self) {
        let Some(piece) = &mut self.current_piece else {
            return;
        };
        if piece.move_down(&self.board) {
            self.score.add_soft_drop(1);
        } else {
            self.lock_piece();
        }
    }

    fn hard_drop(&mut self) {
        let Some(piece) = &mut self.current_piece else {
            return;
        };
        let distance = piece.drop_to_floor(&self.board);
        self.score.add_hard_drop(distance);
        self.lock_piece();
    }

    /// Gravity step: fall one row, or lock when resting on something
    fn step_down(&mut self) {
        let Some(piece) = &mut self.current_piece else {
            return;
        };
        if !piece.move_down(&self.board) {
            self.lock_piece();
        }
    }

    /// Lock the current piece and spawn next
    fn lock_piece(&mut self) {
        let Some(piece) = self.current_piece.take() else {
            return;
        };

        self.board.merge(&piece);
        let cleared = self.board.clear_full_rows();
        let award = self.score.add_clear(cleared);
        debug!(kind = ?piece.kind, row = piece.row, col = piece.col, cleared, award, "locked");

        self.spawn_next();
    }

    /// Spawn the next queued piece, topping out if it has no room
    fn spawn_next(&mut self) {
        let piece = ActivePiece::spawn(self.bag.next());
        self.current_piece = Some(piece);

        if piece.collides(&self.board) {
            info!(
                kind = ?piece.kind,
                score = self.score.points,
                lines = self.score.lines,
                "game over"
            );
            self.state = GameState::GameOver;
        }
    }
}
