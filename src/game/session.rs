use std::sync::mpsc::Receiver;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::board::Board;
use super::events::BoardEvent;
use super::moves::{MoveValidator, SwapError};
use super::settle::{SettleState, StabilityController};

/// One complete game: a board plus the machinery that drives it. All state
/// lives here; nothing about a running game is global, so two sessions can
/// coexist in one process without touching each other.
///
/// The session is the only public entry point for play. Hosts ask for swaps
/// with [`request_swap`](GameSession::request_swap), advance cascades with
/// [`tick`](GameSession::tick), and observe changes through
/// [`subscribe`](GameSession::subscribe).
pub struct GameSession {
    board: Board,
    controller: StabilityController,
    validator: MoveValidator,
    rng: StdRng,
    num_colors: usize,
}

impl GameSession {
    /// Start a fresh game: fill the board randomly, resolve any
    /// creation-time matches to completion, then zero the score so crushes
    /// the player never caused do not count.
    pub fn new(size: usize, num_colors: usize, seed: Option<u64>) -> Self {
        let mut session = GameSession::from_board(Board::new(size), num_colors, seed);
        session.board.random_fill(&mut session.rng, num_colors);
        session.controller.settle(&mut session.board, &mut session.rng);
        session.board.reset_score();
        session
    }

    /// Wrap an existing board, for puzzle layouts. The session starts in
    /// `Settling` and does not resolve anything until ticked, so callers
    /// can observe the cascade from its first pass.
    pub fn from_board(board: Board, num_colors: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        GameSession {
            board,
            controller: StabilityController::new(num_colors),
            validator: MoveValidator::new(),
            rng,
            num_colors,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn subscribe(&mut self) -> Receiver<BoardEvent> {
        self.board.subscribe()
    }

    pub fn state(&self) -> SettleState {
        self.controller.state()
    }

    pub fn is_stable(&self) -> bool {
        self.controller.is_stable()
    }

    pub fn score(&self) -> u32 {
        self.board.score()
    }

    /// Attempt a player swap. Rejected outright while the board is still
    /// settling; otherwise the validator decides. On success the swap is
    /// committed and the session re-enters `Settling` so subsequent ticks
    /// crush the new match.
    pub fn request_swap(
        &mut self,
        from: (usize, usize),
        to: (usize, usize),
    ) -> Result<(), SwapError> {
        if !self.controller.is_stable() {
            return Err(SwapError::NotSettled);
        }
        self.validator.validate(&self.board, from, to)?;
        self.board.swap(from, to);
        self.controller.unsettle();
        Ok(())
    }

    /// Find and play a random valid move on behalf of the player. Returns
    /// the committed swap, or `None` if the board is still settling or no
    /// adjacent swap would produce a match.
    pub fn auto_move(&mut self) -> Option<((usize, usize), (usize, usize))> {
        if !self.controller.is_stable() {
            return None;
        }
        let size = self.board.size();
        let mut candidates = Vec::new();
        // Each adjacent pair once: the cell to the right and the cell below.
        for r in 0..size {
            for c in 0..size {
                if c + 1 < size && self.validator.would_match(&self.board, (r, c), (r, c + 1)) {
                    candidates.push(((r, c), (r, c + 1)));
                }
                if r + 1 < size && self.validator.would_match(&self.board, (r, c), (r + 1, c)) {
                    candidates.push(((r, c), (r + 1, c)));
                }
            }
        }
        if candidates.is_empty() {
            return None;
        }
        let (from, to) = candidates[self.rng.random_range(0..candidates.len())];
        self.board.swap(from, to);
        self.controller.unsettle();
        Some((from, to))
    }

    /// Throw the current board away and deal a new one, score back to zero.
    pub fn request_reset(&mut self) {
        self.board.clear();
        self.board.random_fill(&mut self.rng, self.num_colors);
        self.controller.unsettle();
        self.controller.settle(&mut self.board, &mut self.rng);
        self.board.reset_score();
    }

    /// Advance the cascade by one pass. A no-op while stable.
    pub fn tick(&mut self) -> bool {
        self.controller.tick(&mut self.board, &mut self.rng)
    }

    /// Run the cascade to completion. Returns the number of ticks taken.
    pub fn settle(&mut self) -> u32 {
        self.controller.settle(&mut self.board, &mut self.rng)
    }
}
