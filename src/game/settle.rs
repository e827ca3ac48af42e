use super::board::Board;
use super::gravity::GravityRefill;
use super::matches::MatchDetector;

/// Whether the board is still cascading or ready for player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleState {
    /// Crush/collapse/refill passes are still in flight; input is rejected.
    Settling,
    /// No blank cells and no matches anywhere; one move may be accepted.
    Stable,
}

/// Drives the settle loop: {detect and crush → one gravity step → top-row
/// refill} until a full board scan finds neither blank cells nor matches.
///
/// The controller is host-driven: each [`tick`](StabilityController::tick)
/// advances the cascade by one pass, and ticking a stable board is a no-op,
/// so a timer, an animation frame, or a synchronous test loop can all act
/// as the scheduler.
#[derive(Debug)]
pub struct StabilityController {
    state: SettleState,
    detector: MatchDetector,
    gravity: GravityRefill,
}

impl StabilityController {
    /// A new controller starts in `Settling`: a freshly filled board may
    /// carry creation-time matches, and the first ticks resolve them.
    pub fn new(num_colors: usize) -> Self {
        StabilityController {
            state: SettleState::Settling,
            detector: MatchDetector::new(),
            gravity: GravityRefill::new(num_colors),
        }
    }

    pub fn state(&self) -> SettleState {
        self.state
    }

    pub fn is_stable(&self) -> bool {
        self.state == SettleState::Stable
    }

    /// Re-enter `Settling`. Called after a validated swap is committed.
    pub fn unsettle(&mut self) {
        self.state = SettleState::Settling;
    }

    /// Advance the cascade by one pass. Returns true if the board changed.
    /// Calling `tick` while stable does nothing.
    pub fn tick<R: rand::Rng>(&mut self, board: &mut Board, rng: &mut R) -> bool {
        if self.is_stable() {
            return false;
        }
        let cleared = self.detector.crush_all(board);
        let moved = self.gravity.step(board, rng);
        if !board.has_blanks() && !self.detector.has_match(board) {
            self.state = SettleState::Stable;
        }
        cleared > 0 || moved
    }

    /// Run the cascade to completion synchronously. Returns the number of
    /// ticks taken.
    pub fn settle<R: rand::Rng>(&mut self, board: &mut Board, rng: &mut R) -> u32 {
        let mut ticks = 0;
        while !self.is_stable() {
            self.tick(board, rng);
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Color, MatchDetector};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn random_board(seed: u64) -> (Board, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::new(8);
        board.random_fill(&mut rng, 6);
        (board, rng)
    }

    #[test]
    fn test_settle_reaches_stability_with_no_matches_or_blanks() {
        for seed in 0..20 {
            let (mut board, mut rng) = random_board(seed);
            let mut controller = StabilityController::new(6);
            controller.settle(&mut board, &mut rng);

            assert!(controller.is_stable());
            assert!(!board.has_blanks());
            assert!(!MatchDetector::new().has_match(&board));
            assert_eq!(board.occupied_count(), 64);
        }
    }

    #[test]
    fn test_tick_when_stable_is_a_noop() {
        let (mut board, mut rng) = random_board(42);
        let mut controller = StabilityController::new(6);
        controller.settle(&mut board, &mut rng);

        let rx = board.subscribe();
        assert!(!controller.tick(&mut board, &mut rng));
        assert!(controller.is_stable());
        assert!(rx.try_recv().is_err(), "stable tick must not emit events");
    }

    #[test]
    fn test_unsettle_reenters_settling() {
        let (mut board, mut rng) = random_board(7);
        let mut controller = StabilityController::new(6);
        controller.settle(&mut board, &mut rng);
        controller.unsettle();
        assert_eq!(controller.state(), SettleState::Settling);
        // With nothing to crush the very next tick settles again.
        controller.tick(&mut board, &mut rng);
        assert!(controller.is_stable());
    }

    #[test]
    fn test_blanks_keep_the_controller_settling() {
        let (mut board, mut rng) = random_board(3);
        let mut controller = StabilityController::new(6);
        controller.settle(&mut board, &mut rng);

        board.set_color_at(5, 5, Color::Blank);
        controller.unsettle();
        controller.tick(&mut board, &mut rng);
        // The blank has not yet reached the top row, so the board cannot
        // be stable yet.
        assert!(!controller.is_stable());
        controller.settle(&mut board, &mut rng);
        assert!(!board.has_blanks());
    }
}
