use std::fmt;

use super::board::Board;
use super::matches::MatchDetector;

/// Why a swap request was rejected. Surfaced to the player as a message;
/// the board is left untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapError {
    OutOfBounds,
    NotAdjacent,
    NoMatchProduced,
    NotSettled,
}

impl fmt::Display for SwapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SwapError::OutOfBounds => "that square is not on the board",
            SwapError::NotAdjacent => "not a valid move: squares are not adjacent",
            SwapError::NoMatchProduced => "not a valid move: no match would result",
            SwapError::NotSettled => "hold on, the board is still settling",
        };
        f.write_str(msg)
    }
}

/// Validates proposed swaps: adjacency, bounds, and whether the swap would
/// actually produce a match.
#[derive(Debug, Default)]
pub struct MoveValidator {
    detector: MatchDetector,
}

impl MoveValidator {
    pub fn new() -> Self {
        MoveValidator {
            detector: MatchDetector::new(),
        }
    }

    /// True iff the two squares are orthogonal neighbors (Manhattan
    /// distance exactly 1). Diagonals and self-swaps are excluded.
    pub fn is_adjacent_swap(&self, from: (usize, usize), to: (usize, usize)) -> bool {
        from.0.abs_diff(to.0) + from.1.abs_diff(to.1) == 1
    }

    /// Perform the swap speculatively on a scratch copy and report whether
    /// at least one match results. The real board is never touched.
    pub fn would_match(&self, board: &Board, a: (usize, usize), b: (usize, usize)) -> bool {
        let mut scratch = board.scratch();
        scratch.swap(a, b);
        self.detector.has_match(&scratch)
    }

    /// Full rejection policy for a swap request against a settled board.
    pub fn validate(
        &self,
        board: &Board,
        from: (usize, usize),
        to: (usize, usize),
    ) -> Result<(), SwapError> {
        if !board.is_valid_location(from.0, from.1) || !board.is_valid_location(to.0, to.1) {
            return Err(SwapError::OutOfBounds);
        }
        if !self.is_adjacent_swap(from, to) {
            return Err(SwapError::NotAdjacent);
        }
        if !self.would_match(board, from, to) {
            return Err(SwapError::NoMatchProduced);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Color;

    fn quiet_board() -> Board {
        const EVEN: [Color; 3] = [Color::Yellow, Color::Green, Color::Orange];
        const ODD: [Color; 3] = [Color::Blue, Color::Purple, Color::Green];
        let rows: Vec<Vec<Color>> = (0..8)
            .map(|r| {
                (0..8)
                    .map(|c| if r % 2 == 0 { EVEN[c % 3] } else { ODD[c % 3] })
                    .collect()
            })
            .collect();
        Board::with_colors(&rows)
    }

    #[test]
    fn test_adjacency_is_exactly_the_four_orthogonal_neighbors() {
        let validator = MoveValidator::new();
        let center = (3, 3);
        let mut adjacent = Vec::new();
        for r in 0..8usize {
            for c in 0..8usize {
                if validator.is_adjacent_swap(center, (r, c)) {
                    adjacent.push((r, c));
                }
            }
        }
        adjacent.sort_unstable();
        assert_eq!(adjacent, vec![(2, 3), (3, 2), (3, 4), (4, 3)]);
    }

    #[test]
    fn test_self_and_diagonal_are_not_adjacent() {
        let validator = MoveValidator::new();
        assert!(!validator.is_adjacent_swap((3, 3), (3, 3)));
        assert!(!validator.is_adjacent_swap((3, 3), (4, 4)));
        assert!(!validator.is_adjacent_swap((3, 3), (2, 2)));
    }

    #[test]
    fn test_would_match_finds_a_setup() {
        // Row 2: Y G O Y G O Y G. Plant two reds so that swapping a third
        // red into place completes the triple.
        let mut board = quiet_board();
        board.remove_at(2, 3);
        board.spawn(Color::Red, 2, 3, (2, 3));
        board.remove_at(2, 4);
        board.spawn(Color::Red, 2, 4, (2, 4));
        board.remove_at(3, 5);
        board.spawn(Color::Red, 3, 5, (3, 5));

        let validator = MoveValidator::new();
        assert!(validator.would_match(&board, (3, 5), (2, 5)));
        // Speculation left the real board unchanged.
        assert_eq!(board.color_at(3, 5), Some(Color::Red));
        assert_eq!(board.color_at(2, 4), Some(Color::Red));
    }

    #[test]
    fn test_would_match_rejects_a_pointless_swap() {
        let board = quiet_board();
        let validator = MoveValidator::new();
        assert!(!validator.would_match(&board, (3, 3), (3, 4)));
    }

    #[test]
    fn test_validate_rejection_order() {
        let board = quiet_board();
        let validator = MoveValidator::new();
        assert_eq!(
            validator.validate(&board, (0, 0), (9, 0)),
            Err(SwapError::OutOfBounds)
        );
        assert_eq!(
            validator.validate(&board, (0, 0), (2, 0)),
            Err(SwapError::NotAdjacent)
        );
        assert_eq!(
            validator.validate(&board, (0, 0), (0, 1)),
            Err(SwapError::NoMatchProduced)
        );
    }
}
