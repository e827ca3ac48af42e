use super::board::Board;
use super::token::Color;

/// Collapses blank cells downward and refills the top row.
///
/// Each [`step`](GravityRefill::step) performs exactly one downward shift
/// per column — a token directly above a blank cell slides down one square —
/// followed by a top-row refill. Full column drains take repeated steps,
/// which is what gives a host interleaving rendering its fall cadence.
#[derive(Debug)]
pub struct GravityRefill {
    num_colors: usize,
}

impl GravityRefill {
    pub fn new(num_colors: usize) -> Self {
        GravityRefill { num_colors }
    }

    /// One gravity pass: single-step shift, then top-row refill. Returns
    /// true if anything moved or spawned.
    pub fn step<R: rand::Rng>(&self, board: &mut Board, rng: &mut R) -> bool {
        let shifted = self.shift_down(board);
        let refilled = self.refill_top_row(board, rng);
        shifted || refilled
    }

    /// Slide every token sitting directly above a blank cell down one
    /// square. Decisions are taken against a snapshot of the column, so a
    /// single pass never cascades a token more than one step.
    fn shift_down(&self, board: &mut Board) -> bool {
        let size = board.size();
        let mut moved = false;
        for col in 0..size {
            let below_blank: Vec<bool> = (0..size - 1)
                .map(|row| board.color_at(row + 1, col) == Some(Color::Blank))
                .collect();
            // Apply bottom-up so each swap lands before the one above it.
            for row in (0..size - 1).rev() {
                if !below_blank[row] {
                    continue;
                }
                // Swapping a blank into a blank is a no-op.
                match board.color_at(row, col) {
                    Some(color) if !color.is_blank() => {
                        board.swap((row, col), (row + 1, col));
                        moved = true;
                    }
                    _ => {}
                }
            }
        }
        moved
    }

    /// Replace every blank cell in the top row with a freshly spawned token
    /// of random color, arriving from one square above the board.
    fn refill_top_row<R: rand::Rng>(&self, board: &mut Board, rng: &mut R) -> bool {
        let size = board.size();
        let mut spawned = false;
        for col in 0..size {
            if board.color_at(0, col) == Some(Color::Blank) {
                board.remove_at(0, col);
                board.spawn_random(rng, self.num_colors, 0, col, (-1, col as i32));
                spawned = true;
            }
        }
        spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::BoardEvent;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn column_board(colors: &[Color]) -> Board {
        // One interesting column (index 0) padded with a quiet filler so
        // the board stays square.
        let size = colors.len();
        let filler = [Color::Yellow, Color::Green, Color::Orange];
        let rows: Vec<Vec<Color>> = colors
            .iter()
            .enumerate()
            .map(|(r, &c0)| {
                let mut row: Vec<Color> = (0..size).map(|c| filler[(r + c) % 3]).collect();
                row[0] = c0;
                row
            })
            .collect();
        Board::with_colors(&rows)
    }

    #[test]
    fn test_shift_moves_exactly_one_step() {
        let mut board = column_board(&[
            Color::Red,
            Color::Blue,
            Color::Blank,
            Color::Purple,
            Color::Purple,
        ]);
        let gravity = GravityRefill::new(6);
        assert!(gravity.shift_down(&mut board));
        let col: Vec<Option<Color>> = (0..5).map(|r| board.color_at(r, 0)).collect();
        assert_eq!(
            col,
            vec![
                Some(Color::Red),
                Some(Color::Blank),
                Some(Color::Blue),
                Some(Color::Purple),
                Some(Color::Purple),
            ]
        );
    }

    #[test]
    fn test_stacked_blanks_do_not_cascade_in_one_pass() {
        let mut board = column_board(&[
            Color::Red,
            Color::Blank,
            Color::Blank,
            Color::Purple,
            Color::Purple,
        ]);
        let gravity = GravityRefill::new(6);
        gravity.shift_down(&mut board);
        let col: Vec<Option<Color>> = (0..5).map(|r| board.color_at(r, 0)).collect();
        assert_eq!(
            col,
            vec![
                Some(Color::Blank),
                Some(Color::Red),
                Some(Color::Blank),
                Some(Color::Purple),
                Some(Color::Purple),
            ]
        );
    }

    #[test]
    fn test_single_blank_drains_within_n_steps() {
        // One sentinel above four solid tokens: at most four steps until
        // only fresh top-row spawns remain.
        let mut board = column_board(&[
            Color::Blank,
            Color::Red,
            Color::Blue,
            Color::Purple,
            Color::Orange,
        ]);
        let gravity = GravityRefill::new(6);
        let mut rng = StdRng::seed_from_u64(11);
        let mut steps = 0;
        while board.has_blanks() {
            assert!(gravity.step(&mut board, &mut rng));
            steps += 1;
            assert!(steps <= 4, "drain took more than N steps");
        }
        assert_eq!(board.occupied_count(), 25);
    }

    #[test]
    fn test_blank_below_solid_bubbles_up_one_per_step() {
        let mut board = column_board(&[
            Color::Red,
            Color::Blue,
            Color::Orange,
            Color::Purple,
            Color::Blank,
        ]);
        let gravity = GravityRefill::new(6);
        let mut rng = StdRng::seed_from_u64(11);

        gravity.step(&mut board, &mut rng);
        assert_eq!(board.color_at(4, 0), Some(Color::Purple));
        assert_eq!(board.color_at(3, 0), Some(Color::Blank));

        gravity.step(&mut board, &mut rng);
        assert_eq!(board.color_at(2, 0), Some(Color::Blank));

        // Two more steps bring the blank to the top row, where the refill
        // replaces it.
        gravity.step(&mut board, &mut rng);
        gravity.step(&mut board, &mut rng);
        assert!(!board.has_blanks());
    }

    #[test]
    fn test_refill_spawns_from_offscreen() {
        let mut board = column_board(&[
            Color::Blank,
            Color::Red,
            Color::Blue,
            Color::Purple,
            Color::Orange,
        ]);
        let rx = board.subscribe();
        let gravity = GravityRefill::new(6);
        let mut rng = StdRng::seed_from_u64(2);
        gravity.refill_top_row(&mut board, &mut rng);

        let spawn = rx
            .try_iter()
            .find(|e| matches!(e, BoardEvent::Added { .. }))
            .unwrap();
        match spawn {
            BoardEvent::Added { to, from, color, .. } => {
                assert_eq!(to, (0, 0));
                assert_eq!(from, (-1, 0));
                assert!(!color.is_blank());
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_step_on_settled_board_changes_nothing() {
        let mut board = column_board(&[
            Color::Red,
            Color::Blue,
            Color::Orange,
            Color::Purple,
            Color::Red,
        ]);
        let gravity = GravityRefill::new(6);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(!gravity.step(&mut board, &mut rng));
    }
}
