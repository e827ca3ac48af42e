use std::fmt;
use std::sync::mpsc::{channel, Receiver, Sender};

use super::events::BoardEvent;
use super::token::{Color, Token, TokenId};

/// The candy board: a square grid of slots, each holding at most one token.
///
/// Squares are identified by `(row, col)`, numbered from 0 to `size - 1`
/// with `(0, 0)` in the upper-left corner; rows grow downward. The board
/// owns its tokens and keeps each token's position fields in agreement with
/// the slot table at all times (a mismatch is a programming fault and fails
/// fast). Every mutation is broadcast as a [`BoardEvent`] to all
/// subscribers.
pub struct Board {
    size: usize,
    slots: Vec<Option<Token>>,
    score: u32,
    next_id: u32,
    subscribers: Vec<Sender<BoardEvent>>,
}

impl Board {
    /// Create an empty board with `size` squares per side.
    pub fn new(size: usize) -> Self {
        assert!(size >= 3, "board must fit at least one run of three");
        Board {
            size,
            slots: vec![None; size * size],
            score: 0,
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Build a fully occupied board from a row-major color matrix.
    /// Useful for puzzle layouts and deterministic tests.
    pub fn with_colors(rows: &[Vec<Color>]) -> Self {
        let size = rows.len();
        let mut board = Board::new(size);
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), size, "color matrix must be square");
            for (c, &color) in row.iter().enumerate() {
                board.spawn(color, r, c, (r as i32, c as i32));
            }
        }
        board
    }

    /// Number of squares on each side.
    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// True iff `(row, col)` designates a square on the board. Coordinates
    /// are unsigned integers by construction, so only the upper bound is
    /// checked, strictly.
    pub fn is_valid_location(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// The token at `(row, col)`, or `None` if the square is empty or the
    /// location is off the board. Out-of-range reads fail silently.
    pub fn token_at(&self, row: usize, col: usize) -> Option<&Token> {
        if !self.is_valid_location(row, col) {
            return None;
        }
        self.slots[row * self.size + col].as_ref()
    }

    /// The color at `(row, col)`, if a token is there.
    pub fn color_at(&self, row: usize, col: usize) -> Option<Color> {
        self.token_at(row, col).map(|t| t.color())
    }

    pub fn is_empty_location(&self, row: usize, col: usize) -> bool {
        self.token_at(row, col).is_none()
    }

    /// All tokens currently on the board, in row-major order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.slots.iter().filter_map(|s| s.as_ref())
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Count of sentinel-colored (crushed, not yet collapsed) cells.
    pub fn blank_count(&self) -> usize {
        self.tokens().filter(|t| t.color().is_blank()).count()
    }

    pub fn has_blanks(&self) -> bool {
        self.tokens().any(|t| t.color().is_blank())
    }

    /// Subscribe to board change events. Each subscriber gets its own
    /// channel; closed receivers are pruned on the next emission.
    pub fn subscribe(&mut self) -> Receiver<BoardEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: BoardEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Spawn a fresh token of `color` at `(row, col)`. `from` is the spawn
    /// origin carried on the `Added` event; a row of `-1` means offscreen
    /// above the board. Placement onto an occupied square is logged and
    /// ignored. Returns the new token's id on success.
    pub fn spawn(&mut self, color: Color, row: usize, col: usize, from: (i32, i32)) -> Option<TokenId> {
        if !self.is_valid_location(row, col) {
            tracing::warn!(row, col, "spawn outside the board ignored");
            return None;
        }
        if !self.is_empty_location(row, col) {
            tracing::warn!(row, col, "spawn found a token already at this square");
            return None;
        }
        let id = TokenId(self.next_id);
        self.next_id += 1;
        let mut token = Token::new(id, color);
        token.set_position(Some((row, col)));
        let slot = self.idx(row, col);
        self.slots[slot] = Some(token);
        self.emit(BoardEvent::Added {
            id,
            color,
            to: (row, col),
            from,
        });
        self.debug_check_invariants();
        Some(id)
    }

    /// Spawn a random-color token at `(row, col)`, drawing from the first
    /// `num_colors` palette entries.
    pub fn spawn_random<R: rand::Rng>(
        &mut self,
        rng: &mut R,
        num_colors: usize,
        row: usize,
        col: usize,
        from: (i32, i32),
    ) -> Option<TokenId> {
        let color = Color::random(rng, num_colors);
        self.spawn(color, row, col, from)
    }

    /// Fill every empty square with a random token, spawning in place.
    pub fn random_fill<R: rand::Rng>(&mut self, rng: &mut R, num_colors: usize) {
        for row in 0..self.size {
            for col in 0..self.size {
                if self.is_empty_location(row, col) {
                    self.spawn_random(rng, num_colors, row, col, (row as i32, col as i32));
                }
            }
        }
    }

    /// Move the token at `from` to the empty square `to`. A move onto an
    /// occupied square or from an empty one is logged and ignored.
    pub fn move_token(&mut self, from: (usize, usize), to: (usize, usize)) {
        if !self.is_valid_location(to.0, to.1) || !self.is_empty_location(to.0, to.1) {
            tracing::warn!(?from, ?to, "move target not an empty square, ignored");
            return;
        }
        let src = self.idx(from.0, from.1);
        let Some(mut token) = self.slots[src].take() else {
            tracing::warn!(?from, "move found no token at source square");
            return;
        };
        token.set_position(Some(to));
        let id = token.id();
        let color = token.color();
        let dst = self.idx(to.0, to.1);
        self.slots[dst] = Some(token);
        self.emit(BoardEvent::Moved {
            id,
            color,
            from,
            to,
        });
        self.debug_check_invariants();
    }

    /// Remove and return the token at `(row, col)`, severing its position.
    pub fn remove_at(&mut self, row: usize, col: usize) -> Option<Token> {
        if !self.is_valid_location(row, col) {
            return None;
        }
        let slot = self.idx(row, col);
        let mut token = self.slots[slot].take()?;
        token.set_position(None);
        self.emit(BoardEvent::Removed {
            id: token.id(),
            color: token.color(),
            from: (row, col),
        });
        Some(token)
    }

    /// Exchange the tokens at `a` and `b` in one step, firing two `Moved`
    /// events (a's token first). Does not validate adjacency; that is the
    /// move validator's job. Both squares must be occupied.
    pub fn swap(&mut self, a: (usize, usize), b: (usize, usize)) {
        if a == b {
            return;
        }
        if self.is_empty_location(a.0, a.1) || self.is_empty_location(b.0, b.1) {
            tracing::warn!(?a, ?b, "swap needs two occupied squares, ignored");
            return;
        }
        let ia = self.idx(a.0, a.1);
        let ib = self.idx(b.0, b.1);
        self.slots.swap(ia, ib);
        // Fix up position fields after the slot exchange.
        let (id_a, color_a) = {
            let t = self.slots[ib].as_mut().expect("token moved to b");
            t.set_position(Some(b));
            (t.id(), t.color())
        };
        let (id_b, color_b) = {
            let t = self.slots[ia].as_mut().expect("token moved to a");
            t.set_position(Some(a));
            (t.id(), t.color())
        };
        self.emit(BoardEvent::Moved {
            id: id_a,
            color: color_a,
            from: a,
            to: b,
        });
        self.emit(BoardEvent::Moved {
            id: id_b,
            color: color_b,
            from: b,
            to: a,
        });
        self.debug_check_invariants();
    }

    /// Recolor the token at `(row, col)`. Used by the crush step to mark
    /// matched cells with the blank sentinel without disturbing occupancy.
    pub(crate) fn set_color_at(&mut self, row: usize, col: usize, color: Color) {
        let slot = self.idx(row, col);
        if let Some(token) = self.slots[slot].as_mut() {
            token.set_color(color);
        }
    }

    /// Remove every token from the board, one `Removed` event each.
    pub fn clear(&mut self) {
        for row in 0..self.size {
            for col in 0..self.size {
                if !self.is_empty_location(row, col) {
                    self.remove_at(row, col);
                }
            }
        }
    }

    /// Current score: one point per crushed token.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Credit one point for the crush at `cleared` and broadcast the total.
    pub fn increment_score(&mut self, cleared: (usize, usize)) {
        self.score += 1;
        let score = self.score;
        self.emit(BoardEvent::ScoreUpdate {
            score,
            cleared: Some(cleared),
        });
    }

    /// Reset the score to zero and broadcast the update.
    pub fn reset_score(&mut self) {
        self.score = 0;
        self.emit(BoardEvent::ScoreUpdate {
            score: 0,
            cleared: None,
        });
    }

    /// Copy of this board's slots for speculative evaluation. The scratch
    /// board has no subscribers, so nothing done to it is observable.
    pub fn scratch(&self) -> Board {
        Board {
            size: self.size,
            slots: self.slots.clone(),
            score: self.score,
            next_id: self.next_id,
            subscribers: Vec::new(),
        }
    }

    fn debug_check_invariants(&self) {
        #[cfg(debug_assertions)]
        self.check_invariants();
    }

    /// Panic if any occupied slot disagrees with its token's position
    /// fields. Invariant violations are programming faults, not conditions
    /// to tolerate.
    pub fn check_invariants(&self) {
        for row in 0..self.size {
            for col in 0..self.size {
                if let Some(token) = &self.slots[row * self.size + col] {
                    assert_eq!(
                        token.position(),
                        Some((row, col)),
                        "token {:?} slot/position mismatch",
                        token.id()
                    );
                }
            }
        }
    }
}

impl fmt::Display for Board {
    /// Multiline matrix: one tag per color, `_` for an empty square.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let tag = self.color_at(row, col).map_or('_', Color::tag);
                write!(f, "{tag} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
