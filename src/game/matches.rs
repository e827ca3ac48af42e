use super::board::Board;
use super::token::Color;

/// Window lengths scanned for runs, longest first so a five-run is credited
/// before its four- and three-cell sub-windows are considered.
pub const RUN_LENGTHS: [usize; 3] = [5, 4, 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

/// A detected run: an ordered list of same-colored cells along one axis.
/// Transient — computed on demand and consumed immediately by the crush.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub color: Color,
    pub axis: Axis,
    pub cells: Vec<(usize, usize)>,
}

/// Scans the board for runs of 3, 4, or 5 identical non-blank colors along
/// rows and columns, and crushes them to the blank sentinel.
#[derive(Debug, Default)]
pub struct MatchDetector;

impl MatchDetector {
    pub fn new() -> Self {
        MatchDetector
    }

    /// All runs currently on the board, longest first, rows before columns
    /// within each length. Cells claimed by a longer run are not reported
    /// again as part of a shorter overlapping window.
    pub fn find_runs(&self, board: &Board) -> Vec<Run> {
        let size = board.size();
        let mut claimed = vec![false; size * size];
        let mut runs = Vec::new();

        for len in RUN_LENGTHS {
            if len > size {
                continue;
            }
            // Rows: windows of `len` starting at each of the first
            // `size - len + 1` columns.
            for r in 0..size {
                for c in 0..=size - len {
                    let cells: Vec<(usize, usize)> = (c..c + len).map(|cc| (r, cc)).collect();
                    self.take_window(board, &mut claimed, &cells, Axis::Row, &mut runs);
                }
            }
            // Columns.
            for c in 0..size {
                for r in 0..=size - len {
                    let cells: Vec<(usize, usize)> = (r..r + len).map(|rr| (rr, c)).collect();
                    self.take_window(board, &mut claimed, &cells, Axis::Column, &mut runs);
                }
            }
        }
        runs
    }

    fn take_window(
        &self,
        board: &Board,
        claimed: &mut [bool],
        cells: &[(usize, usize)],
        axis: Axis,
        runs: &mut Vec<Run>,
    ) {
        if let Some(color) = self.window_color(board, claimed, cells) {
            for &(r, c) in cells {
                claimed[r * board.size() + c] = true;
            }
            runs.push(Run {
                color,
                axis,
                cells: cells.to_vec(),
            });
        }
    }

    /// The window matches iff every cell holds a token, none is already
    /// claimed, and all share one identical non-blank color.
    fn window_color(
        &self,
        board: &Board,
        claimed: &[bool],
        cells: &[(usize, usize)],
    ) -> Option<Color> {
        let (r0, c0) = cells[0];
        let color = board.color_at(r0, c0)?;
        if color.is_blank() {
            return None;
        }
        for &(r, c) in cells {
            if claimed[r * board.size() + c] || board.color_at(r, c) != Some(color) {
                return None;
            }
        }
        Some(color)
    }

    /// True iff any run of any scanned length exists on the board.
    pub fn has_match(&self, board: &Board) -> bool {
        let size = board.size();
        let no_claims = vec![false; size * size];
        for len in RUN_LENGTHS {
            if len > size {
                continue;
            }
            for r in 0..size {
                for c in 0..=size - len {
                    let cells: Vec<(usize, usize)> = (c..c + len).map(|cc| (r, cc)).collect();
                    if self.window_color(board, &no_claims, &cells).is_some() {
                        return true;
                    }
                }
            }
            for c in 0..size {
                for r in 0..=size - len {
                    let cells: Vec<(usize, usize)> = (r..r + len).map(|rr| (rr, c)).collect();
                    if self.window_color(board, &no_claims, &cells).is_some() {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Crush every detected run: recolor its cells to the blank sentinel
    /// (occupancy untouched — gravity consumes the blanks) and credit one
    /// score point per cell, longer runs first. Returns the number of cells
    /// cleared.
    pub fn crush_all(&self, board: &mut Board) -> usize {
        let runs = self.find_runs(board);
        let mut cleared = 0;
        for run in runs {
            for (r, c) in run.cells {
                board.set_color_at(r, c, Color::Blank);
                board.increment_score((r, c));
                cleared += 1;
            }
        }
        cleared
    }
}
