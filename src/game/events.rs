use super::token::{Color, TokenId};

/// Change notification published by the board. Subscribers (renderer,
/// scorer) receive every event in emission order over their own channel.
///
/// `from` coordinates on [`BoardEvent::Added`] are signed: a refill token
/// spawns at row `-1`, one step above the board, so a renderer can animate
/// it dropping in from offscreen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    Added {
        id: TokenId,
        color: Color,
        to: (usize, usize),
        from: (i32, i32),
    },
    Moved {
        id: TokenId,
        color: Color,
        from: (usize, usize),
        to: (usize, usize),
    },
    Removed {
        id: TokenId,
        color: Color,
        from: (usize, usize),
    },
    ScoreUpdate {
        score: u32,
        /// Cell just credited, if the update came from a crush.
        cleared: Option<(usize, usize)>,
    },
}
