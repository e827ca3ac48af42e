//! Core match-3 game logic: board representation, match detection, gravity
//! refill, the settle state machine, and the player-facing game session.

mod board;
mod events;
mod gravity;
mod matches;
mod moves;
mod session;
mod settle;
mod token;

pub use board::Board;
pub use events::BoardEvent;
pub use gravity::GravityRefill;
pub use matches::{Axis, MatchDetector, Run, RUN_LENGTHS};
pub use moves::{MoveValidator, SwapError};
pub use session::GameSession;
pub use settle::{SettleState, StabilityController};
pub use token::{Color, Token, TokenId};
