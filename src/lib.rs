//! # Candy Crush
//!
//! A match-3 puzzle game with a terminal UI built with Ratatui. The engine
//! models a square board of colored tokens, player swaps between adjacent
//! cells, run detection (3/4/5 along rows and columns), crushing, gravity
//! refill, and a stability state machine that gates input while cascades
//! are in flight.
//!
//! ## Modules
//!
//! - [`game`] — Core engine: board, tokens, events, match detection,
//!   gravity, settle state machine, move validation, game session
//! - [`ui`] — Terminal UI: board view and input handling
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
