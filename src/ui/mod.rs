//! Terminal UI: a cursor-driven board view for playing the match game,
//! with cascade animation driven off the event-poll timeout.

mod app;
mod game_view;

pub use app::App;
