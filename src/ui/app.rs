use crate::config::AppConfig;
use crate::game::GameSession;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Duration;

pub struct App {
    session: GameSession,
    cursor: (usize, usize),
    selected: Option<(usize, usize)>,
    tick: Duration,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let size = config.board.size;
        App {
            session: GameSession::new(size, config.board.colors, config.board.seed),
            cursor: (size / 2, size / 2),
            selected: None,
            tick: Duration::from_millis(config.ui.tick_ms),
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;

            // The poll timeout doubles as the cascade cadence: one settle
            // pass per redraw while the board is resolving.
            if !self.session.is_stable() {
                self.session.tick();
            }
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(self.tick)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        let size = self.session.board().size();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => {
                if self.cursor.0 > 0 {
                    self.cursor.0 -= 1;
                }
            }
            KeyCode::Down => {
                if self.cursor.0 < size - 1 {
                    self.cursor.0 += 1;
                }
            }
            KeyCode::Left => {
                if self.cursor.1 > 0 {
                    self.cursor.1 -= 1;
                }
            }
            KeyCode::Right => {
                if self.cursor.1 < size - 1 {
                    self.cursor.1 += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.select_or_swap();
            }
            KeyCode::Char('a') => {
                self.selected = None;
                if self.session.auto_move().is_none() {
                    self.message = Some("No moves available".to_string());
                }
            }
            KeyCode::Char('r') => {
                self.session.request_reset();
                self.selected = None;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// First press marks a square, second press swaps with it. Pressing the
    /// marked square again unmarks it.
    fn select_or_swap(&mut self) {
        match self.selected {
            None => {
                self.selected = Some(self.cursor);
            }
            Some(from) if from == self.cursor => {
                self.selected = None;
            }
            Some(from) => {
                match self.session.request_swap(from, self.cursor) {
                    Ok(()) => {
                        self.selected = None;
                    }
                    Err(err) => {
                        self.message = Some(err.to_string());
                        // Keep the selection so the player can retry.
                    }
                }
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.session, self.cursor, self.selected, &self.message);
    }
}
