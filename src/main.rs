use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use candy_crush::config::AppConfig;
use candy_crush::ui::App;

/// Play a match-3 candy game in the terminal.
#[derive(Parser)]
#[command(name = "candy-crush", about = "Terminal match-3 candy game")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override board size (squares per side)
    #[arg(long)]
    size: Option<usize>,

    /// Override number of candy colors in play
    #[arg(long)]
    colors: Option<usize>,

    /// Seed the deal for a reproducible board
    #[arg(long)]
    seed: Option<u64>,

    /// Override milliseconds between cascade ticks
    #[arg(long)]
    tick_ms: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(size) = cli.size {
        config.board.size = size;
    }
    if let Some(colors) = cli.colors {
        config.board.colors = colors;
    }
    if let Some(seed) = cli.seed {
        config.board.seed = Some(seed);
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.ui.tick_ms = tick_ms;
    }
    config.validate().context("invalid configuration")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(&config);
    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running the game")
}
