use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use connect_four::config::{AppConfig, LoggingConfig};
use connect_four::session::Session;
use connect_four::store::FileStore;
use connect_four::ui::{App, StatusFeed};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Two-player Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect_four", about = "Play Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override where the board is saved
    #[arg(long)]
    board: Option<PathBuf>,

    /// Discard any saved game without asking
    #[arg(long)]
    new_game: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(board) = cli.board {
        config.storage.path = board;
    }

    init_logging(&config.logging)?;
    info!(
        config = %cli.config.display(),
        found = cli.config.exists(),
        board = %config.storage.path.display(),
        "starting Connect Four"
    );

    let mut session = Session::open(FileStore::new(&config.storage.path), StatusFeed::default());
    if cli.new_game {
        session.start_new_game();
    }

    let mut app = App::new(session, &config.ui);
    run(&mut app).context("terminal UI failed")
}

/// Log to a file so output does not interfere with the TUI.
fn init_logging(config: &LoggingConfig) -> Result<()> {
    let log_file = std::fs::File::create(&config.file)
        .with_context(|| format!("creating log file {}", config.file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter)),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("initializing logging: {e}"))
}

fn run(app: &mut App<FileStore>) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    info!("exiting");
    res
}
