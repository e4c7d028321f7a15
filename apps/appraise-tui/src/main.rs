//! Appraise TUI - House Features Selection
//!
//! Terminal form for entering house features and predicting a price.
//!
//! ```text
//! appraise-tui [--config <path>] [--model <path>]
//! ```

mod app;
mod mode;
mod views;
mod widgets;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use appraise_core::{AppraiseConfig, Appraiser};

use app::App;

/// Command line options
#[derive(Debug, Parser)]
#[command(name = "appraise-tui", version, about = "Terminal form for house price prediction")]
struct Args {
    /// Config file (default: ~/.appraise/config.toml, then ./.appraise/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Model artifact, overriding the config
    #[arg(long)]
    model: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup logging; stderr keeps log lines off the alternate screen buffer
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // Load the model before touching the terminal so failures print normally
    let cwd = std::env::current_dir().ok();
    let mut config = AppraiseConfig::load_standard(args.config.as_deref(), cwd.as_deref())?;
    if let Some(model) = args.model {
        config.model_path = model;
    }
    let appraiser = Appraiser::from_config(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(appraiser);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.handle_key(key.code, key.modifiers) {
                return Ok(());
            }
        }
    }
}
