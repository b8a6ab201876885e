use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tui_2048::config::{AppConfig, LoggingConfig};
use tui_2048::game::BoardEngine;
use tui_2048::store::FileScoreStore;
use tui_2048::ui::App;

/// Play 2048 in the terminal.
#[derive(Parser)]
#[command(name = "tui-2048", about = "Play 2048 in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "g2048.toml")]
    config: PathBuf,

    /// Board edge length (overrides config)
    #[arg(long)]
    size: Option<usize>,

    /// File holding the best score (overrides config)
    #[arg(long)]
    best_file: Option<PathBuf>,

    /// Fixed RNG seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Skip the title animation
    #[arg(long)]
    no_intro: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(size) = cli.size {
        config.game.size = size;
    }
    if let Some(path) = cli.best_file {
        config.storage.best_score_path = path;
    }
    if cli.seed.is_some() {
        config.game.seed = cli.seed;
    }
    if cli.log_file.is_some() {
        config.logging.file = cli.log_file;
    }
    if cli.no_intro {
        config.ui.intro = false;
    }
    config.validate().context("invalid configuration")?;

    init_logging(&config.logging)?;

    let store = Box::new(FileScoreStore::new(&config.storage.best_score_path));
    let engine = match config.game.seed {
        Some(seed) => BoardEngine::seeded(config.game.size, store, seed),
        None => BoardEngine::new(config.game.size, store),
    }?;

    let mut app = App::new(engine, &config.ui);
    run_terminal(&mut app)?;

    let engine = app.engine();
    info!(score = engine.score(), best = engine.best_score(), "exiting");
    println!("Score: {}  Best: {}", engine.score(), engine.best_score());
    Ok(())
}

fn run_terminal(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}

/// Send logs to a file; the terminal itself is taken by the UI.
fn init_logging(config: &LoggingConfig) -> Result<()> {
    let Some(path) = &config.file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}
