//! videoteca - Video catalog client
//!
//! A TUI for browsing and editing the temáticas and videos of a
//! catalog REST service.
//!
//! Features:
//! - List, create, modify and delete temáticas
//! - List, create, modify and delete videos
//! - Refuses to delete a temática that still has videos
//!
//! Usage: videoteca [--api-url URL] [--route PATH]

mod api;
mod app;
mod config;
mod router;
mod types;
mod ui;
mod views;

#[cfg(test)]
mod scenarios;

use anyhow::{Context, Result};
use api::HttpApi;
use app::App;
use clap::Parser;
use config::Config;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use router::Route;
use std::fs::{self, OpenOptions};
use std::io::stdout;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

const KEYBINDINGS: &str = r#"KEYBINDINGS:
    1-3              Switch route
    j/k              Move cursor
    Enter/Space      Select item
    c                Crear
    m                Modificar selected item
    b                Borrar selected item
    r                Reload list
    t                Cycle theme
    q                Quit

FORM:
    Tab/Shift-Tab    Next/previous field
    Left/Right       Change option
    Space            Toggle checkbox
    Enter            Save
    Esc              Cancel

ROUTES:
    [1] /            Inicio
    [2] /tematica    Temáticas
    [3] /video       Videos

CONFIG:
    ~/.config/videoteca/config.toml"#;

/// Video catalog client
#[derive(Parser, Debug)]
#[command(name = "videoteca")]
#[command(version, about, long_about = None, after_help = KEYBINDINGS)]
struct Cli {
    /// Catalog service base URL (overrides config)
    #[arg(short = 'u', long, value_name = "URL")]
    api_url: Option<String>,

    /// Start at /, /tematica or /video
    #[arg(short = 'r', long, value_name = "PATH", default_value = "/", value_parser = parse_route)]
    route: Route,
}

fn parse_route(path: &str) -> Result<Route, String> {
    Route::from_path(path)
        .ok_or_else(|| format!("unknown route {} (expected /, /tematica or /video)", path))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = run_app(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file, the terminal belongs to the UI
fn init_logging(config: &Config) -> Result<()> {
    let path = Config::log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create log directory")?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(())
}

fn run_app(args: Cli) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(url) = args.api_url {
        config.api.base_url = url;
    }

    init_logging(&config)?;
    info!(version = env!("CARGO_PKG_VERSION"), api = %config.api.base_url, "starting");

    let api = HttpApi::new(&config.api).context("Failed to create HTTP client")?;
    let mut app = App::new(config, Box::new(api));

    // Restore the terminal before the panic message is printed
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    app.navigate(args.route);

    // Run main loop
    let result = main_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("exiting");
    result
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        app.tick();

        // Poll with timeout so flash messages expire without input
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
