use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use crossterm::event::KeyEventKind;
use ratatui::prelude::*;

mod aggregate;
mod app;
mod config;
mod dashboard;
mod db;
mod error;
mod geo;
mod models;
mod normalize;
mod seed;
mod source;
mod tui;

use app::App;
use config::Config;
use dashboard::{Dashboard, DashboardOptions};
use db::DatabaseTarget;
use error::{AppError, Result};
use geo::ChainedGeocoder;
use source::RecordSource;
use tui::{draw, handle_key_event};

const DEFAULT_DB_PATH: &str = "data/coffee_canary.db";

#[tokio::main]
async fn main() -> Result<()> {
    // A local .env may carry DB_* and GOOGLE_MAPS_API_KEY
    dotenvy::dotenv().ok();

    // Initialize logging (only show warnings and errors by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    // Load configuration
    let config = Config::load()?;

    match args.get(1).map(String::as_str) {
        Some("--seed") => {
            let db_path = args
                .get(2)
                .map(PathBuf::from)
                .unwrap_or_else(|| default_seed_path(&config));
            let report = seed::seed_database(
                &db_path,
                &PathBuf::from(&config.beans_csv),
                &PathBuf::from(&config.roasters_csv),
            )
            .await?;
            println!(
                "Seeded {}: {} roasters, {} purchases",
                db_path.display(),
                report.roasters,
                report.purchases
            );
            return Ok(());
        }
        Some("--summary") => {
            let source = RecordSource::from_config(&config);
            let geocoder = ChainedGeocoder::from_config(&config)?;
            let options = DashboardOptions {
                restrict_map_to_purchased: config.restrict_map_to_purchased,
            };
            let dashboard = Dashboard::build(&source, &geocoder, options).await;
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
            return Ok(());
        }
        Some("--list-tables") => {
            let url = config
                .connection_string()
                .ok_or_else(|| AppError::Config("no database configured".to_string()))?;
            let target = DatabaseTarget::parse(&url)?;
            for table in db::list_tables(&target, config.db_timeout()).await? {
                println!("{table}");
            }
            return Ok(());
        }
        Some(other) if other.starts_with("--") => {
            eprintln!("Unknown option {other}");
            eprintln!("Usage: coffee-canary [--seed [db_path] | --summary | --list-tables]");
            std::process::exit(2);
        }
        _ => {}
    }

    // Initialize app
    let mut app = App::new(&config).await?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

/// The configured SQLite file when there is one, else the default path.
fn default_seed_path(config: &Config) -> PathBuf {
    match config
        .connection_string()
        .and_then(|url| DatabaseTarget::parse(&url).ok())
    {
        Some(DatabaseTarget::Sqlite(path)) => path,
        _ => PathBuf::from(DEFAULT_DB_PATH),
    }
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = handle_key_event(key, app.show_help) {
                        let should_quit = app.handle_action(action).await?;
                        if should_quit {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}
