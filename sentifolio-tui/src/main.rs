//! Sentifolio TUI — five-panel terminal dashboard for the Reddit-sentiment
//! portfolio.
//!
//! Panels:
//! 1. Filters — date range, ranking indicator, benchmark; staged edits
//!    applied atomically
//! 2. Chart — cumulative portfolio vs benchmark returns
//! 3. Summary — peak return and outperformance metrics
//! 4. Tickers — monthly rebalancing table with on-demand news per date
//! 5. Help — keyboard shortcuts

mod app;
mod input;
mod persistence;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use sentifolio_core::api::{ApiClient, ApiConfig};

use crate::app::AppState;
use crate::worker::{WorkerCommand, WorkerResponse};

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Paths
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sentifolio");
    let state_path = config_dir.join("state.json");
    let api_config = ApiConfig::load(&config_dir.join("api.toml"));
    let api_client = ApiClient::new(&api_config)?;

    // Load persisted state
    let persisted = persistence::load(&state_path);

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    // Spawn worker
    let worker_handle = worker::spawn_worker(cmd_rx, resp_tx, api_client);

    // Build app state
    let mut app = AppState::new(cmd_tx.clone(), resp_rx);

    // Apply persisted state and fetch for the restored filter.
    persistence::apply(&mut app, persisted);
    app.request_returns();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let persisted = persistence::extract(&app);
    let _ = persistence::save(&state_path, &persisted);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            handle_worker_response(app, resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn handle_worker_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::ReturnsLoaded {
            request_id,
            payload,
        } => {
            app.apply_returns_response(request_id, Ok(payload));
        }
        WorkerResponse::ReturnsFailed { request_id, error } => {
            app.apply_returns_response(request_id, Err(error));
        }
        WorkerResponse::NewsLoaded { date, articles } => {
            app.apply_news_response(date, Ok(articles));
        }
        WorkerResponse::NewsFailed { date, error } => {
            app.apply_news_response(date, Err(error));
        }
    }
}
