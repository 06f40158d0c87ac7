mod api;
mod app;
mod config;
mod logging;
mod ui;

use crate::api::http::HttpApi;
use crate::api::manager::ApiManager;
use crate::app::action::Action;
use crate::app::controller::{self, Intent};
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use anyhow::{Context, Result};
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let cfg = config::load_config()?;
    logging::init(&cfg.logging);
    info!(base_url = %cfg.api.base_url, "starting todo-tui");

    // First run: leave a default config behind to edit
    if !config::config_path().exists() {
        if let Err(e) = config::save_config(&config::AppConfig::default()) {
            warn!(error = %e, "could not write default config");
        }
    }

    let api = HttpApi::new(&cfg.api).context("Invalid API configuration")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, cfg, Arc::new(api)).await;

    restore_terminal()?;

    if let Err(e) = result {
        error!(error = %e, "exiting with error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    info!("shutting down");
    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
    api: Arc<HttpApi>,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let mut state = AppState::new(cfg);
    let api_manager = ApiManager::new(api, event_tx.clone());

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if term_tx.send(AppEvent::Terminal(event)).is_err() {
                break;
            }
        }
    });

    // Spawn tick task for the loading spinner (10 FPS)
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(100));
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    let initial = controller::dispatch(&mut state, Intent::Initialize);
    run_actions(&mut state, &api_manager, initial);

    terminal.draw(|f| ui::render(f, &state))?;

    // Main event loop
    while let Some(event) = event_rx.recv().await {
        let actions = handler::handle_event(&mut state, event);
        run_actions(&mut state, &api_manager, actions);

        if state.should_quit {
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    Ok(())
}

fn run_actions(state: &mut AppState, api_manager: &ApiManager, actions: Vec<Action>) {
    for action in actions {
        match action {
            Action::Request(request) => {
                state.request_started();
                // Completion arrives as an AppEvent; the handle is not needed
                drop(api_manager.dispatch(request));
            }
            Action::Quit => state.should_quit = true,
        }
    }
}
