//! Terminal lifecycle, event loop, and cleanup for Colora.

mod actions;
mod adjust;
mod analysis;
mod app;
mod backend;
mod catalog;
mod clipboard;
mod color;
mod config;
mod events;
mod model;
mod nav;
mod sampler;
mod session;
mod state;
mod store;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use app::{App, Services};
use backend::GeminiClient;
use clipboard::Osc52;
use config::Config;
use events::{key_to_action, TICK_RATE};
use sampler::{CameraDevice, FrameFileCamera, NoCamera};
use store::FileStore;

fn main() -> Result<()> {
    let config = Config::parse();
    let data_dir = config.data_dir()?;
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating data directory {}", data_dir.display()))?;

    // Log to a file: the alternate screen owns stdout. RUST_LOG controls the filter.
    let log_path = config.log_path(&data_dir);
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("colora_tui=info".parse()?))
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    let camera: Box<dyn CameraDevice> = match &config.camera_frame {
        Some(path) => Box::new(FrameFileCamera::new(path)),
        None => Box::new(NoCamera),
    };
    let services = Services {
        analysis: Arc::new(GeminiClient::new(config.gemini())?),
        camera,
        store: Box::new(FileStore::new(&data_dir)),
        clipboard: Box::new(Osc52::new(io::stdout())),
    };
    tracing::info!(data_dir = %data_dir.display(), model = %config.model, "starting colora");

    // Set up the terminal in raw / alternate-screen mode.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, DisableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = App::new(services, runtime.handle().clone());
    app.bootstrap();

    let result = run_loop(&mut terminal, &mut app);

    // Always restore the terminal, even on error.
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    // Cancels any in-flight request and releases the camera before the runtime goes.
    drop(app);
    runtime.shutdown_timeout(Duration::from_millis(500));
    if let Err(e) = &result {
        tracing::error!(error = %e, "exited with error");
    }
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick = app.tick.wrapping_add(1);
        app.poll_results();

        if app.should_quit {
            return Ok(());
        }

        let tick = app.tick;
        terminal.draw(|frame| ui::render(frame, app, tick))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if let Some(a) = key_to_action(&key, app.state.screen, app.input_has_focus()) {
                    app.dispatch(a);
                    if app.should_quit {
                        return Ok(());
                    }
                }
            }
        }
    }
}
