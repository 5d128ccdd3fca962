// Vitrine - interactive portfolio page preview
//
// The portfolio page's client-side behaviors, rebuilt as explicit state
// machines over an in-memory page model and driven from a terminal.
//
// Architecture:
// - Page model: elements with classes, attributes, styles and geometry
// - Controller: behavior state machines wired through a registration table
// - Scheduler: cancellable virtual timers for the typewriter and bar fills
// - TUI (ratatui): renders the page model and feeds input events in
// - Prefs: the persisted theme choice, one key in a TOML file

mod cli;
mod config;
mod controller;
mod demo;
mod events;
mod logging;
mod page;
mod prefs;
mod scheduler;
mod startup;
mod tui;

use anyhow::Result;
use config::{Config, LogRotation};
use controller::Controller;
use logging::{BufferLayer, LogBuffer};
use prefs::PrefStore;
use scheduler::Scheduler;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --path)
    // If a command was handled, exit early
    if cli::handle_cli() {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // Load configuration first to determine TUI vs headless mode
    let config = Config::from_env();

    // Create log buffer for TUI mode
    let log_buffer = LogBuffer::new();

    // Initialize tracing with conditional output
    // In TUI mode: capture logs to the buffer (prevents garbling the display)
    // In headless mode: output logs to stdout
    // File logging: optionally write to rotating log files (in addition to above)
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("vitrine={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must stay alive for the program's duration so file logs flush
    let _file_guard = init_tracing(&config, filter, log_buffer.clone());

    // Theme inputs: the stored preference and the terminal's color scheme
    let prefs = PrefStore::open_default();
    let system = prefs::system_scheme();

    // Build the page and mount the controller
    let mut page = demo::build_demo_page();
    let mut scheduler = Scheduler::new();
    let controller = Controller::mount(&mut page, &config, prefs, system, &mut scheduler);

    startup::print_startup(&config, &controller);
    startup::log_startup(&controller);

    // Run the TUI in the main task
    // This blocks until the user quits (presses 'q')
    if config.enable_tui {
        tracing::info!("Starting TUI");
        if let Err(e) = tui::run_tui(page, controller, scheduler, log_buffer).await {
            tracing::error!("TUI error: {:?}", e);
        }
    } else {
        tracing::info!("TUI disabled, running in headless mode");
        // In headless mode, just wait for Ctrl+C
        tokio::signal::ctrl_c().await?;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wire up the tracing subscriber: buffer layer in TUI mode, stdout layer
/// otherwise, plus an optional rotating JSON file layer.
fn init_tracing(
    config: &Config,
    filter: EnvFilter,
    log_buffer: LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let file_writer = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };
                Some(tracing_appender::non_blocking(appender))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                None
            }
        }
    } else {
        None
    };

    if config.enable_tui {
        let file_layer = file_writer.as_ref().map(|(non_blocking, _)| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking.clone())
                .with_ansi(false)
        });
        tracing_subscriber::registry()
            .with(filter)
            .with(BufferLayer::new(log_buffer))
            .with(file_layer)
            .init();
    } else {
        let file_layer = file_writer.as_ref().map(|(non_blocking, _)| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking.clone())
                .with_ansi(false)
        });
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .with(file_layer)
            .init();
    }

    file_writer.map(|(_, guard)| guard)
}
