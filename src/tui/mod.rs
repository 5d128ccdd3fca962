// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks)
// - Rendering the page model
//
// Keyboard and mouse input is translated into page events (scrolls and
// clicks) and fed through the controller's registration table; each tick
// delivers a frame event plus whatever scheduler timers came due. The tick
// must stay shorter than the smallest timer delay (50ms per delete step) so
// no two steps of one animation collapse into a single tick.

pub mod palette;
pub mod ui;

use crate::controller::Controller;
use crate::events::{ClickEvent, PageEvent};
use crate::logging::LogBuffer;
use crate::page::Page;
use crate::scheduler::Scheduler;
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use palette::Palette;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// Tick length, kept under the shortest scheduled delay
const TICK: Duration = Duration::from_millis(25);

/// Pixels per arrow-key or wheel step
const SCROLL_STEP: f64 = 40.0;

/// Run the TUI
///
/// This function sets up the terminal, runs the event loop, and cleans up
/// when done. The event loop handles both keyboard input and timer ticks.
pub async fn run_tui(
    mut page: Page,
    mut controller: Controller,
    mut scheduler: Scheduler,
    log_buffer: LogBuffer,
) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run the event loop
    let result = run_event_loop(
        &mut terminal,
        &mut page,
        &mut controller,
        &mut scheduler,
        &log_buffer,
    )
    .await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Each iteration draws, then waits on whichever fires first: terminal
/// input or the tick. Input becomes scroll/click events immediately; the
/// tick delivers the frame event and drains due timers.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    page: &mut Page,
    controller: &mut Controller,
    scheduler: &mut Scheduler,
    log_buffer: &LogBuffer,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(TICK);
    let mut should_quit = false;

    loop {
        let palette = Palette::for_mode(controller.theme_mode());
        terminal
            .draw(|f| ui::draw(f, page, controller, log_buffer, &palette))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => {
                            should_quit = handle_key_event(
                                page, controller, scheduler, key_event,
                            );
                        }
                        Ok(Event::Mouse(mouse_event)) => {
                            handle_mouse_event(page, controller, scheduler, mouse_event);
                        }
                        _ => {}
                    }
                }
            } => {}

            // Periodic tick: frame work plus due timers
            _ = tick_interval.tick() => {
                controller.dispatch(page, scheduler, PageEvent::Frame);
                for (_, task) in scheduler.advance(TICK) {
                    controller.dispatch(page, scheduler, PageEvent::Timer(task));
                }
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input. Returns true when the user asked to quit.
fn handle_key_event(
    page: &mut Page,
    controller: &mut Controller,
    scheduler: &mut Scheduler,
    key_event: KeyEvent,
) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,

        // Scrolling
        KeyCode::Up => scroll_by(page, controller, scheduler, -SCROLL_STEP),
        KeyCode::Down => scroll_by(page, controller, scheduler, SCROLL_STEP),
        KeyCode::PageUp => scroll_by(page, controller, scheduler, -page.viewport_height()),
        KeyCode::PageDown => scroll_by(page, controller, scheduler, page.viewport_height()),
        KeyCode::Home => scroll_by(page, controller, scheduler, -page.max_scroll()),
        KeyCode::End => scroll_by(page, controller, scheduler, page.max_scroll()),

        // Clicks on the page's interactive elements
        KeyCode::Char('t') => click_id(page, controller, scheduler, "dark-mode-toggle"),
        KeyCode::Char('m') => click_id(page, controller, scheduler, "mobile-menu-button"),
        KeyCode::Char('o') => {
            let click = ClickEvent::on(page.body());
            controller.dispatch(page, scheduler, PageEvent::Click(click));
        }
        KeyCode::Char(c @ '1'..='9') => {
            let idx = (c as usize) - ('1' as usize);
            if let Some(&link) = page.anchors().get(idx) {
                controller.dispatch(page, scheduler, PageEvent::Click(ClickEvent::on(link)));
            }
        }
        KeyCode::Char('w') => controller.stop_typewriter(scheduler),
        _ => {}
    }
    false
}

/// Handle mouse input: the wheel scrolls the page
fn handle_mouse_event(
    page: &mut Page,
    controller: &mut Controller,
    scheduler: &mut Scheduler,
    mouse_event: MouseEvent,
) {
    match mouse_event.kind {
        MouseEventKind::ScrollUp => scroll_by(page, controller, scheduler, -SCROLL_STEP),
        MouseEventKind::ScrollDown => scroll_by(page, controller, scheduler, SCROLL_STEP),
        _ => {}
    }
}

/// Move the viewport and notify the controller of the new offset
fn scroll_by(page: &mut Page, controller: &mut Controller, scheduler: &mut Scheduler, dy: f64) {
    page.scroll_to(page.scroll_y() + dy);
    let y = page.scroll_y();
    controller.dispatch(page, scheduler, PageEvent::Scroll { y });
}

/// Deliver a click to the element with the given id, if the page has one
fn click_id(page: &mut Page, controller: &mut Controller, scheduler: &mut Scheduler, id: &str) {
    if let Some(target) = page.find_id(id) {
        controller.dispatch(page, scheduler, PageEvent::Click(ClickEvent::on(target)));
    }
}
