// Startup module - displays banner and behavior wiring status
//
// This module provides a professional startup experience showing:
// - Version info and branding
// - Configuration loaded from file
// - Behavior wiring status with checkmarks

use crate::config::{Config, VERSION};
use crate::controller::{Behavior, Controller};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Behavior wiring result for display
pub struct BehaviorStatus {
    pub name: &'static str,
    pub wired: bool,
    pub description: &'static str,
}

/// Print the startup banner and behavior wiring status
/// This runs before the TUI takes over the screen (or in headless mode)
pub fn print_startup(config: &Config, controller: &Controller) {
    use colors::*;

    // Banner
    println!();
    println!("  {BOLD}{CYAN}Vitrine{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Interactive portfolio page preview{RESET}");
    println!();

    // Config file status
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    // Behavior wiring
    println!("  {DIM}Wiring behaviors...{RESET}");

    for status in get_behavior_status(controller) {
        print_behavior_status(&status);
    }

    println!();

    println!(
        "  {MAGENTA}▸{RESET} Theme: {BOLD}{}{RESET}",
        controller.theme_mode().as_str()
    );
    if !config.enable_tui {
        println!("  {DIM}▸ Headless mode (no interactive preview){RESET}");
    }
    println!();
}

/// Wiring status for every behavior, in registration order
fn get_behavior_status(controller: &Controller) -> Vec<BehaviorStatus> {
    Behavior::ALL
        .iter()
        .map(|b| BehaviorStatus {
            name: b.name(),
            wired: controller.is_wired(*b),
            description: b.describe(),
        })
        .collect()
}

/// Print a single behavior's status
fn print_behavior_status(status: &BehaviorStatus) {
    use colors::*;

    let (icon, style) = if status.wired {
        (format!("{GREEN}✓{RESET}"), "")
    } else {
        (format!("{DIM}○{RESET}"), DIM)
    };

    println!(
        "    {icon} {style}{:<12}{RESET} {DIM}{}{RESET}",
        status.name, status.description
    );
}

/// Print startup messages to the TUI log panel
/// This creates a boot sequence visible in the log panel
pub fn log_startup(controller: &Controller) {
    tracing::info!("═══════════════════════════════════");
    tracing::info!("  VITRINE v{}", VERSION);
    tracing::info!("═══════════════════════════════════");

    for status in get_behavior_status(controller) {
        let icon = if status.wired { "✓" } else { "○" };
        tracing::info!("  {} {} - {}", icon, status.name, status.description);
    }

    tracing::info!("▸ Theme: {}", controller.theme_mode().as_str());
    tracing::info!("Ready.");
}
