// Palette for the TUI
//
// Two palettes mirroring the page's dark and light themes. The preview
// repaints with the matching palette whenever the theme toggles, so the
// terminal tracks what the page would look like.

use crate::controller::theme::ThemeMode;
use ratatui::style::Color;

/// Complete palette definition for one theme mode
#[derive(Debug, Clone)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub border: Color,
    pub title: Color,
    pub accent: Color,
    pub dim: Color,
    pub progress: Color,
    pub revealed: Color,
    pub hidden: Color,

    // Log levels
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
    pub log_trace: Color,
}

impl Palette {
    /// Palette matching the given page theme
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(12, 21, 29), // the page's dark meta color
            fg: Color::Rgb(226, 232, 240),
            border: Color::Rgb(51, 65, 85),
            title: Color::Cyan,
            accent: Color::Rgb(56, 189, 248),
            dim: Color::DarkGray,
            progress: Color::Rgb(56, 189, 248),
            revealed: Color::Green,
            hidden: Color::DarkGray,
            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Green,
            log_debug: Color::Cyan,
            log_trace: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(248, 250, 252), // the page's light meta color
            fg: Color::Rgb(15, 23, 42),
            border: Color::Rgb(148, 163, 184),
            title: Color::Blue,
            accent: Color::Rgb(2, 132, 199),
            dim: Color::Gray,
            progress: Color::Rgb(2, 132, 199),
            revealed: Color::Rgb(22, 101, 52),
            hidden: Color::Gray,
            log_error: Color::Red,
            log_warn: Color::Rgb(161, 98, 7),
            log_info: Color::Rgb(21, 128, 61),
            log_debug: Color::Blue,
            log_trace: Color::Gray,
        }
    }
}
