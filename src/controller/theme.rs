// Theme toggle - two-state dark/light machine
//
// Initial state resolution: stored preference, then the system color-scheme
// signal, then light. Applying a state is synchronous: body class, theme-color
// meta value, toggle-button icon and the persisted preference all change
// together, so no partial state is ever observable.

use crate::config::ThemeStyle;
use crate::page::{ElementId, Page};
use crate::prefs::PrefStore;

/// The two mutually exclusive presentation modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Dark,
    #[default]
    Light,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    /// Parse a stored value; anything but the two valid strings is rejected
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    /// Initial mode: stored preference > system scheme > light
    pub fn resolve(stored: Option<Self>, system: Option<Self>) -> Self {
        stored.or(system).unwrap_or_default()
    }
}

/// Theme state plus the page hooks it drives
#[derive(Debug)]
pub struct ThemeToggle {
    mode: ThemeMode,
    button: Option<ElementId>,
    style: ThemeStyle,
}

impl ThemeToggle {
    /// Resolve the initial mode and apply it to the page.
    ///
    /// The toggle button is optional; without one the theme still applies at
    /// startup, there is just nothing to click.
    pub fn mount(
        page: &mut Page,
        style: ThemeStyle,
        prefs: &PrefStore,
        system: Option<ThemeMode>,
    ) -> Self {
        let button = page.find_id("dark-mode-toggle");
        let mode = ThemeMode::resolve(prefs.load_theme(), system);
        let mut toggle = Self {
            mode,
            button,
            style,
        };
        toggle.apply(page, prefs);
        toggle
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn button(&self) -> Option<ElementId> {
        self.button
    }

    /// Flip to the other mode and apply it
    pub fn toggle(&mut self, page: &mut Page, prefs: &PrefStore) {
        self.mode = self.mode.flipped();
        self.apply(page, prefs);
        tracing::debug!("Theme switched to {}", self.mode.as_str());
    }

    fn apply(&mut self, page: &mut Page, prefs: &PrefStore) {
        let dark = self.mode == ThemeMode::Dark;
        let body = page.body();
        page.element_mut(body).set_class("dark-mode", dark);
        page.set_meta_theme_color(if dark {
            &self.style.meta_dark
        } else {
            &self.style.meta_light
        });
        if let Some(btn) = self.button {
            // Dark mode shows the sun icon: the button offers the way out
            let icon = if dark {
                &self.style.icon_sun
            } else {
                &self.style.icon_moon
            };
            page.element_mut(btn).text = icon.clone();
        }
        if let Err(e) = prefs.store_theme(self.mode) {
            tracing::warn!("Could not persist theme preference: {e}");
        }
    }
}
