// Configuration for the page preview
//
// Configuration is loaded in order of precedence:
// 1. Environment variables (highest priority)
// 2. Config file (~/.config/vitrine/config.toml)
// 3. Built-in defaults (lowest priority)
//
// The behavioral knobs (thresholds, intervals, phrases, icons) default to
// the values the portfolio page shipped with; the config file exists so the
// two historical variants of the page (different icons, different phrase
// lists) are a matter of data, not code.

use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scroll-visual thresholds, in page pixels
#[derive(Debug, Clone)]
pub struct ScrollConfig {
    /// Offset past which the header gains its `scrolled` class
    pub scrolled_px: f64,
    /// Offset past which downward scrolling hides the header
    pub hide_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            scrolled_px: 50.0,
            hide_px: 100.0,
        }
    }
}

/// Reveal-on-scroll parameters
#[derive(Debug, Clone)]
pub struct RevealConfig {
    /// Fraction of an element that must be visible before it reveals
    pub visible_fraction: f64,
    /// Margin subtracted from the viewport bottom when measuring visibility
    pub bottom_margin_px: f64,
    /// Delay before a revealed skill bar animates to its percentage
    pub fill_delay_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            visible_fraction: 0.15,
            bottom_margin_px: 50.0,
            fill_delay_ms: 200,
        }
    }
}

/// Anchor-navigation parameters
#[derive(Debug, Clone)]
pub struct AnchorConfig {
    /// Extra clearance under the header when scrolling to a target
    pub margin_px: f64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self { margin_px: 20.0 }
    }
}

/// Typewriter phrase list and step intervals
#[derive(Debug, Clone)]
pub struct TypingConfig {
    pub phrases: Vec<String>,
    /// Delay per typed character
    pub type_ms: u64,
    /// Delay per deleted character
    pub delete_ms: u64,
    /// Pause on a fully-typed phrase before deleting starts
    pub hold_ms: u64,
    /// Pause after full deletion before the next phrase starts
    pub rest_ms: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            phrases: [
                "AI/ML Engineer.",
                "LLM & RAG Developer.",
                "Data Scientist.",
                "Web Developer.",
            ]
            .map(String::from)
            .to_vec(),
            type_ms: 100,
            delete_ms: 50,
            hold_ms: 1500,
            rest_ms: 500,
        }
    }
}

/// Theme assets: the meta colors and button icons for each mode
#[derive(Debug, Clone)]
pub struct ThemeStyle {
    pub meta_dark: String,
    pub meta_light: String,
    pub icon_sun: String,
    pub icon_moon: String,
}

impl Default for ThemeStyle {
    fn default() -> Self {
        Self {
            meta_dark: "#0c151d".to_string(),
            meta_light: "#f8fafc".to_string(),
            icon_sun: "☀".to_string(),
            icon_moon: "☾".to_string(),
        }
    }
}

/// Log file rotation cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    Daily,
    Never,
}

impl LogRotation {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "hourly" => LogRotation::Hourly,
            "never" => LogRotation::Never,
            _ => LogRotation::Daily,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            LogRotation::Hourly => "hourly",
            LogRotation::Daily => "daily",
            LogRotation::Never => "never",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Also write logs to rotating files
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_prefix: String,
    pub file_rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_prefix: "vitrine.log".to_string(),
            file_rotation: LogRotation::Daily,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to run the interactive preview (disable for headless mode)
    pub enable_tui: bool,
    pub scroll: ScrollConfig,
    pub reveal: RevealConfig,
    pub anchor: AnchorConfig,
    pub typing: TypingConfig,
    pub theme: ThemeStyle,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_tui: true,
            scroll: ScrollConfig::default(),
            reveal: RevealConfig::default(),
            anchor: AnchorConfig::default(),
            typing: TypingConfig::default(),
            theme: ThemeStyle::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Scroll settings as loaded from the config file
#[derive(Debug, Deserialize, Default)]
struct FileScroll {
    scrolled_px: Option<f64>,
    hide_px: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
struct FileReveal {
    visible_fraction: Option<f64>,
    bottom_margin_px: Option<f64>,
    fill_delay_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct FileAnchor {
    margin_px: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
struct FileTyping {
    phrases: Option<Vec<String>>,
    type_ms: Option<u64>,
    delete_ms: Option<u64>,
    hold_ms: Option<u64>,
    rest_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct FileTheme {
    meta_dark: Option<String>,
    meta_light: Option<String>,
    icon_sun: Option<String>,
    icon_moon: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<String>,
    file_prefix: Option<String>,
    file_rotation: Option<String>,
}

/// Config file structure (everything optional, sections included)
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    scroll: Option<FileScroll>,
    reveal: Option<FileReveal>,
    anchor: Option<FileAnchor>,
    typing: Option<FileTyping>,
    theme: Option<FileTheme>,
    logging: Option<FileLogging>,
}

impl Config {
    /// Get the config file path: ~/.config/vitrine/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("vitrine").join("config.toml"))
    }

    /// Create a config template if none exists, so the options are discoverable
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        let template = r##"# vitrine configuration
# Uncomment and modify options as needed

# Scroll visuals (page pixels)
# [scroll]
# scrolled_px = 50.0   # header gains its "scrolled" state past this offset
# hide_px = 100.0      # header hides when scrolling down past this offset

# Reveal-on-scroll
# [reveal]
# visible_fraction = 0.15
# bottom_margin_px = 50.0
# fill_delay_ms = 200

# Anchor navigation
# [anchor]
# margin_px = 20.0     # clearance under the header

# Typewriter
# [typing]
# phrases = ["AI/ML Engineer.", "LLM & RAG Developer.", "Data Scientist.", "Web Developer."]
# type_ms = 100
# delete_ms = 50
# hold_ms = 1500
# rest_ms = 500

# Theme assets (the stored dark/light preference lives in prefs.toml)
# [theme]
# meta_dark = "#0c151d"
# meta_light = "#f8fafc"
# icon_sun = "☀"
# icon_moon = "☾"

# Logging (RUST_LOG env var overrides the level)
# [logging]
# level = "info"       # trace, debug, info, warn, error
# file_enabled = false
# file_dir = "./logs"
# file_prefix = "vitrine.log"
# file_rotation = "daily"  # hourly, daily, never
"##;

        // Write template (ignore errors - config is optional)
        let _ = std::fs::write(&path, template);
    }

    /// Load file config if it exists
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                FileConfig::default()
            }),
            Err(_) => FileConfig::default(), // File doesn't exist, use defaults
        }
    }

    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# vitrine configuration

[scroll]
scrolled_px = {scrolled}
hide_px = {hide}

[reveal]
visible_fraction = {fraction}
bottom_margin_px = {margin}
fill_delay_ms = {fill}

[anchor]
margin_px = {anchor}

[typing]
phrases = {phrases:?}
type_ms = {type_ms}
delete_ms = {delete_ms}
hold_ms = {hold_ms}
rest_ms = {rest_ms}

[theme]
meta_dark = "{meta_dark}"
meta_light = "{meta_light}"
icon_sun = "{icon_sun}"
icon_moon = "{icon_moon}"

# Logging (RUST_LOG env var overrides the level)
[logging]
level = "{level}"
file_enabled = {file_enabled}
file_dir = "{file_dir}"
file_prefix = "{file_prefix}"
file_rotation = "{rotation}"
"#,
            scrolled = self.scroll.scrolled_px,
            hide = self.scroll.hide_px,
            fraction = self.reveal.visible_fraction,
            margin = self.reveal.bottom_margin_px,
            fill = self.reveal.fill_delay_ms,
            anchor = self.anchor.margin_px,
            phrases = self.typing.phrases,
            type_ms = self.typing.type_ms,
            delete_ms = self.typing.delete_ms,
            hold_ms = self.typing.hold_ms,
            rest_ms = self.typing.rest_ms,
            meta_dark = self.theme.meta_dark,
            meta_light = self.theme.meta_light,
            icon_sun = self.theme.icon_sun,
            icon_moon = self.theme.icon_moon,
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            file_prefix = self.logging.file_prefix,
            rotation = self.logging.file_rotation.as_str(),
        )
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        let defaults = Config::default();

        // TUI toggle: env only (runtime flag)
        let enable_tui = std::env::var("VITRINE_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        let file_scroll = file.scroll.unwrap_or_default();
        let scroll = ScrollConfig {
            scrolled_px: file_scroll.scrolled_px.unwrap_or(defaults.scroll.scrolled_px),
            hide_px: file_scroll.hide_px.unwrap_or(defaults.scroll.hide_px),
        };

        let file_reveal = file.reveal.unwrap_or_default();
        let reveal = RevealConfig {
            visible_fraction: file_reveal
                .visible_fraction
                .unwrap_or(defaults.reveal.visible_fraction),
            bottom_margin_px: file_reveal
                .bottom_margin_px
                .unwrap_or(defaults.reveal.bottom_margin_px),
            fill_delay_ms: file_reveal.fill_delay_ms.unwrap_or(defaults.reveal.fill_delay_ms),
        };

        let file_anchor = file.anchor.unwrap_or_default();
        let anchor = AnchorConfig {
            margin_px: file_anchor.margin_px.unwrap_or(defaults.anchor.margin_px),
        };

        let file_typing = file.typing.unwrap_or_default();
        let typing = TypingConfig {
            phrases: file_typing.phrases.unwrap_or(defaults.typing.phrases),
            type_ms: file_typing.type_ms.unwrap_or(defaults.typing.type_ms),
            delete_ms: file_typing.delete_ms.unwrap_or(defaults.typing.delete_ms),
            hold_ms: file_typing.hold_ms.unwrap_or(defaults.typing.hold_ms),
            rest_ms: file_typing.rest_ms.unwrap_or(defaults.typing.rest_ms),
        };

        let file_theme = file.theme.unwrap_or_default();
        let theme = ThemeStyle {
            meta_dark: file_theme.meta_dark.unwrap_or(defaults.theme.meta_dark),
            meta_light: file_theme.meta_light.unwrap_or(defaults.theme.meta_light),
            icon_sun: file_theme.icon_sun.unwrap_or(defaults.theme.icon_sun),
            icon_moon: file_theme.icon_moon.unwrap_or(defaults.theme.icon_moon),
        };

        // Log dir: env > file > default
        let file_logging = file.logging.unwrap_or_default();
        let file_dir = std::env::var("VITRINE_LOG_DIR")
            .ok()
            .or(file_logging.file_dir)
            .map(PathBuf::from)
            .unwrap_or(defaults.logging.file_dir);
        let logging = LoggingConfig {
            level: file_logging.level.unwrap_or(defaults.logging.level),
            file_enabled: file_logging
                .file_enabled
                .unwrap_or(defaults.logging.file_enabled),
            file_dir,
            file_prefix: file_logging
                .file_prefix
                .unwrap_or(defaults.logging.file_prefix),
            file_rotation: file_logging
                .file_rotation
                .as_deref()
                .map(LogRotation::parse)
                .unwrap_or(defaults.logging.file_rotation),
        };

        Self {
            enable_tui,
            scroll,
            reveal,
            anchor,
            typing,
            theme,
            logging,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_page_constants() {
        let config = Config::default();
        assert_eq!(config.scroll.scrolled_px, 50.0);
        assert_eq!(config.scroll.hide_px, 100.0);
        assert_eq!(config.reveal.visible_fraction, 0.15);
        assert_eq!(config.reveal.bottom_margin_px, 50.0);
        assert_eq!(config.reveal.fill_delay_ms, 200);
        assert_eq!(config.anchor.margin_px, 20.0);
        assert_eq!(config.typing.type_ms, 100);
        assert_eq!(config.typing.delete_ms, 50);
        assert_eq!(config.typing.hold_ms, 1500);
        assert_eq!(config.typing.rest_ms, 500);
        assert_eq!(config.typing.phrases.len(), 4);
    }

    #[test]
    fn test_to_toml_round_trips_through_the_file_shape() {
        let config = Config::default();
        let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
        let typing = parsed.typing.unwrap();
        assert_eq!(typing.phrases.unwrap(), config.typing.phrases);
        assert_eq!(typing.hold_ms, Some(1500));
        let theme = parsed.theme.unwrap();
        assert_eq!(theme.meta_dark.as_deref(), Some("#0c151d"));
        let logging = parsed.logging.unwrap();
        assert_eq!(logging.file_rotation.as_deref(), Some("daily"));
    }

    #[test]
    fn test_rotation_parsing_defaults_to_daily() {
        assert_eq!(LogRotation::parse("hourly"), LogRotation::Hourly);
        assert_eq!(LogRotation::parse("NEVER"), LogRotation::Never);
        assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    }
}
