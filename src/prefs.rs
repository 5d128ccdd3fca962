// Preference store - the one durable value this program keeps
//
// The theme choice survives restarts as a single key in a TOML file under
// the user's config directory (the terminal analog of the original page's
// localStorage entry). The path is injectable so tests can point the store
// at a temp directory.
//
// Also home to the system color-scheme probe used as the fallback default
// when no preference has been stored yet.

use crate::controller::theme::ThemeMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// On-disk shape of the preference file
#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefsFile {
    theme: Option<String>,
}

/// Durable single-key preference store
#[derive(Debug, Clone)]
pub struct PrefStore {
    path: Option<PathBuf>,
}

impl PrefStore {
    /// Store at the default location: ~/.config/vitrine/prefs.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn open_default() -> Self {
        Self {
            path: dirs::home_dir()
                .map(|p| p.join(".config").join("vitrine").join("prefs.toml")),
        }
    }

    /// Store at an explicit path (tests)
    pub fn at(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// Read the stored theme; missing file or invalid value both yield None
    pub fn load_theme(&self) -> Option<ThemeMode> {
        let path = self.path.as_ref()?;
        let contents = std::fs::read_to_string(path).ok()?;
        let file: PrefsFile = toml::from_str(&contents).ok()?;
        ThemeMode::parse(file.theme.as_deref()?)
    }

    /// Overwrite the stored theme
    pub fn store_theme(&self, mode: ThemeMode) -> Result<(), std::io::Error> {
        let Some(path) = self.path.as_ref() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine preference path",
            ));
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = PrefsFile {
            theme: Some(mode.as_str().to_string()),
        };
        let contents = toml::to_string(&file)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, contents)
    }
}

/// Probe the environment for a preferred color scheme.
///
/// `VITRINE_COLOR_SCHEME=dark|light` wins when set; otherwise the `COLORFGBG`
/// convention some terminals export ("fg;bg", dark background index means a
/// dark scheme). Returns None when neither signal is present.
pub fn system_scheme() -> Option<ThemeMode> {
    if let Ok(value) = std::env::var("VITRINE_COLOR_SCHEME") {
        if let Some(mode) = ThemeMode::parse(&value.to_lowercase()) {
            return Some(mode);
        }
    }
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| scheme_from_colorfgbg(&v))
}

/// Interpret a COLORFGBG value ("15;0", "0;default;15", ...)
fn scheme_from_colorfgbg(value: &str) -> Option<ThemeMode> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    match bg {
        0..=6 | 8 => Some(ThemeMode::Dark),
        7 | 9..=15 => Some(ThemeMode::Light),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefStore::at(dir.path().join("nested").join("prefs.toml"));

        assert_eq!(store.load_theme(), None);
        store.store_theme(ThemeMode::Dark).unwrap();
        assert_eq!(store.load_theme(), Some(ThemeMode::Dark));
        store.store_theme(ThemeMode::Light).unwrap();
        assert_eq!(store.load_theme(), Some(ThemeMode::Light));
    }

    #[test]
    fn test_corrupt_value_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "theme = \"sepia\"\n").unwrap();

        let store = PrefStore::at(path.clone());
        assert_eq!(store.load_theme(), None);

        std::fs::write(&path, "not toml at all [").unwrap();
        assert_eq!(store.load_theme(), None);
    }

    #[test]
    fn test_colorfgbg_interpretation() {
        assert_eq!(scheme_from_colorfgbg("15;0"), Some(ThemeMode::Dark));
        assert_eq!(scheme_from_colorfgbg("0;15"), Some(ThemeMode::Light));
        assert_eq!(scheme_from_colorfgbg("0;default;8"), Some(ThemeMode::Dark));
        assert_eq!(scheme_from_colorfgbg(""), None);
        assert_eq!(scheme_from_colorfgbg("garbage"), None);
    }
}
