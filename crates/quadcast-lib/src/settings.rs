//! Persisted user settings — a small JSON file in the home directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::{self, is_hex_color};
use crate::error::{QuadcastError, Result};

/// Settings file name, placed directly in the user's home directory.
pub const SETTINGS_FILE_NAME: &str = ".quadcast-ui-settings.json";

/// Default LED color (red).
pub const DEFAULT_COLOR: &str = "ff0000";

/// User settings. Keys absent from the file take their default values;
/// malformed content fails the load as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Last applied color, six hex digits without `#`.
    pub last_color: String,
    /// Re-apply `last_color` when the app starts.
    pub auto_apply: bool,
    /// Start the app on login. Stored only.
    pub launch_at_login: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            last_color: DEFAULT_COLOR.into(),
            auto_apply: false,
            launch_at_login: false,
        }
    }
}

impl Settings {
    fn validate(&self) -> Result<()> {
        if is_hex_color(&self.last_color) {
            Ok(())
        } else {
            Err(QuadcastError::Settings(format!(
                "lastColor must be six hex digits, got \"{}\"",
                self.last_color
            )))
        }
    }
}

/// Reads and writes [`Settings`] at a fixed path.
///
/// The path is resolved once, at construction; pass the store to whatever
/// needs settings access.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at `<home>/.quadcast-ui-settings.json`, or in the current
    /// directory if the home directory cannot be determined.
    pub fn new() -> Self {
        let base = dirs::home_dir().unwrap_or_else(|| {
            log::warn!("home directory unknown, storing settings in the current directory");
            PathBuf::from(".")
        });
        Self::at(base.join(SETTINGS_FILE_NAME))
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        SettingsStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load settings.
    ///
    /// - file absent → defaults
    /// - any other read failure → [`QuadcastError::Io`]
    /// - absent keys → their defaults
    /// - malformed JSON, wrong-typed value, or invalid `lastColor` →
    ///   [`QuadcastError::Settings`]
    pub fn load(&self) -> Result<Settings> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{} not found, using defaults", self.path.display());
                return Ok(Settings::default());
            }
            Err(e) => return Err(e.into()),
        };
        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            QuadcastError::Settings(format!("cannot parse {}: {e}", self.path.display()))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings, falling back to defaults on failure.
    ///
    /// The error (if any) is returned alongside so the caller can show it.
    pub fn load_or_default(&self) -> (Settings, Option<QuadcastError>) {
        match self.load() {
            Ok(s) => (s, None),
            Err(e) => (Settings::default(), Some(e)),
        }
    }

    /// Write the full settings document as indented JSON.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        settings.validate()?;
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| QuadcastError::Settings(format!("cannot serialize settings: {e}")))?;
        write_file(&self.path, json.as_bytes())?;
        log::debug!("settings saved to {}", self.path.display());
        Ok(())
    }

    /// Persist `color` (hex with or without `#`, or a preset name) as the
    /// last color, keeping the other fields.
    ///
    /// An unreadable or malformed existing file is replaced, starting from
    /// defaults.
    pub fn save_color(&self, color: &str) -> Result<Settings> {
        let rgb = color::parse_color(color)?;
        let mut settings = match self.load() {
            Ok(s) => s,
            Err(e) => {
                log::warn!("{e}; starting from default settings");
                Settings::default()
            }
        };
        settings.last_color = rgb.to_hex();
        self.save(&settings)?;
        Ok(settings)
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn write_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o644)
        .open(path)?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::at(dir.path().join(SETTINGS_FILE_NAME))
    }

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.last_color, "ff0000");
        assert!(!s.auto_apply);
        assert!(!s.launch_at_login);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(json["lastColor"], "ff0000");
        assert_eq!(json["autoApply"], false);
        assert_eq!(json["launchAtLogin"], false);
    }

    #[test]
    fn default_path_is_in_home() {
        let store = SettingsStore::new();
        assert!(store.path().ends_with(SETTINGS_FILE_NAME));
    }

    // ── load ──

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(!store.exists());
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn load_malformed_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();
        let err = store.load().unwrap_err();
        assert!(matches!(err, QuadcastError::Settings(_)));
    }

    #[test]
    fn load_absent_keys_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"lastColor": "00ff00"}"#).unwrap();
        assert_eq!(
            store.load().unwrap(),
            Settings {
                last_color: "00ff00".into(),
                auto_apply: false,
                launch_at_login: false,
            }
        );
    }

    #[test]
    fn load_empty_object_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{}").unwrap();
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn load_flags_only_keeps_default_color() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"autoApply": true}"#).unwrap();
        let loaded = store.load().unwrap();
        assert!(loaded.auto_apply);
        assert_eq!(loaded.last_color, DEFAULT_COLOR);
    }

    #[test]
    fn load_wrong_type_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            r#"{"lastColor": "00ff00", "autoApply": "yes", "launchAtLogin": false}"#,
        )
        .unwrap();
        assert!(matches!(store.load(), Err(QuadcastError::Settings(_))));
    }

    #[test]
    fn load_invalid_color_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            r##"{"lastColor": "#00ff00", "autoApply": true, "launchAtLogin": false}"##,
        )
        .unwrap();
        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("lastColor"), "{err}");
    }

    #[test]
    fn load_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path());
        assert!(matches!(store.load(), Err(QuadcastError::Io(_))));
    }

    #[test]
    fn load_ignores_indentation() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            r#"{"lastColor":"0066ff","autoApply":true,"launchAtLogin":true}"#,
        )
        .unwrap();
        let s = store.load().unwrap();
        assert_eq!(s.last_color, "0066ff");
        assert!(s.auto_apply);
        assert!(s.launch_at_login);
    }

    #[test]
    fn load_or_default_surfaces_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "garbage").unwrap();
        let (settings, err) = store.load_or_default();
        assert_eq!(settings, Settings::default());
        assert!(err.is_some());
    }

    // ── save ──

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        for (color, auto_apply, launch_at_login) in [
            ("000000", false, false),
            ("ff0080", true, false),
            ("ABCDEF", false, true),
            ("8b00ff", true, true),
        ] {
            let s = Settings {
                last_color: color.into(),
                auto_apply,
                launch_at_login,
            };
            store.save(&s).unwrap();
            assert_eq!(store.load().unwrap(), s);
        }
    }

    #[test]
    fn save_writes_indented_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&Settings::default()).unwrap();
        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert!(contents.contains("\n  \"lastColor\": \"ff0000\""), "{contents}");
    }

    #[test]
    fn save_rejects_invalid_color() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let s = Settings {
            last_color: "red".into(),
            ..Settings::default()
        };
        assert!(store.save(&s).is_err());
        assert!(!store.exists());
    }

    #[test]
    fn save_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("missing/settings.json"));
        assert!(matches!(
            store.save(&Settings::default()),
            Err(QuadcastError::Io(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn save_sets_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&Settings::default()).unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        // umask may clear bits but never add any
        assert_eq!(mode & 0o777 & !0o644, 0, "mode {mode:o}");
    }

    // ── save_color ──

    #[test]
    fn save_color_normalizes_and_keeps_flags() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .save(&Settings {
                last_color: "ff0000".into(),
                auto_apply: true,
                launch_at_login: true,
            })
            .unwrap();
        let saved = store.save_color("#FF00AA").unwrap();
        assert_eq!(saved.last_color, "ff00aa");
        let loaded = store.load().unwrap();
        assert_eq!(loaded.last_color, "ff00aa");
        assert!(loaded.auto_apply);
        assert!(loaded.launch_at_login);
    }

    #[test]
    fn save_color_accepts_preset() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save_color("cyan").unwrap();
        assert_eq!(store.load().unwrap().last_color, "00ffff");
    }

    #[test]
    fn save_color_replaces_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "garbage").unwrap();
        store.save_color("00ff00").unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.last_color, "00ff00");
        assert!(!loaded.auto_apply);
    }

    #[test]
    fn save_color_rejects_bad_color() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(matches!(
            store.save_color("nope"),
            Err(QuadcastError::Color(_))
        ));
        assert!(!store.exists());
    }
}
