/// Application settings
///
/// Every field has a default, so a missing settings file is fine. The file
/// lives in the user's config directory:
/// - Linux: ~/.config/portfolio-viewer/settings.json
/// - macOS: ~/Library/Application Support/portfolio-viewer/settings.json
/// - Windows: %APPDATA%\portfolio-viewer\settings.json
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Overrides the catalog location
pub const CATALOG_ENV: &str = "PORTFOLIO_CATALOG";
/// Overrides the asset root
pub const ASSETS_ENV: &str = "PORTFOLIO_ASSETS";

const APP_DIR: &str = "portfolio-viewer";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// JSON document with the projects and the profile
    pub catalog_path: PathBuf,
    /// Directory image references are resolved against
    pub asset_root: PathBuf,
    /// Reference used when a project has no image at all
    pub placeholder: String,
    /// How long the selection survives after the modal starts closing
    pub close_delay_ms: u64,
    /// Delay before the first element of an opened modal gets focus
    pub focus_delay_ms: u64,
    /// Longest edge of generated card thumbnails, in pixels
    pub thumbnail_size: u32,
    /// Floating particles in the background
    pub particle_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("data/projects.json"),
            asset_root: PathBuf::from("public"),
            placeholder: "/placeholder.png".to_string(),
            close_delay_ms: 300,
            focus_delay_ms: 100,
            thumbnail_size: 480,
            particle_count: 20,
        }
    }
}

impl Settings {
    /// Load settings from the standard location, then apply env overrides.
    ///
    /// A malformed file is reported and ignored; the app still starts.
    pub fn load() -> Self {
        let mut settings = match Self::settings_path() {
            Some(path) => match Self::from_file(&path) {
                Ok(Some(settings)) => {
                    tracing::info!("⚙️  Settings loaded from {}", path.display());
                    settings
                }
                Ok(None) => Self::default(),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring settings file");
                    Self::default()
                }
            },
            None => Self::default(),
        };

        settings.apply_overrides(
            std::env::var_os(CATALOG_ENV).map(PathBuf::from),
            std::env::var_os(ASSETS_ENV).map(PathBuf::from),
        );
        settings
    }

    /// Read a settings file; `Ok(None)` when it does not exist
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    fn apply_overrides(&mut self, catalog: Option<PathBuf>, assets: Option<PathBuf>) {
        if let Some(catalog) = catalog {
            self.catalog_path = catalog;
        }
        if let Some(assets) = assets {
            self.asset_root = assets;
        }
    }

    /// Where the settings file is expected
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("settings.json"))
    }

    /// Directory for generated thumbnails
    pub fn thumbnail_cache_dir() -> PathBuf {
        let mut path = dirs::cache_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(std::env::temp_dir);
        path.push(APP_DIR);
        path.push("thumbnails");
        path
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }

    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_transition_timings() {
        let settings = Settings::default();
        assert_eq!(settings.close_delay(), Duration::from_millis(300));
        assert_eq!(settings.focus_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Settings::from_file(&dir.path().join("settings.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "close_delay_ms": 500, "asset_root": "/srv/assets" }"#)
            .unwrap();

        let settings = Settings::from_file(file.path()).unwrap().unwrap();
        assert_eq!(settings.close_delay_ms, 500);
        assert_eq!(settings.asset_root, PathBuf::from("/srv/assets"));
        assert_eq!(settings.focus_delay_ms, 100);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ close_delay_ms: }").unwrap();
        assert!(matches!(
            Settings::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_env_overrides_win() {
        let mut settings = Settings::default();
        settings.apply_overrides(Some(PathBuf::from("/tmp/p.json")), None);
        assert_eq!(settings.catalog_path, PathBuf::from("/tmp/p.json"));
        assert_eq!(settings.asset_root, PathBuf::from("public"));
    }
}
