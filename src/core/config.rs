//! Toolkit configuration persisted as JSON
//!
//! Mirrors the layout of the save directory: each world keeps its chunk
//! files under `<saves>/<world>/universe/worlds/default/chunks`.

use crate::core::error::Error;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of chunks regenerated per tick
pub const DEFAULT_CHUNKS_PER_TICK: usize = 5;

/// Default protect-mode radius, in chunks
pub const DEFAULT_PROTECT_RADIUS: i32 = 32;

/// Toolkit configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Override for the saves directory; `None` means the caller decides
    pub saves_path: Option<PathBuf>,
    /// Chunks regenerated per tick (higher = faster but more lag)
    pub chunks_per_tick: usize,
    /// Protect-mode radius around the first selected chunk, in chunks
    pub protect_radius: i32,
    /// Whether the offline tool backs up region files before deleting
    pub backup: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            saves_path: None,
            chunks_per_tick: DEFAULT_CHUNKS_PER_TICK,
            protect_radius: DEFAULT_PROTECT_RADIUS,
            backup: true,
        }
    }
}

impl Config {
    /// Load the configuration from a JSON file
    ///
    /// A missing file yields defaults. An unreadable or corrupt file is
    /// logged and also yields defaults, so a bad config never blocks the
    /// tooling.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Ignoring corrupt config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Chunks directory for a named world under a saves directory
    pub fn chunks_path(saves_path: &Path, world_name: &str) -> PathBuf {
        saves_path
            .join(world_name)
            .join("universe")
            .join("worlds")
            .join("default")
            .join("chunks")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.chunks_per_tick, 5);
        assert_eq!(config.protect_radius, 32);
        assert!(config.backup);
        assert!(config.saves_path.is_none());
    }

    #[test]
    fn test_config_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.json"));
        assert_eq!(config.chunks_per_tick, 5);
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.chunks_per_tick = 8;
        config.backup = false;
        config.save(&path).unwrap();

        let loaded = Config::load(&path);
        assert_eq!(loaded.chunks_per_tick, 8);
        assert!(!loaded.backup);
    }

    #[test]
    fn test_config_load_corrupt_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let config = Config::load(&path);
        assert_eq!(config.chunks_per_tick, 5);
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"protect_radius": 5}"#).unwrap();

        let config = Config::load(&path);
        assert_eq!(config.protect_radius, 5);
        assert_eq!(config.chunks_per_tick, 5);
    }

    #[test]
    fn test_chunks_path_layout() {
        let path = Config::chunks_path(Path::new("/saves"), "alpha");
        assert_eq!(
            path,
            PathBuf::from("/saves/alpha/universe/worlds/default/chunks")
        );
    }
}
