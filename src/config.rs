use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::session::SessionLength;

/// User preferences kept between runs. No session data is stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub session_length: SessionLength,
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("digitar_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("ignoring unreadable config {}: {}", self.path.display(), e);
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn session_length_is_stored_in_seconds() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            session_length: SessionLength::ThreeMinutes,
        };
        store.save(&cfg).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"session_length\": 180"), "{raw}");
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn unsupported_length_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "session_length": 90 }"#).unwrap();
        let store = FileConfigStore::with_path(&path);
        assert_eq!(store.load(), Config::default());
    }
}
