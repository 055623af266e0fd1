use std::path::PathBuf;

use crate::types::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_file: PathBuf,
    pub web_root: PathBuf,
    pub locale: Locale,
    pub storage: StorageBackend,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            data_file: PathBuf::from("data/workouts.json"),
            web_root: PathBuf::from("assets/web"),
            locale: Locale::default(),
            storage: StorageBackend::File,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let data_file = std::env::var("DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_file);

        let web_root = std::env::var("WEB_ROOT")
            .map(PathBuf::from)
            .unwrap_or(defaults.web_root);

        let locale = std::env::var("LOCALE")
            .ok()
            .and_then(|s| Locale::from_str(&s))
            .unwrap_or(defaults.locale);

        let storage = match std::env::var("STORAGE_BACKEND").ok().as_deref() {
            Some("memory") => StorageBackend::Memory,
            _ => StorageBackend::File,
        };

        Self {
            port,
            data_file,
            web_root,
            locale,
            storage,
        }
    }
}
