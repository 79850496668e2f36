// File: ./src/config.rs
// Ambient UI preferences, kept in the platform config dir as TOML.
use crate::view::{Filter, SortMode};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub filter: Filter,
    pub sort: SortMode,
}

impl Config {
    fn get_path() -> Option<PathBuf> {
        if let Some(proj) = ProjectDirs::from("com", "taskdeck", "taskdeck") {
            let config_dir = proj.config_dir();
            if !config_dir.exists() {
                let _ = fs::create_dir_all(config_dir);
            }
            return Some(config_dir.join("config.toml"));
        }
        None
    }

    /// Load from the default location. Missing or unparsable files fall back
    /// to defaults; preferences are never worth refusing to start over.
    pub fn load() -> Self {
        match Self::get_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists()
            && let Ok(raw) = fs::read_to_string(path)
            && let Ok(cfg) = toml::from_str(&raw)
        {
            return cfg;
        }
        Self::default()
    }

    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::get_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let raw = toml::to_string_pretty(self)?;
        atomic_write(path, raw)
    }
}

/// Atomic write: write to a .tmp file then rename over the target.
fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}
