//! Configuration module for esquery-rs
//!
//! Handles loading settings from YAML files and environment variables.
//! Settings are plain values handed to whichever component needs them;
//! nothing here is process-global.

mod settings;

pub use settings::*;

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable pointing at an explicit settings file
pub const SETTINGS_PATH_ENV: &str = "ESQUERY_SETTINGS_PATH";

/// Candidate settings file locations, most specific first
pub fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("esquery.yml"),
        PathBuf::from("config/esquery.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("esquery-rs/esquery.yml"));
    }
    paths
}

/// Load settings from the first file found, falling back to defaults.
///
/// Environment overrides are applied in every case.
pub fn load() -> Result<Settings> {
    let explicit = std::env::var(SETTINGS_PATH_ENV).ok().map(PathBuf::from);

    let found = explicit
        .into_iter()
        .chain(default_paths())
        .find(|p| p.exists());

    let mut settings = match found {
        Some(path) => load_from(&path)?,
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };
    settings.merge_env();
    Ok(settings)
}

fn load_from(path: &Path) -> Result<Settings> {
    info!("Loading settings from: {}", path.display());
    Settings::from_file(path)
}
