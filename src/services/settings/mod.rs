//! Loading [`Settings`] files. Writing them is left to the host.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::models::settings::Settings;

const SETTINGS_FILE: &str = "settings.toml";

/// `settings.toml` under the platform config directory, if one can be resolved.
pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "MonthGrid", "MonthGridCore")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}

/// Read settings from `path`.
///
/// A missing file yields the defaults. Files ending in `.json` are parsed as
/// JSON, everything else as TOML.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        log::debug!("no settings at {}, using defaults", path.display());
        return Ok(Settings::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings from {}", path.display()))?;
    let settings: Settings = if is_json(path) {
        serde_json::from_str(&data)
            .with_context(|| format!("failed to parse settings from {}", path.display()))?
    } else {
        toml::from_str(&data)
            .with_context(|| format!("failed to parse settings from {}", path.display()))?
    };
    settings
        .validate()
        .with_context(|| format!("invalid settings in {}", path.display()))?;
    Ok(settings)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
