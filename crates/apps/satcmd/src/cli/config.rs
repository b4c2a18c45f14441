use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use satcmd_core::constants::DEFAULT_REFERENCE_MILLIVOLTS;

pub const CONFIG_ROOT_ENV: &str = "SATCMD_CONFIG_ROOT";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Full-scale voltage for Set Scale thresholds.
    #[serde(default = "default_reference_millivolts")]
    pub reference_millivolts: u32,
    /// Emit JSON unless `--json` is already given.
    #[serde(default)]
    pub json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reference_millivolts: DEFAULT_REFERENCE_MILLIVOLTS,
            json: false,
        }
    }
}

fn default_reference_millivolts() -> u32 {
    DEFAULT_REFERENCE_MILLIVOLTS
}

pub fn config_root() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ROOT_ENV) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    let base = dirs::config_dir().ok_or_else(|| anyhow!("failed to resolve config directory"))?;
    Ok(base.join("satcmd"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_root()?.join(CONFIG_FILE))
}

/// Load settings from `path`. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        log::debug!("config: {} not found, using defaults", path.display());
        return Ok(Settings::default());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings {}", path.display()))?;
    let settings: Settings = toml::from_str(&contents)
        .with_context(|| format!("invalid settings in {}", path.display()))?;
    validate(&settings).with_context(|| format!("invalid settings in {}", path.display()))?;
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    validate(settings)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let encoded = toml::to_string_pretty(settings).context("failed to encode config.toml")?;
    fs::write(path, encoded).with_context(|| format!("failed to write {}", path.display()))
}

fn validate(settings: &Settings) -> Result<()> {
    if settings.reference_millivolts == 0 {
        bail!("reference_millivolts must be greater than zero");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let settings = load_settings(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_then_load() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join(CONFIG_FILE);
        let settings = Settings {
            reference_millivolts: 5000,
            json: true,
        };
        save_settings(&path, &settings).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "json = true\n").unwrap();
        let settings = load_settings(&path).unwrap();
        assert!(settings.json);
        assert_eq!(settings.reference_millivolts, DEFAULT_REFERENCE_MILLIVOLTS);
    }

    #[test]
    fn zero_reference_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "reference_millivolts = 0\n").unwrap();
        let err = load_settings(&path).unwrap_err();
        assert!(format!("{err:#}").contains("greater than zero"));
    }
}
