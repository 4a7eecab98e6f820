//! Configuration file management
//!
//! Profiles live in `profiles.toml` as an array of `[[profiles]]` tables,
//! settings in `settings.toml`. Missing files read as empty defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::settings::AppSettings;
use crate::error::{ConfigError, ConfigResult};
use crate::models::TelnetProfile;
use crate::tracing::span_names;

/// Directory name below the platform configuration directory
pub const CONFIG_DIR_NAME: &str = "telnet-tab";

const PROFILES_FILE: &str = "profiles.toml";
const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProfileFile {
    #[serde(default)]
    profiles: Vec<TelnetProfile>,
}

/// Loads and saves profiles and settings
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Uses the platform configuration directory (`~/.config/telnet-tab` on Linux)
    ///
    /// # Errors
    /// Returns `ConfigError::NoConfigDir` if the platform has none
    pub fn new() -> ConfigResult<Self> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::with_config_dir(base.join(CONFIG_DIR_NAME)))
    }

    /// Uses an explicit directory
    #[must_use]
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Configuration directory
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path of the profiles file
    #[must_use]
    pub fn profiles_path(&self) -> PathBuf {
        self.config_dir.join(PROFILES_FILE)
    }

    /// Path of the settings file
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Loads settings, falling back to defaults if the file does not exist
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn load_settings(&self) -> ConfigResult<AppSettings> {
        Ok(load_toml::<AppSettings>(&self.settings_path())?.unwrap_or_default())
    }

    /// Writes settings
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails
    pub fn save_settings(&self, settings: &AppSettings) -> ConfigResult<()> {
        save_toml(&self.settings_path(), settings)
    }

    /// Loads all profiles; an absent file means no profiles
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn load_profiles(&self) -> ConfigResult<Vec<TelnetProfile>> {
        Ok(load_toml::<ProfileFile>(&self.profiles_path())?
            .unwrap_or_default()
            .profiles)
    }

    /// Replaces all profiles
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails
    pub fn save_profiles(&self, profiles: &[TelnetProfile]) -> ConfigResult<()> {
        let file = ProfileFile {
            profiles: profiles.to_vec(),
        };
        save_toml(&self.profiles_path(), &file)
    }

    /// Adds a profile or replaces the one with the same id
    ///
    /// # Errors
    /// Returns an error if loading or saving fails
    pub fn upsert_profile(&self, profile: TelnetProfile) -> ConfigResult<()> {
        let mut profiles = self.load_profiles()?;
        match profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile,
            None => profiles.push(profile),
        }
        self.save_profiles(&profiles)
    }

    /// Finds a profile by id or by case-insensitive name
    ///
    /// # Errors
    /// Returns `ConfigError::ProfileNotFound` if nothing matches
    pub fn find_profile(&self, query: &str) -> ConfigResult<TelnetProfile> {
        let profiles = self.load_profiles()?;
        find_in(&profiles, query)
            .cloned()
            .ok_or_else(|| ConfigError::ProfileNotFound(query.to_string()))
    }
}

/// Looks a profile up by id first, then by case-insensitive name
#[must_use]
pub fn find_in<'a>(profiles: &'a [TelnetProfile], query: &str) -> Option<&'a TelnetProfile> {
    profiles
        .iter()
        .find(|p| p.id.to_string() == query)
        .or_else(|| profiles.iter().find(|p| p.name.eq_ignore_ascii_case(query)))
}

fn load_toml<T: DeserializeOwned>(path: &Path) -> ConfigResult<Option<T>> {
    let _span = tracing::debug_span!(span_names::CONFIG_LOAD, path = %path.display()).entered();
    if !path.exists() {
        tracing::debug!("Configuration file absent, using defaults");
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

fn save_toml<T: Serialize>(path: &Path, value: &T) -> ConfigResult<()> {
    let _span = tracing::debug_span!(span_names::CONFIG_SAVE, path = %path.display()).entered();
    let content =
        toml::to_string_pretty(value).map_err(|e| ConfigError::Serialize(e.to_string()))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Configuration saved");
    Ok(())
}
