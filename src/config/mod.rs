//! Configuration management for the JIRA user client CLI.
//!
//! Connection profiles and settings live in a TOML file in the platform
//! config directory. API tokens never touch the file; they are kept in the
//! OS keyring.

mod profile;
mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use profile::Profile;
pub use settings::Settings;

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    /// The configuration directory could not be created.
    #[error("could not create the configuration directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    /// The configuration file could not be read.
    #[error("could not read the configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The configuration file could not be written.
    #[error("could not write the configuration file: {0}")]
    WriteError(#[source] std::io::Error),

    /// The configuration file is not valid TOML.
    #[error("could not parse the configuration file: {0}")]
    ParseError(#[source] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("could not serialize the configuration: {0}")]
    SerializeError(#[source] toml::ser::Error),

    /// The configuration contents are invalid.
    #[error("{0}")]
    ValidationError(String),

    /// The requested profile does not exist.
    #[error("profile '{0}' not found")]
    ProfileNotFound(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The on-disk configuration: settings plus connection profiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Application-wide settings.
    #[serde(default)]
    pub settings: Settings,
    /// The configured JIRA connection profiles.
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl Config {
    /// The default configuration file path:
    /// `{config_dir}/jira-users/config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("jira-users").join("config.toml"))
    }

    /// Load the configuration from the default path.
    ///
    /// A missing file yields the default (empty) configuration.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate the configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::ParseError)?;
        config.validate()?;

        debug!(path = %path.display(), profiles = config.profiles.len(), "Loaded configuration");
        Ok(config)
    }

    /// Save the configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Validate and save the configuration to a specific path, creating
    /// parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }

        let contents = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;
        fs::write(path, contents).map_err(ConfigError::WriteError)?;

        debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Validate every profile, name uniqueness and the default reference.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for profile in &self.profiles {
            profile.validate()?;
            if !seen.insert(profile.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate profile name '{}'",
                    profile.name
                )));
            }
        }

        if let Some(default) = &self.settings.default_profile {
            if !self.profiles.iter().any(|p| &p.name == default) {
                return Err(ConfigError::ValidationError(format!(
                    "default profile '{}' does not exist",
                    default
                )));
            }
        }

        Ok(())
    }

    /// Resolve a profile: by explicit name, then the configured default,
    /// then the sole profile if only one exists.
    pub fn profile(&self, name: Option<&str>) -> Result<&Profile> {
        if let Some(name) = name {
            return self
                .profiles
                .iter()
                .find(|p| p.name == name)
                .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()));
        }

        if let Some(default) = &self.settings.default_profile {
            return self
                .profiles
                .iter()
                .find(|p| &p.name == default)
                .ok_or_else(|| ConfigError::ProfileNotFound(default.clone()));
        }

        match self.profiles.as_slice() {
            [only] => Ok(only),
            [] => Err(ConfigError::ValidationError(
                "no profiles configured; run 'jira-users profile add' first".to_string(),
            )),
            _ => Err(ConfigError::ValidationError(
                "multiple profiles configured; pass --profile or set a default".to_string(),
            )),
        }
    }

    /// Add a profile. The first profile added becomes the default.
    pub fn add_profile(&mut self, profile: Profile) -> Result<()> {
        profile.validate()?;

        if self.profiles.iter().any(|p| p.name == profile.name) {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}' already exists",
                profile.name
            )));
        }

        if self.profiles.is_empty() {
            self.settings.default_profile = Some(profile.name.clone());
        }
        self.profiles.push(profile);
        Ok(())
    }

    /// Remove a profile by name, clearing the default if it pointed there.
    pub fn remove_profile(&mut self, name: &str) -> Result<Profile> {
        let index = self
            .profiles
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))?;

        let removed = self.profiles.remove(index);
        if self.settings.default_profile.as_deref() == Some(name) {
            self.settings.default_profile = None;
        }
        Ok(removed)
    }
}
