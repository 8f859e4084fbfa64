pub mod models;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::config::models::{
    AlternateProvidersConfigItem, ConfigItem, DuplicatePolicyConfigItem, FileLoggingConfigItem,
    PythonVersionConfigItem, TargetPlatformsConfigItem,
};
use crate::core::types::DuplicatePolicy;
use crate::core::version::Version;
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterDerive, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigKey {
    TargetPlatforms,
    PythonVersion,
    DuplicatePolicy,
    AlternateProviders,
    FileLoggingEnabled,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub target_platforms: TargetPlatformsConfigItem,
    #[serde(default)]
    pub python_version: PythonVersionConfigItem,
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicyConfigItem,
    #[serde(default)]
    pub alternate_providers: AlternateProvidersConfigItem,
    #[serde(default)]
    pub file_logging_enabled: FileLoggingConfigItem,
}

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: ConfigFile,
    pub last_change: Option<(String, String, String)>,
}

#[derive(Debug, Clone)]
pub struct ConfigRows(Vec<(String, String, String)>);

impl ConfigRows {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &(String, String, String)> {
        self.0.iter()
    }
}

impl Config {
    /// Load the config file, or fall back to defaults when it does not
    /// exist. The file is only written once a value is set.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Ok(Self {
                path,
                data: ConfigFile::default(),
                last_change: None,
            });
        }
        Self::load_from(path)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file '{}' not found.",
                path.display()
            )));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let data: ConfigFile = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("Invalid JSON in '{}': {}", path.display(), e)))?;
        Ok(Self {
            path,
            data,
            last_change: None,
        })
    }

    pub fn view(&self) -> &ConfigFile {
        &self.data
    }

    pub fn target_platforms(&self) -> &[String] {
        self.data.target_platforms.get_value()
    }
    pub fn python_version(&self) -> &Version {
        self.data.python_version.get_value()
    }
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        *self.data.duplicate_policy.get_value()
    }
    pub fn alternate_providers(&self) -> &[Vec<String>] {
        self.data.alternate_providers.get_value()
    }
    pub fn file_logging_enabled(&self) -> bool {
        self.data.file_logging_enabled.get_value().0
    }

    fn value_of(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::TargetPlatforms => self.data.target_platforms.get_value().join(", "),
            ConfigKey::PythonVersion => self.data.python_version.get_value().to_string(),
            ConfigKey::DuplicatePolicy => self.data.duplicate_policy.get_value().to_string(),
            ConfigKey::AlternateProviders => AlternateProvidersConfigItem::display_value(
                self.data.alternate_providers.get_value(),
            ),
            ConfigKey::FileLoggingEnabled => self.data.file_logging_enabled.get_value().to_string(),
        }
    }

    fn description_of(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::TargetPlatforms => self.data.target_platforms.description(),
            ConfigKey::PythonVersion => self.data.python_version.description(),
            ConfigKey::DuplicatePolicy => self.data.duplicate_policy.description(),
            ConfigKey::AlternateProviders => self.data.alternate_providers.description(),
            ConfigKey::FileLoggingEnabled => self.data.file_logging_enabled.description(),
        }
    }

    pub fn rows(&self) -> ConfigRows {
        let rows = ConfigKey::iter()
            .map(|key| {
                (
                    key.to_string(),
                    self.description_of(key).to_string(),
                    self.value_of(key),
                )
            })
            .collect();
        ConfigRows(rows)
    }

    pub fn set_key(&mut self, key: ConfigKey, new_value: &str) -> Result<()> {
        let old = self.value_of(key);
        let res = self.edit(|cfg| match key {
            ConfigKey::TargetPlatforms => cfg.target_platforms.set_value(new_value),
            ConfigKey::PythonVersion => cfg.python_version.set_value(new_value),
            ConfigKey::DuplicatePolicy => cfg.duplicate_policy.set_value(new_value),
            ConfigKey::AlternateProviders => cfg.alternate_providers.set_value(new_value),
            ConfigKey::FileLoggingEnabled => cfg.file_logging_enabled.set_value(new_value),
        });

        if res.is_ok() {
            // Stash for the caller to log.
            self.last_change = Some((key.to_string(), old, self.value_of(key)));
        }

        res
    }

    pub fn take_last_change(&mut self) -> Option<(String, String, String)> {
        self.last_change.take()
    }

    pub fn set(&mut self, key_str: &str, new_value: &str) -> Result<()> {
        use std::str::FromStr;
        let key = ConfigKey::from_str(key_str).map_err(|_| {
            Error::Parse(format!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key_str,
                valid_csv::<ConfigKey>()
            ))
        })?;
        self.set_key(key, new_value)
    }

    fn edit<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ConfigFile) -> Result<()>,
    {
        f(&mut self.data)?;
        self.save()
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| Error::Config(format!("Failed to encode config: {}", e)))?;
        fs::write(&self.path, json)
            .map_err(|e| Error::Config(format!("Failed to write {}: {}", self.path.display(), e)))
    }
}
