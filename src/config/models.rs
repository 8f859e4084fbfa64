use crate::core::types::{Bool, DuplicatePolicy, KNOWN_PLATFORMS};
use crate::core::version::Version;
use crate::errors::Error;
use crate::extensions::string::NormalizeName;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Interpreter version assumed when none is configured.
pub static DEFAULT_PYTHON: Lazy<Version> =
    Lazy::new(|| Version::try_from_str("3.11").expect("default python version parses"));

pub trait ConfigItem<T> {
    fn get_value(&self) -> &T;
    fn set_value(&mut self, new_value: &str) -> Result<(), Error>;
    fn description(&self) -> &str;
}

/// Declared `sys_platform` universe used by the platform rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetPlatformsConfigItem {
    pub value: Vec<String>,
    pub description: String,
}

impl Default for TargetPlatformsConfigItem {
    fn default() -> Self {
        Self {
            value: vec!["linux".into(), "darwin".into(), "win32".into()],
            description: "sys_platform values the manifest must cover.".into(),
        }
    }
}

impl TargetPlatformsConfigItem {
    fn parse(new_value: &str) -> Result<Vec<String>, Error> {
        let platforms: Vec<String> = new_value
            .split(',')
            .map(|p| p.trim().to_ascii_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        if platforms.is_empty() {
            return Err(Error::Parse(format!(
                "Expected at least one platform. Known platforms: {}",
                KNOWN_PLATFORMS.join(", ")
            )));
        }
        for platform in &platforms {
            if !platform
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
            {
                return Err(Error::Parse(format!(
                    "Invalid platform name: '{}'. Known platforms: {}",
                    platform,
                    KNOWN_PLATFORMS.join(", ")
                )));
            }
        }
        Ok(platforms)
    }
}

impl ConfigItem<Vec<String>> for TargetPlatformsConfigItem {
    fn get_value(&self) -> &Vec<String> {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        Ok(self.value = Self::parse(new_value)?)
    }
    fn description(&self) -> &str {
        &self.description
    }
}

/// Interpreter version used to evaluate `python_version` markers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PythonVersionConfigItem {
    pub value: Version,
    pub description: String,
}

impl Default for PythonVersionConfigItem {
    fn default() -> Self {
        Self {
            value: DEFAULT_PYTHON.clone(),
            description: "Interpreter version for python_version markers.".into(),
        }
    }
}

impl ConfigItem<Version> for PythonVersionConfigItem {
    fn get_value(&self) -> &Version {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        Ok(self.value = Version::try_from_str(new_value)?)
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicatePolicyConfigItem {
    pub value: DuplicatePolicy,
    pub description: String,
}

impl Default for DuplicatePolicyConfigItem {
    fn default() -> Self {
        Self {
            value: DuplicatePolicy::Warn,
            description: "Severity for identical duplicate entries.".into(),
        }
    }
}

impl ConfigItem<DuplicatePolicy> for DuplicatePolicyConfigItem {
    fn get_value(&self) -> &DuplicatePolicy {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        Ok(self.value = DuplicatePolicy::try_from(new_value)?)
    }
    fn description(&self) -> &str {
        &self.description
    }
}

/// Groups of package names that provide the same dependency on different
/// platforms, e.g. `python-magic|python-magic-bin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternateProvidersConfigItem {
    pub value: Vec<Vec<String>>,
    pub description: String,
}

impl Default for AlternateProvidersConfigItem {
    fn default() -> Self {
        Self {
            value: Vec::new(),
            description: "Platform-alternate package groups, 'a|b; c|d'.".into(),
        }
    }
}

impl AlternateProvidersConfigItem {
    fn parse(new_value: &str) -> Result<Vec<Vec<String>>, Error> {
        let mut groups = Vec::new();
        for group_text in new_value.split(';') {
            let group_text = group_text.trim();
            if group_text.is_empty() {
                continue;
            }
            let members: Vec<String> = group_text
                .split('|')
                .map(|name| name.to_normalized_name())
                .filter(|name| !name.is_empty())
                .collect();
            if members.len() < 2 {
                return Err(Error::Parse(format!(
                    "Alternate group '{}' needs at least two '|'-separated package names.",
                    group_text
                )));
            }
            groups.push(members);
        }
        Ok(groups)
    }

    pub fn display_value(value: &[Vec<String>]) -> String {
        if value.is_empty() {
            return "-".to_string();
        }
        value
            .iter()
            .map(|group| group.join("|"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl ConfigItem<Vec<Vec<String>>> for AlternateProvidersConfigItem {
    fn get_value(&self) -> &Vec<Vec<String>> {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        if new_value.trim().is_empty() {
            self.value = Vec::new();
            return Ok(());
        }
        Ok(self.value = Self::parse(new_value)?)
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLoggingConfigItem {
    pub value: Bool,
    pub description: String,
}

impl Default for FileLoggingConfigItem {
    fn default() -> Self {
        Self {
            value: Bool(true),
            description: "Enable writing log messages to file.".into(),
        }
    }
}

impl ConfigItem<Bool> for FileLoggingConfigItem {
    fn get_value(&self) -> &Bool {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        Ok(self.value = Bool::try_from_str(new_value)?)
    }
    fn description(&self) -> &str {
        &self.description
    }
}
