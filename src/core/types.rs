use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

/// `sys_platform` values reqlint knows how to derive a full marker
/// environment for.
pub static KNOWN_PLATFORMS: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["linux", "darwin", "win32", "cygwin"]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum GlobalCommand {
    #[strum(serialize = "config", to_string = "config")]
    Config,
    #[strum(serialize = "log", to_string = "log")]
    Log,
    #[strum(serialize = "man", to_string = "man")]
    Man,
}

impl GlobalCommand {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Unsupported global command: '{}'. Valid global commands: {}",
                s.trim(),
                valid_csv::<GlobalCommand>()
            ))
        })
    }
}

/// Commands that operate on a manifest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ManifestAction {
    #[strum(serialize = "check", to_string = "check")]
    Check,
    #[strum(serialize = "show", to_string = "show")]
    Show,
    #[strum(serialize = "export", to_string = "export")]
    Export,
}

impl ManifestAction {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Unsupported manifest command: '{}'. Valid manifest commands: {}",
                s.trim(),
                valid_csv::<ManifestAction>()
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum TypeHelpCommand {
    #[strum(serialize = "constraints", to_string = "constraints")]
    Constraints,
    #[strum(serialize = "markers", to_string = "markers")]
    Markers,
    #[strum(serialize = "platforms", to_string = "platforms")]
    Platforms,
}

impl TypeHelpCommand {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Unsupported type help command: '{}'. Valid type help commands: {}",
                s.trim(),
                valid_csv::<TypeHelpCommand>()
            ))
        })
    }

    pub fn usage(&self) -> String {
        match self {
            TypeHelpCommand::Constraints => Comparator::usage(),
            TypeHelpCommand::Markers => crate::core::marker::Marker::usage(),
            TypeHelpCommand::Platforms => format!(
                "Known sys_platform values: {}. TARGET_PLATFORMS selects which ones are validated.",
                KNOWN_PLATFORMS.join(", ")
            ),
        }
    }
}

/// Version comparison operators accepted in a specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
pub enum Comparator {
    #[strum(serialize = "==", to_string = "==")]
    Eq,
    #[strum(serialize = "!=", to_string = "!=")]
    Ne,
    #[strum(serialize = ">=", to_string = ">=")]
    Ge,
    #[strum(serialize = "<=", to_string = "<=")]
    Le,
    #[strum(serialize = ">", to_string = ">")]
    Gt,
    #[strum(serialize = "<", to_string = "<")]
    Lt,
    #[strum(serialize = "~=", to_string = "~=")]
    Compatible,
}

impl Comparator {
    pub fn usage() -> String {
        format!(
            "Supported comparators: {}. Versions are dotted releases like 1.2.3, \
             with optional epoch (1!2.0), pre-release (1.0rc1) and post-release \
             (1.0.post2) parts. '==' and '!=' also accept a trailing wildcard (1.4.*).",
            valid_csv::<Comparator>()
        )
    }

    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Invalid comparator: '{}'. Valid comparators: {}",
                s.trim(),
                valid_csv::<Comparator>()
            ))
        })
    }
}

/// Marker keys reqlint can evaluate per target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(serialize_all = "snake_case")]
pub enum MarkerKey {
    #[strum(serialize = "sys_platform", to_string = "sys_platform")]
    SysPlatform,
    #[strum(serialize = "os_name", to_string = "os_name")]
    OsName,
    #[strum(serialize = "platform_system", to_string = "platform_system")]
    PlatformSystem,
    #[strum(serialize = "python_version", to_string = "python_version")]
    PythonVersion,
}

impl MarkerKey {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Unsupported marker key: '{}'. Valid marker keys: {}",
                s.trim(),
                valid_csv::<MarkerKey>()
            ))
        })
    }

    /// Version-valued keys compare with version semantics and allow the
    /// ordered operators; everything else is plain string equality.
    pub fn is_version_valued(&self) -> bool {
        matches!(self, MarkerKey::PythonVersion)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
pub enum MarkerOp {
    #[strum(serialize = "==", to_string = "==")]
    Eq,
    #[strum(serialize = "!=", to_string = "!=")]
    Ne,
    #[strum(serialize = ">=", to_string = ">=")]
    Ge,
    #[strum(serialize = "<=", to_string = "<=")]
    Le,
    #[strum(serialize = ">", to_string = ">")]
    Gt,
    #[strum(serialize = "<", to_string = "<")]
    Lt,
}

impl MarkerOp {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Invalid marker operator: '{}'. Valid operators: {}",
                s.trim(),
                valid_csv::<MarkerOp>()
            ))
        })
    }

    pub fn is_ordered(&self) -> bool {
        !matches!(self, MarkerOp::Eq | MarkerOp::Ne)
    }
}

/// How serious a finding is. Errors fail `check`; warnings do not.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[strum(serialize = "warning", to_string = "warning")]
    Warning,
    #[strum(serialize = "error", to_string = "error")]
    Error,
}

impl Severity {
    pub const RESET: &'static str = crate::ui::ansi::STYLE_RESET;

    /// Foreground ANSI color for this severity.
    pub fn ansi_fg(self) -> &'static str {
        match self {
            Severity::Error => crate::csi!("31m"),
            Severity::Warning => crate::csi!("33m"),
        }
    }

    pub fn paint<S: AsRef<str>>(self, s: S) -> String {
        format!("{}{}{}", self.ansi_fg(), s.as_ref(), Self::RESET)
    }
}

/// Which validation rule produced a finding.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    #[strum(serialize = "syntax", to_string = "syntax")]
    Syntax,
    #[strum(serialize = "directive", to_string = "directive")]
    Directive,
    #[strum(serialize = "constraints", to_string = "constraints")]
    Constraints,
    #[strum(serialize = "duplicates", to_string = "duplicates")]
    Duplicates,
    #[strum(serialize = "platforms", to_string = "platforms")]
    Platforms,
}

/// Severity applied to byte-identical duplicate entries.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    #[strum(serialize = "error", to_string = "error")]
    Error,
    #[strum(serialize = "warn", to_string = "warn")]
    Warn,
}

impl DuplicatePolicy {
    pub fn help(&self) -> &'static str {
        match self {
            DuplicatePolicy::Error => "Identical duplicate entries fail the check.",
            DuplicatePolicy::Warn => "Identical duplicate entries only warn.",
        }
    }

    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Invalid duplicate policy: '{}'. Allowed policies: {}",
                s.trim(),
                valid_csv::<DuplicatePolicy>()
            ))
        })
    }

    pub fn severity(&self) -> Severity {
        match self {
            DuplicatePolicy::Error => Severity::Error,
            DuplicatePolicy::Warn => Severity::Warning,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive)]
pub enum BoolFormat {
    #[strum(serialize = "true", serialize = "True", to_string = "True")]
    TextTrue,

    #[strum(serialize = "false", serialize = "False", to_string = "False")]
    TextFalse,
}

impl BoolFormat {
    #[inline]
    fn to_bool(self) -> bool {
        matches!(self, BoolFormat::TextTrue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Bool {
    pub fn try_from_str(s: &str) -> Result<Self> {
        match BoolFormat::from_str(s) {
            Ok(fmt) => Ok(Bool(fmt.to_bool())),
            Err(_) => Err(Error::Parse(format!(
                "Invalid string value for boolean: '{}'. Valid values: {}",
                s,
                valid_csv::<BoolFormat>()
            ))),
        }
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.0 { "True" } else { "False" })
    }
}

impl Serialize for Bool {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bool {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Bool, <D as Deserializer<'de>>::Error> {
        let b = String::deserialize(deserializer)?;
        Bool::try_from_str(&b).map_err(serde::de::Error::custom)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Flag {
    #[strum(serialize = "-h", serialize = "-help", serialize = "--help", to_string = "-h")]
    Help,
}
