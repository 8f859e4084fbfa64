use crate::core::types::Comparator;
use crate::core::version::Version;
use crate::errors::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One comparator applied to one version, e.g. `>=1.0.0` or `==1.4.*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    pub op: Comparator,
    pub version: Version,
    pub wildcard: bool,
}

impl Specifier {
    pub fn try_from_str(input: &str) -> Result<Self> {
        let s = input.trim();
        let op = Self::take_comparator(s)?;
        let tail = s[op.as_ref().len()..].trim();
        if tail.is_empty() {
            return Err(Error::Parse(format!(
                "Missing version after '{}' in '{}'. {}",
                op,
                s,
                Version::usage()
            )));
        }

        let (version_text, wildcard) = match tail.strip_suffix(".*") {
            Some(head) => (head, true),
            None => (tail, false),
        };

        if wildcard && !matches!(op, Comparator::Eq | Comparator::Ne) {
            return Err(Error::Parse(format!(
                "Wildcard versions are only valid with '==' or '!=', got '{}'.",
                s
            )));
        }

        let version = Version::try_from_str(version_text)?;

        if wildcard && (version.pre.is_some() || version.post.is_some()) {
            return Err(Error::Parse(format!(
                "Wildcard must follow a plain release, got '{}'.",
                s
            )));
        }
        if matches!(op, Comparator::Compatible) && version.release.len() < 2 {
            return Err(Error::Parse(format!(
                "'~=' needs at least two release segments, got '{}'.",
                s
            )));
        }

        Ok(Specifier {
            op,
            version,
            wildcard,
        })
    }

    fn take_comparator(s: &str) -> Result<Comparator> {
        for two in ["==", "!=", ">=", "<=", "~="] {
            if s.starts_with(two) {
                return Comparator::try_from(two);
            }
        }
        for one in [">", "<"] {
            if s.starts_with(one) {
                return Comparator::try_from(one);
            }
        }
        Err(Error::Parse(format!(
            "Expected a comparator at the start of '{}'. {}",
            s,
            Comparator::usage()
        )))
    }

    /// Whether `candidate` satisfies this specifier.
    pub fn matches(&self, candidate: &Version) -> bool {
        match self.op {
            Comparator::Eq if self.wildcard => self.version.is_prefix_of(candidate),
            Comparator::Ne if self.wildcard => !self.version.is_prefix_of(candidate),
            Comparator::Eq => candidate == &self.version,
            Comparator::Ne => candidate != &self.version,
            Comparator::Ge => candidate >= &self.version,
            Comparator::Le => candidate <= &self.version,
            Comparator::Gt => candidate > &self.version,
            Comparator::Lt => candidate < &self.version,
            Comparator::Compatible => {
                candidate >= &self.version
                    && candidate < &self.version.compatible_upper_bound()
            }
        }
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.version)?;
        if self.wildcard {
            write!(f, ".*")?;
        }
        Ok(())
    }
}

/// Comma-separated conjunction of specifiers. An empty set allows anything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecifierSet {
    pub specifiers: Vec<Specifier>,
}

impl SpecifierSet {
    pub fn new(specifiers: Vec<Specifier>) -> Self {
        Self { specifiers }
    }

    pub fn try_from_str(input: &str) -> Result<Self> {
        let s = input.trim();
        if s.is_empty() {
            return Ok(Self::default());
        }
        let specifiers = s
            .split(',')
            .map(|part| Specifier::try_from_str(part))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { specifiers })
    }

    pub fn is_empty(&self) -> bool {
        self.specifiers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.specifiers.len()
    }

    pub fn allows(&self, candidate: &Version) -> bool {
        self.specifiers.iter().all(|spec| spec.matches(candidate))
    }
}

impl fmt::Display for SpecifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .specifiers
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{joined}")
    }
}

impl Serialize for SpecifierSet {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SpecifierSet {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<SpecifierSet, <D as Deserializer<'de>>::Error> {
        let s = String::deserialize(deserializer)?;
        SpecifierSet::try_from_str(&s).map_err(serde::de::Error::custom)
    }
}
