use crate::core::marker::{Marker, MarkerEnv};
use crate::core::specifier::SpecifierSet;
use crate::errors::{Error, Result};
use crate::extensions::string::NormalizeName;
use std::fmt;

pub trait BaseEntity {
    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
}

/// A syntactically valid package identifier plus its canonical form.
/// Raw spelling is kept for display; the normalized form drives all
/// duplicate grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageName {
    raw: String,
    normalized: String,
}

impl PackageName {
    pub fn try_from_str(input: &str) -> Result<Self> {
        let s = input.trim();
        if !Self::is_valid(s) {
            return Err(Error::Parse(format!(
                "Invalid package name: '{}'. Names start and end with a letter or digit \
                 and may contain '.', '-' and '_' in between.",
                s
            )));
        }
        Ok(Self {
            raw: s.to_string(),
            normalized: s.to_normalized_name(),
        })
    }

    fn is_valid(s: &str) -> bool {
        let bytes = s.as_bytes();
        if bytes.is_empty() {
            return false;
        }
        if !bytes[0].is_ascii_alphanumeric() || !bytes[bytes.len() - 1].is_ascii_alphanumeric() {
            return false;
        }
        bytes
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_'))
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// One parsed requirement line.
#[derive(Debug, Clone)]
pub struct Requirement {
    pub id: i32,
    pub name: PackageName,
    pub extras: Vec<String>,
    pub specifiers: SpecifierSet,
    pub marker: Option<Marker>,
    pub line: usize,
    pub raw: String,
}

impl Requirement {
    pub fn new(
        name: PackageName,
        extras: Vec<String>,
        specifiers: SpecifierSet,
        marker: Option<Marker>,
        line: usize,
        raw: impl Into<String>,
    ) -> Self {
        Self {
            id: 1,
            name,
            extras,
            specifiers,
            marker,
            line,
            raw: raw.into(),
        }
    }

    /// Whether this requirement is selected under `env`. Unmarked
    /// requirements apply everywhere.
    pub fn applies_on(&self, env: &MarkerEnv) -> bool {
        match &self.marker {
            Some(marker) => marker.evaluate(env),
            None => true,
        }
    }

    /// Platforms from `envs` on which this requirement is selected.
    pub fn active_platforms<'e>(&self, envs: &'e [(String, MarkerEnv)]) -> Vec<&'e str> {
        envs.iter()
            .filter(|(_, env)| self.applies_on(env))
            .map(|(platform, _)| platform.as_str())
            .collect()
    }

    /// Canonical single-line rendering: `name[extras]specifiers ; marker`.
    pub fn canonical(&self) -> String {
        let mut out = self.name.raw().to_string();
        if !self.extras.is_empty() {
            out.push('[');
            out.push_str(&self.extras.join(","));
            out.push(']');
        }
        if !self.specifiers.is_empty() {
            out.push_str(&self.specifiers.to_string());
        }
        if let Some(marker) = &self.marker {
            out.push_str(" ; ");
            out.push_str(&marker.to_string());
        }
        out
    }
}

impl BaseEntity for Requirement {
    fn id(&self) -> i32 {
        self.id
    }
    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Requirement(line={}, name='{}', constraint='{}', marker={})",
            self.line,
            self.name,
            self.specifiers,
            self.marker
                .as_ref()
                .map(|m| format!("'{m}'"))
                .unwrap_or_else(|| "-".to_string()),
        )
    }
}
