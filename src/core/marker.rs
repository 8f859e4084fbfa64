use crate::core::types::{MarkerKey, MarkerOp};
use crate::core::version::Version;
use crate::errors::{Error, Result};
use std::fmt;

/// A single `key op "value"` comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerClause {
    pub key: MarkerKey,
    pub op: MarkerOp,
    pub value: String,
}

impl MarkerClause {
    fn try_from_str(input: &str) -> Result<Self> {
        let s = input.trim();
        let key_text: String = s
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        if key_text.is_empty() {
            return Err(Error::Parse(Self::error_message(input)));
        }
        let key = MarkerKey::try_from(&key_text)?;

        let rest = s[key_text.len()..].trim_start();
        let op_text: String = rest.chars().take_while(|c| matches!(c, '=' | '!' | '<' | '>')).collect();
        if op_text.is_empty() {
            return Err(Error::Parse(Self::error_message(input)));
        }
        let op = MarkerOp::try_from(&op_text)?;

        if op.is_ordered() && !key.is_version_valued() {
            return Err(Error::Parse(format!(
                "Operator '{}' is not supported for '{}'; only == and != compare strings.",
                op, key
            )));
        }

        let value = Self::take_quoted(rest[op_text.len()..].trim_start(), input)?;

        if key.is_version_valued() {
            // Fail early on values that can never compare.
            Version::try_from_str(&value)?;
        }

        Ok(MarkerClause { key, op, value })
    }

    fn take_quoted(s: &str, input: &str) -> Result<String> {
        let mut chars = s.chars();
        let quote = match chars.next() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(Error::Parse(Self::error_message(input))),
        };
        let mut value = String::new();
        while let Some(c) = chars.next() {
            if c == quote {
                // Nothing may trail the closing quote inside a clause.
                let rest: String = chars.collect();
                if !rest.trim().is_empty() {
                    return Err(Error::Parse(Self::error_message(input)));
                }
                return Ok(value);
            }
            value.push(c);
        }
        Err(Error::Parse(format!(
            "Unterminated quoted value in marker clause '{}'.",
            input.trim()
        )))
    }

    fn error_message(input: &str) -> String {
        format!(
            "Invalid marker clause: '{}'. Expected <key> <op> '<value>', e.g. sys_platform == \"win32\".",
            input.trim()
        )
    }

    fn evaluate(&self, env: &MarkerEnv) -> bool {
        let actual = env.value_for(self.key);
        if self.key.is_version_valued() {
            // Both sides were validated at parse/construction time; an
            // unparseable side falls back to never-matching.
            let (Ok(lhs), Ok(rhs)) = (
                Version::try_from_str(actual),
                Version::try_from_str(&self.value),
            ) else {
                return false;
            };
            match self.op {
                MarkerOp::Eq => lhs == rhs,
                MarkerOp::Ne => lhs != rhs,
                MarkerOp::Ge => lhs >= rhs,
                MarkerOp::Le => lhs <= rhs,
                MarkerOp::Gt => lhs > rhs,
                MarkerOp::Lt => lhs < rhs,
            }
        } else {
            match self.op {
                MarkerOp::Eq => actual == self.value,
                MarkerOp::Ne => actual != self.value,
                // Rejected at parse time.
                _ => false,
            }
        }
    }
}

impl fmt::Display for MarkerClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} \"{}\"", self.key, self.op, self.value)
    }
}

/// An environment-marker expression in disjunctive normal form: clauses
/// joined by `and` within a group, groups joined by `or`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub groups: Vec<Vec<MarkerClause>>,
}

impl Marker {
    pub fn usage() -> String {
        "Markers follow '; <key> <op> \"<value>\"', joined with 'and'/'or'. \
         Keys: sys_platform, os_name, platform_system, python_version. \
         String keys accept == and !=; python_version also accepts <, <=, >, >=."
            .to_string()
    }

    pub fn try_from_str(input: &str) -> Result<Self> {
        let s = input.trim();
        if s.is_empty() {
            return Err(Error::Parse(
                "Empty environment marker after ';'.".to_string(),
            ));
        }

        let mut groups = Vec::new();
        for group_text in split_keyword(s, "or") {
            let mut clauses = Vec::new();
            for clause_text in split_keyword(&group_text, "and") {
                clauses.push(MarkerClause::try_from_str(&clause_text)?);
            }
            groups.push(clauses);
        }
        Ok(Marker { groups })
    }

    /// True when any `and`-group holds under `env`.
    pub fn evaluate(&self, env: &MarkerEnv) -> bool {
        self.groups
            .iter()
            .any(|group| group.iter().all(|clause| clause.evaluate(env)))
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .groups
            .iter()
            .map(|group| {
                group
                    .iter()
                    .map(|clause| clause.to_string())
                    .collect::<Vec<_>>()
                    .join(" and ")
            })
            .collect::<Vec<_>>()
            .join(" or ");
        write!(f, "{rendered}")
    }
}

/// Split on a lowercase keyword appearing outside quoted strings.
fn split_keyword(s: &str, keyword: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut tokens_pending = s.chars().peekable();

    // Work word-wise: quotes guard values like "linux or later".
    while let Some(c) = tokens_pending.next() {
        match quote {
            Some(q) => {
                current.push(c);
                if c == q {
                    quote = None;
                }
            }
            None => {
                if c == '\'' || c == '"' {
                    quote = Some(c);
                    current.push(c);
                } else if c.is_whitespace() {
                    // Peek the next word without consuming the stream.
                    let tail: String = tokens_pending.clone().collect();
                    let word: String = tail
                        .trim_start()
                        .chars()
                        .take_while(|c| c.is_ascii_alphabetic())
                        .collect();
                    let is_boundary = word == keyword
                        && tail
                            .trim_start()
                            .chars()
                            .nth(word.len())
                            .is_none_or(|next| next.is_whitespace());
                    if is_boundary {
                        // Consume whitespace + keyword, close the part.
                        let mut consumed = 0;
                        while tokens_pending
                            .peek()
                            .is_some_and(|c| c.is_whitespace())
                        {
                            tokens_pending.next();
                        }
                        while consumed < keyword.len() {
                            tokens_pending.next();
                            consumed += 1;
                        }
                        parts.push(current.trim().to_string());
                        current = String::new();
                    } else {
                        current.push(c);
                    }
                } else {
                    current.push(c);
                }
            }
        }
    }
    parts.push(current.trim().to_string());
    parts
}

/// Concrete marker values for one target platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerEnv {
    pub sys_platform: String,
    pub os_name: String,
    pub platform_system: String,
    pub python_version: String,
}

impl MarkerEnv {
    /// Derive the full environment from a `sys_platform` value and the
    /// configured interpreter version.
    pub fn for_platform(platform: &str, python_version: &Version) -> Self {
        let os_name = match platform {
            "win32" => "nt",
            _ => "posix",
        }
        .to_string();
        let platform_system = match platform {
            "linux" => "Linux".to_string(),
            "darwin" => "Darwin".to_string(),
            "win32" | "cygwin" => "Windows".to_string(),
            other => {
                let mut chars = other.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            }
        };
        Self {
            sys_platform: platform.to_string(),
            os_name,
            platform_system,
            python_version: python_version.to_string(),
        }
    }

    pub fn value_for(&self, key: MarkerKey) -> &str {
        match key {
            MarkerKey::SysPlatform => &self.sys_platform,
            MarkerKey::OsName => &self.os_name,
            MarkerKey::PlatformSystem => &self.platform_system,
            MarkerKey::PythonVersion => &self.python_version,
        }
    }
}
