use crate::core::marker::Marker;
use crate::core::models::{PackageName, Requirement};
use crate::core::specifier::{Specifier, SpecifierSet};
use crate::errors::{Error, Result};

/// Character cursor over one logical requirement line.
#[derive(Debug, Clone)]
pub struct Cursor {
    chars: Vec<char>,
    i: usize,
}

impl Cursor {
    pub fn new(raw: &str) -> Self {
        Self {
            chars: raw.chars().collect(),
            i: 0,
        }
    }

    pub fn eof(&self) -> bool {
        self.i >= self.chars.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.i).copied()
    }

    pub fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.i += 1;
        Some(c)
    }

    pub fn skip_spaces(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.i += 1;
        }
    }

    /// Consume characters while `pred` holds.
    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            out.push(c);
            self.i += 1;
        }
        out
    }

    /// Everything left on the line.
    pub fn rest(&mut self) -> String {
        let out: String = self.chars[self.i..].iter().collect();
        self.i = self.chars.len();
        out
    }
}

/// Parses one logical line into a `Requirement`:
/// `name[extras]<specifiers> ; <marker>`.
pub struct RequirementParser;

impl RequirementParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, raw: &str, line: usize) -> Result<Requirement> {
        let mut cur = Cursor::new(raw.trim());

        let name = self.parse_name(&mut cur, raw)?;
        cur.skip_spaces();

        let extras = if cur.peek() == Some('[') {
            self.parse_extras(&mut cur, raw)?
        } else {
            Vec::new()
        };
        cur.skip_spaces();

        let specifiers = self.parse_specifiers(&mut cur)?;
        cur.skip_spaces();

        let marker = match cur.peek() {
            Some(';') => {
                cur.next();
                Some(Marker::try_from_str(&cur.rest())?)
            }
            Some(other) => {
                return Err(Error::Parse(format!(
                    "Unexpected '{}' in requirement '{}'. Expected a version constraint or '; <marker>'.",
                    other,
                    raw.trim()
                )));
            }
            None => None,
        };

        Ok(Requirement::new(
            name,
            extras,
            specifiers,
            marker,
            line,
            raw.trim(),
        ))
    }

    fn parse_name(&self, cur: &mut Cursor, raw: &str) -> Result<PackageName> {
        cur.skip_spaces();
        let text = cur.take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
        if text.is_empty() {
            return Err(Error::Parse(format!(
                "Missing package name in '{}'.",
                raw.trim()
            )));
        }
        PackageName::try_from_str(&text)
    }

    fn parse_extras(&self, cur: &mut Cursor, raw: &str) -> Result<Vec<String>> {
        cur.next(); // consume '['
        let mut extras = Vec::new();
        loop {
            cur.skip_spaces();
            let extra =
                cur.take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
            if extra.is_empty() {
                return Err(Error::Parse(format!(
                    "Empty extra name in '{}'.",
                    raw.trim()
                )));
            }
            extras.push(extra);
            cur.skip_spaces();
            match cur.next() {
                Some(',') => continue,
                Some(']') => break,
                _ => {
                    return Err(Error::Parse(format!(
                        "Unterminated extras list in '{}'. Expected ']' after extras.",
                        raw.trim()
                    )));
                }
            }
        }
        Ok(extras)
    }

    fn parse_specifiers(&self, cur: &mut Cursor) -> Result<SpecifierSet> {
        let mut specifiers = Vec::new();
        loop {
            cur.skip_spaces();
            match cur.peek() {
                Some(c) if matches!(c, '=' | '!' | '<' | '>' | '~') => {
                    let text = cur.take_while(|c| c != ',' && c != ';');
                    specifiers.push(Specifier::try_from_str(&text)?);
                    if cur.peek() == Some(',') {
                        cur.next();
                        continue;
                    }
                    break;
                }
                _ => break,
            }
        }
        Ok(SpecifierSet::new(specifiers))
    }
}
