pub mod line_parser;

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::models::Requirement;
use crate::core::repository::Repository;
use crate::core::types::{RuleKind, Severity};
use crate::errors::{Error, Result};
use crate::manifest::line_parser::RequirementParser;
use crate::validate::findings::Finding;

/// Result of loading one manifest file: how many requirements landed in
/// the repository, plus syntax/directive findings for everything else.
#[derive(Debug)]
pub struct LoadOutcome {
    pub path: PathBuf,
    pub loaded: usize,
    pub findings: Vec<Finding>,
}

/// One logical line after comment stripping and continuation merging.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogicalLine {
    number: usize,
    text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Requirement,
    Directive,
}

/// Reads a manifest and stages every parsed requirement into `repo`.
/// Parse failures never abort the load; each one becomes an error finding
/// so a single run reports every malformed line. The commit itself is
/// atomic: either all parsed requirements land or none do.
pub struct ManifestLoader {
    parser: RequirementParser,
}

impl ManifestLoader {
    pub fn new() -> Self {
        Self {
            parser: RequirementParser::new(),
        }
    }

    pub fn load_into(
        &self,
        repo: &mut Repository<Requirement>,
        path: &Path,
    ) -> Result<LoadOutcome> {
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Domain(format!("Cannot read manifest '{}': {}", path.display(), e))
        })?;

        let mut findings = Vec::new();
        let mut loaded = 0usize;

        repo.begin_stage(true)?;
        for line in logical_lines(&contents) {
            match classify(&line.text) {
                LineKind::Directive => {
                    findings.push(Finding::new(
                        Severity::Warning,
                        RuleKind::Directive,
                        Some(line.number),
                        None,
                        format!(
                            "Option directive '{}' addresses the installer and is not validated.",
                            first_word(&line.text)
                        ),
                    ));
                }
                LineKind::Requirement => match self.parser.parse(&line.text, line.number) {
                    Ok(req) => {
                        repo.insert(req);
                        loaded += 1;
                    }
                    Err(err) => {
                        findings.push(Finding::new(
                            Severity::Error,
                            RuleKind::Syntax,
                            Some(line.number),
                            None,
                            err.to_string(),
                        ));
                    }
                },
            }
        }

        match repo.prepare_commit() {
            Ok(prepared) => repo.apply_prepared(prepared),
            Err(err) => {
                repo.discard_stage();
                return Err(err);
            }
        }

        Ok(LoadOutcome {
            path: path.to_path_buf(),
            loaded,
            findings,
        })
    }
}

fn classify(text: &str) -> LineKind {
    if text.starts_with('-') {
        LineKind::Directive
    } else {
        LineKind::Requirement
    }
}

fn first_word(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or(text)
}

/// Merge backslash continuations, strip comments, drop blank lines. The
/// logical line keeps the number of its first physical line.
fn logical_lines(contents: &str) -> Vec<LogicalLine> {
    let mut out = Vec::new();
    let mut pending: Option<LogicalLine> = None;

    for (idx, physical) in contents.lines().enumerate() {
        let number = idx + 1;
        let (text, continued) = match physical.strip_suffix('\\') {
            Some(head) => (head, true),
            None => (physical, false),
        };

        let merged = match pending.take() {
            Some(mut prev) => {
                prev.text.push(' ');
                prev.text.push_str(text.trim());
                prev
            }
            None => LogicalLine {
                number,
                text: text.trim().to_string(),
            },
        };

        if continued {
            pending = Some(merged);
            continue;
        }

        let stripped = strip_comment(&merged.text);
        let trimmed = stripped.trim();
        if trimmed.is_empty() {
            continue;
        }
        out.push(LogicalLine {
            number: merged.number,
            text: trimmed.to_string(),
        });
    }

    // A trailing backslash on the last line still yields a logical line.
    if let Some(last) = pending.take() {
        let stripped = strip_comment(&last.text);
        let trimmed = stripped.trim();
        if !trimmed.is_empty() {
            out.push(LogicalLine {
                number: last.number,
                text: trimmed.to_string(),
            });
        }
    }

    out
}

/// Remove a `#` comment, ignoring `#` inside quoted marker values.
fn strip_comment(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    for c in text.chars() {
        match quote {
            Some(q) => {
                out.push(c);
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    out.push(c);
                }
                '#' => break,
                _ => out.push(c),
            },
        }
    }
    out
}
