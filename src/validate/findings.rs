use crate::core::types::{RuleKind, Severity};
use serde::Serialize;
use std::fmt;

/// One validation result: what went wrong, where, and how badly.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub rule: RuleKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    pub message: String,
}

impl Finding {
    pub fn new(
        severity: Severity,
        rule: RuleKind,
        line: Option<usize>,
        package: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            rule,
            line,
            package,
            message: message.into(),
        }
    }

    pub fn error(
        rule: RuleKind,
        line: Option<usize>,
        package: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Error, rule, line, package, message)
    }

    pub fn warning(
        rule: RuleKind,
        line: Option<usize>,
        package: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, rule, line, package, message)
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self
            .line
            .map(|n| format!("line {n}"))
            .unwrap_or_else(|| "manifest".to_string());
        match &self.package {
            Some(package) => write!(
                f,
                "{} [{}] {}: {}",
                line, self.severity, package, self.message
            ),
            None => write!(f, "{} [{}] {}", line, self.severity, self.message),
        }
    }
}

/// The ordered outcome of a validation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub findings: Vec<Finding>,
}

impl Report {
    pub fn new(mut findings: Vec<Finding>) -> Self {
        // Stable order: by line (manifest-level findings last), then by
        // severity with errors first.
        findings.sort_by(|a, b| {
            let line_a = a.line.unwrap_or(usize::MAX);
            let line_b = b.line.unwrap_or(usize::MAX);
            line_a
                .cmp(&line_b)
                .then_with(|| b.severity.cmp(&a.severity))
        });
        Self { findings }
    }

    pub fn extend(&mut self, more: Vec<Finding>) {
        self.findings.extend(more);
        let sorted = std::mem::take(&mut self.findings);
        *self = Self::new(sorted);
    }

    pub fn errors(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count()
    }

    pub fn warnings(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.errors() > 0
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.is_clean() {
            "No findings.".to_string()
        } else {
            format!(
                "{} finding(s): {} error(s), {} warning(s).",
                self.findings.len(),
                self.errors(),
                self.warnings()
            )
        }
    }
}
