use std::collections::BTreeMap;

use crate::core::models::Requirement;
use crate::core::types::RuleKind;
use crate::validate::conflicts::{Satisfiability, analyze};
use crate::validate::findings::Finding;
use crate::validate::{RuleContext, ValidationRule};

/// Checks every package that appears on more than one line: entries that
/// can be selected together on some target platform must agree.
pub struct DuplicateRule;

impl ValidationRule for DuplicateRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Duplicates
    }

    fn evaluate(&self, requirements: &[&Requirement], cx: &RuleContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (name, entries) in group_by_name(requirements) {
            if entries.len() < 2 {
                continue;
            }
            for (i, a) in entries.iter().enumerate() {
                for b in entries.iter().skip(i + 1) {
                    findings.extend(check_pair(&name, a, b, cx));
                }
            }
        }

        findings
    }
}

/// Group requirements by normalized name, preserving line order within
/// each group. BTreeMap keeps finding order deterministic across runs.
pub fn group_by_name<'r>(
    requirements: &[&'r Requirement],
) -> BTreeMap<String, Vec<&'r Requirement>> {
    let mut groups: BTreeMap<String, Vec<&Requirement>> = BTreeMap::new();
    for req in requirements {
        groups
            .entry(req.name.normalized().to_string())
            .or_default()
            .push(*req);
    }
    for entries in groups.values_mut() {
        entries.sort_by_key(|r| r.line);
    }
    groups
}

fn check_pair(
    name: &str,
    a: &Requirement,
    b: &Requirement,
    cx: &RuleContext,
) -> Vec<Finding> {
    // Platforms where both entries would be selected.
    let overlap: Vec<&str> = cx
        .envs
        .iter()
        .filter(|(_, env)| a.applies_on(env) && b.applies_on(env))
        .map(|(platform, _)| platform.as_str())
        .collect();
    if overlap.is_empty() {
        return Vec::new();
    }

    if a.specifiers == b.specifiers {
        return vec![Finding::new(
            cx.duplicate_policy.severity(),
            RuleKind::Duplicates,
            Some(b.line),
            Some(name.to_string()),
            format!("duplicate of line {} ('{}')", a.line, a.raw),
        )];
    }

    let combined = a
        .specifiers
        .specifiers
        .iter()
        .chain(b.specifiers.specifiers.iter());
    match analyze(combined) {
        Satisfiability::Conflict(detail) => vec![Finding::error(
            RuleKind::Duplicates,
            Some(b.line),
            Some(name.to_string()),
            format!(
                "conflicts with line {} on {}: {}",
                a.line,
                join_platforms(&overlap),
                detail
            ),
        )],
        Satisfiability::Satisfiable => vec![Finding::warning(
            RuleKind::Duplicates,
            Some(b.line),
            Some(name.to_string()),
            format!(
                "also constrained on line {}; both entries apply on {}",
                a.line,
                join_platforms(&overlap)
            ),
        )],
    }
}

pub fn join_platforms(platforms: &[&str]) -> String {
    platforms.join(", ")
}
