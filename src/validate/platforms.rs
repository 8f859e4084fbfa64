use crate::core::models::Requirement;
use crate::core::types::RuleKind;
use crate::validate::duplicates::group_by_name;
use crate::validate::findings::Finding;
use crate::validate::{RuleContext, ValidationRule};

/// Checks marker coverage against the declared target platforms:
/// dead markers, per-package gaps, and alternate-provider groups that
/// must select exactly one member everywhere.
pub struct PlatformRule;

impl ValidationRule for PlatformRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Platforms
    }

    fn evaluate(&self, requirements: &[&Requirement], cx: &RuleContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        findings.extend(dead_marker_findings(requirements, cx));
        findings.extend(gap_findings(requirements, cx));
        findings.extend(group_findings(requirements, cx));

        findings
    }
}

/// A marker that matches none of the declared platforms makes its entry
/// unreachable.
fn dead_marker_findings(requirements: &[&Requirement], cx: &RuleContext) -> Vec<Finding> {
    requirements
        .iter()
        .filter(|req| req.marker.is_some())
        .filter(|req| !cx.envs.iter().any(|(_, env)| req.applies_on(env)))
        .map(|req| {
            Finding::warning(
                RuleKind::Platforms,
                Some(req.line),
                Some(req.name.normalized().to_string()),
                format!(
                    "marker never matches any target platform ({})",
                    cx.platform_names().join(", ")
                ),
            )
        })
        .collect()
}

/// A package whose entries are all marker-gated should still be selected
/// somewhere on every declared platform, unless an alternate group
/// covers the hole.
fn gap_findings(requirements: &[&Requirement], cx: &RuleContext) -> Vec<Finding> {
    let groups = group_by_name(requirements);
    let mut findings = Vec::new();

    for (name, entries) in &groups {
        if entries.iter().any(|req| req.marker.is_none()) {
            continue;
        }
        let uncovered: Vec<&str> = cx
            .envs
            .iter()
            .filter(|(_, env)| !entries.iter().any(|req| req.applies_on(env)))
            .map(|(platform, _)| platform.as_str())
            .collect();
        if uncovered.is_empty() {
            continue;
        }
        // An alternate sibling supplying those platforms closes the gap.
        if let Some(group) = cx.group_of(name) {
            let all_covered = uncovered.iter().all(|platform| {
                let env = cx
                    .envs
                    .iter()
                    .find(|(p, _)| p == platform)
                    .map(|(_, env)| env);
                match env {
                    Some(env) => group.iter().filter(|member| *member != name).any(|member| {
                        groups
                            .get(member.as_str())
                            .is_some_and(|siblings| {
                                siblings.iter().any(|req| req.applies_on(env))
                            })
                    }),
                    None => false,
                }
            });
            if all_covered {
                continue;
            }
        }
        let first_line = entries.iter().map(|req| req.line).min();
        findings.push(Finding::warning(
            RuleKind::Platforms,
            first_line,
            Some(name.clone()),
            format!("never selected on {}", uncovered.join(", ")),
        ));
    }

    findings
}

/// Every configured alternate-provider group must resolve to exactly one
/// member on each declared platform.
fn group_findings(requirements: &[&Requirement], cx: &RuleContext) -> Vec<Finding> {
    let groups = group_by_name(requirements);
    let mut findings = Vec::new();

    for group in cx.alternate_groups {
        // Groups naming packages absent from the manifest are skipped;
        // config may be shared across several manifests.
        let present: Vec<&String> = group
            .iter()
            .filter(|member| groups.contains_key(member.as_str()))
            .collect();
        if present.is_empty() {
            continue;
        }
        let label = group.join("|");
        let anchor_line = present
            .iter()
            .filter_map(|member| groups.get(member.as_str()))
            .flat_map(|entries| entries.iter().map(|req| req.line))
            .min();

        for (platform, env) in cx.envs {
            let selected: Vec<&str> = present
                .iter()
                .filter(|member| {
                    groups
                        .get(member.as_str())
                        .is_some_and(|entries| entries.iter().any(|req| req.applies_on(env)))
                })
                .map(|member| member.as_str())
                .collect();

            match selected.len() {
                1 => {}
                0 => findings.push(Finding::error(
                    RuleKind::Platforms,
                    anchor_line,
                    Some(label.clone()),
                    format!("no provider applies on {}", platform),
                )),
                _ => findings.push(Finding::error(
                    RuleKind::Platforms,
                    anchor_line,
                    Some(label.clone()),
                    format!(
                        "multiple providers apply on {}: {}",
                        platform,
                        selected.join(", ")
                    ),
                )),
            }
        }
    }

    findings
}
