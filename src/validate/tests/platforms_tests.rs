use crate::core::types::{RuleKind, Severity};
use crate::validate::platforms::PlatformRule;
use crate::validate::ValidationRule;

use super::{context, default_envs, req};

fn group(members: &[&str]) -> Vec<Vec<String>> {
    vec![members.iter().map(|m| m.to_string()).collect()]
}

#[test]
fn unconditional_entries_are_silent() {
    let envs = default_envs();
    let reqs = [req("numpy>=1.0", 1)];
    let refs: Vec<_> = reqs.iter().collect();
    let findings = PlatformRule.evaluate(&refs, &context(&envs, &[]));
    assert!(findings.is_empty());
}

#[test]
fn dead_marker_warns() {
    let envs = default_envs();
    let reqs = [req(r#"exotic>=1.0 ; sys_platform == "freebsd""#, 2)];
    let refs: Vec<_> = reqs.iter().collect();
    let findings = PlatformRule.evaluate(&refs, &context(&envs, &[]));

    let dead = findings
        .iter()
        .find(|f| f.message.contains("never matches"))
        .expect("dead marker finding expected");
    assert_eq!(dead.severity, Severity::Warning);
    assert_eq!(dead.rule, RuleKind::Platforms);
    assert_eq!(dead.line, Some(2));
}

#[test]
fn marker_gated_package_with_gap_warns() {
    let envs = default_envs();
    let reqs = [req(r#"python-magic>=0.4.27 ; sys_platform != "win32""#, 1)];
    let refs: Vec<_> = reqs.iter().collect();
    let findings = PlatformRule.evaluate(&refs, &context(&envs, &[]));

    let gap = findings
        .iter()
        .find(|f| f.message.contains("never selected"))
        .expect("gap finding expected");
    assert_eq!(gap.severity, Severity::Warning);
    assert!(gap.message.contains("win32"));
}

#[test]
fn alternate_group_closes_the_gap() {
    let envs = default_envs();
    let groups = group(&["python-magic", "python-magic-bin"]);
    let reqs = [
        req(r#"python-magic>=0.4.27 ; sys_platform != "win32""#, 1),
        req(r#"python-magic-bin>=0.4.14 ; sys_platform == "win32""#, 2),
    ];
    let refs: Vec<_> = reqs.iter().collect();
    let findings = PlatformRule.evaluate(&refs, &context(&envs, &groups));
    assert!(
        findings.is_empty(),
        "a complete alternate pair is valid: {findings:?}"
    );
}

#[test]
fn alternate_group_missing_provider_errors() {
    let envs = default_envs();
    let groups = group(&["python-magic", "python-magic-bin"]);
    let reqs = [req(r#"python-magic>=0.4.27 ; sys_platform != "win32""#, 1)];
    let refs: Vec<_> = reqs.iter().collect();
    let findings = PlatformRule.evaluate(&refs, &context(&envs, &groups));

    let missing = findings
        .iter()
        .find(|f| f.message.contains("no provider"))
        .expect("missing provider finding expected");
    assert_eq!(missing.severity, Severity::Error);
    assert!(missing.message.contains("win32"));
    assert_eq!(missing.package.as_deref(), Some("python-magic|python-magic-bin"));
}

#[test]
fn alternate_group_ambiguous_provider_errors() {
    let envs = default_envs();
    let groups = group(&["python-magic", "python-magic-bin"]);
    let reqs = [
        req("python-magic>=0.4.27", 1),
        req(r#"python-magic-bin>=0.4.14 ; sys_platform == "win32""#, 2),
    ];
    let refs: Vec<_> = reqs.iter().collect();
    let findings = PlatformRule.evaluate(&refs, &context(&envs, &groups));

    let ambiguous = findings
        .iter()
        .find(|f| f.message.contains("multiple providers"))
        .expect("ambiguous provider finding expected");
    assert_eq!(ambiguous.severity, Severity::Error);
    assert!(ambiguous.message.contains("win32"));
}

#[test]
fn groups_absent_from_manifest_are_skipped() {
    let envs = default_envs();
    let groups = group(&["uvloop", "winloop"]);
    let reqs = [req("numpy>=1.0", 1)];
    let refs: Vec<_> = reqs.iter().collect();
    let findings = PlatformRule.evaluate(&refs, &context(&envs, &groups));
    assert!(findings.is_empty());
}

#[test]
fn python_version_marker_counts_as_gate() {
    let envs = default_envs();
    let reqs = [req(r#"tomli>=2.0 ; python_version < "3.11""#, 1)];
    let refs: Vec<_> = reqs.iter().collect();
    let findings = PlatformRule.evaluate(&refs, &context(&envs, &[]));

    // With python 3.11 configured the marker matches nowhere: one dead
    // marker warning and one coverage warning.
    assert_eq!(findings.len(), 2);
    assert!(findings.iter().all(|f| f.severity == Severity::Warning));
}
