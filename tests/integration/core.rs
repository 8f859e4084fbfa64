use anyhow::Result;

use crate::common::{make_temp_dir, write_manifest};
use reqlint::core::context::AppContext;
use reqlint::core::repository::Sort;
use reqlint::core::types::{RuleKind, Severity};
use reqlint::manifest::ManifestLoader;
use reqlint::validate::Validator;
use reqlint::validate::findings::Report;

#[test]
fn library_load_and_validate_round_trip() -> Result<()> {
    let dir = make_temp_dir("reqlint-core-roundtrip");
    let manifest = write_manifest(
        &dir,
        "requirements.txt",
        concat!(
            "streamlit>=1.28.0\n",
            "pandas>=2.0.0\n",
            "openai>=1.0.0\n",
            "python-magic>=0.4.27; sys_platform != \"win32\"\n",
            "python-magic-bin>=0.4.14; sys_platform == \"win32\"\n",
        ),
    );

    let mut ctx = AppContext::new_with_paths(dir.join("reqlint.json"), dir.join("logs"))?;
    ctx.config
        .set("ALTERNATE_PROVIDERS", "python-magic|python-magic-bin")?;

    let outcome = ManifestLoader::new().load_into(&mut ctx.requirements, &manifest)?;
    assert_eq!(outcome.loaded, 5);
    assert!(outcome.findings.is_empty());

    let report = Validator::new(&ctx).run();
    assert!(report.is_clean(), "findings: {:?}", report.findings);

    let names: Vec<&str> = ctx
        .requirements
        .values(Sort::IdAsc)
        .into_iter()
        .map(|r| r.name.raw())
        .collect();
    assert_eq!(names[0], "streamlit");
    assert_eq!(names.len(), 5);
    Ok(())
}

#[test]
fn library_reports_mixed_findings_in_line_order() -> Result<()> {
    let dir = make_temp_dir("reqlint-core-mixed");
    let manifest = write_manifest(
        &dir,
        "requirements.txt",
        concat!(
            "openai>=\n",
            "numpy>=1.24\n",
            "numpy>=1.24\n",
            "requests>=2.0,<1.0\n",
        ),
    );

    let mut ctx = AppContext::new_with_paths(dir.join("reqlint.json"), dir.join("logs"))?;
    let outcome = ManifestLoader::new().load_into(&mut ctx.requirements, &manifest)?;

    let mut report = Report::new(outcome.findings);
    report.extend(Validator::new(&ctx).run().findings);

    assert_eq!(report.errors(), 2, "syntax + unsatisfiable constraints");
    assert_eq!(report.warnings(), 1, "identical duplicate");

    let lines: Vec<Option<usize>> = report.findings.iter().map(|f| f.line).collect();
    let mut sorted = lines.clone();
    sorted.sort_by_key(|l| l.unwrap_or(usize::MAX));
    assert_eq!(lines, sorted, "findings must be ordered by line");

    let syntax = &report.findings[0];
    assert_eq!(syntax.rule, RuleKind::Syntax);
    assert_eq!(syntax.severity, Severity::Error);
    assert_eq!(syntax.line, Some(1));
    Ok(())
}

#[test]
fn loader_keeps_previous_state_intact_per_run() -> Result<()> {
    let dir = make_temp_dir("reqlint-core-reload");
    let first = write_manifest(&dir, "a.txt", "numpy>=1.0\nscipy>=1.0\n");
    let second = write_manifest(&dir, "b.txt", "pandas>=2.0\n");

    let mut ctx = AppContext::new_with_paths(dir.join("reqlint.json"), dir.join("logs"))?;
    let loader = ManifestLoader::new();

    loader.load_into(&mut ctx.requirements, &first)?;
    assert_eq!(ctx.requirements.len(), 2);

    loader.load_into(&mut ctx.requirements, &second)?;
    assert_eq!(ctx.requirements.len(), 1, "each load replaces the last");
    Ok(())
}
