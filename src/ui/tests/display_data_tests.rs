use crate::core::marker::MarkerEnv;
use crate::core::types::RuleKind;
use crate::core::version::Version;
use crate::manifest::line_parser::RequirementParser;
use crate::ui::display_data::DisplayDataBuilder;
use crate::ui::width_util::WidthUtil;
use crate::validate::findings::{Finding, Report};

fn envs() -> Vec<(String, MarkerEnv)> {
    let python = Version::try_from_str("3.11").expect("python version parses");
    ["linux", "darwin", "win32"]
        .iter()
        .map(|p| (p.to_string(), MarkerEnv::for_platform(p, &python)))
        .collect()
}

fn req(line_text: &str, number: usize) -> crate::core::models::Requirement {
    RequirementParser::new()
        .parse(line_text, number)
        .expect("fixture should parse")
}

#[test]
fn finding_rows_paint_by_severity() {
    let report = Report::new(vec![
        Finding::error(RuleKind::Syntax, Some(3), None, "bad line"),
        Finding::warning(RuleKind::Duplicates, Some(7), Some("numpy".into()), "dup"),
    ]);
    let rows = DisplayDataBuilder::new().finding_rows(&report, 80);
    let util = WidthUtil::default();

    assert_eq!(rows.len(), 2);
    assert_eq!(WidthUtil::strip_ansi_for_test(&rows[0][0]), "3");
    assert_eq!(WidthUtil::strip_ansi_for_test(&rows[0][1]), "error");
    assert_eq!(WidthUtil::strip_ansi_for_test(&rows[1][3]), "numpy");
    // Painted cells still measure by their visible width.
    assert_eq!(util.visible_width(&rows[0][1]), 5);
    assert!(rows[0][1].contains('\x1B'));
}

#[test]
fn finding_rows_truncate_long_messages() {
    let long = "m".repeat(200);
    let report = Report::new(vec![Finding::error(RuleKind::Syntax, Some(1), None, long)]);
    let rows = DisplayDataBuilder::new().finding_rows(&report, 40);
    let message = WidthUtil::strip_ansi_for_test(&rows[0][4]);
    assert_eq!(message.chars().count(), 40);
    assert!(message.ends_with("..."));
}

#[test]
fn requirement_rows_summarize_platform_coverage() {
    let envs = envs();
    let reqs = [
        req("pandas>=2.0", 1),
        req(r#"pywin32>=306 ; sys_platform == "win32""#, 2),
        req(r#"ghost>=1.0 ; sys_platform == "freebsd""#, 3),
    ];
    let refs: Vec<_> = reqs.iter().collect();
    let rows = DisplayDataBuilder::new().rows_for(&refs, &envs);

    assert_eq!(rows[0][5], "all");
    assert_eq!(rows[1][5], "win32");
    assert_eq!(rows[2][5], "none");
}

#[test]
fn requirement_rows_render_placeholders() {
    let envs = envs();
    let reqs = [req("streamlit", 4)];
    let refs: Vec<_> = reqs.iter().collect();
    let rows = DisplayDataBuilder::new().rows_for(&refs, &envs);

    assert_eq!(rows[0][0], "4");
    assert_eq!(rows[0][1], "streamlit");
    assert_eq!(rows[0][2], "-", "no extras");
    assert_eq!(rows[0][3], "*", "unconstrained");
    assert_eq!(rows[0][4], "-", "no marker");
}
