use std::fs;

use anyhow::Result;
use serde_json::Value;

use crate::common::{combined_output, make_temp_dir, run, write_manifest};

#[test]
fn export_writes_a_json_report() -> Result<()> {
    let dir = make_temp_dir("reqlint-export");
    write_manifest(
        &dir,
        "requirements.txt",
        concat!(
            "openai>=1.0.0\n",
            "openai>=\n",
            "pywin32>=306; sys_platform == \"win32\"\n",
        ),
    );

    let output = run(&dir, &["export", "requirements.txt", "out/report.json"]);
    assert!(output.status.success(), "output: {}", combined_output(&output));

    let text = fs::read_to_string(dir.join("out/report.json"))?;
    let report: Value = serde_json::from_str(&text)?;

    assert_eq!(report["manifest"], "requirements.txt");
    assert_eq!(report["summary"]["requirements"], 2);
    assert_eq!(report["summary"]["errors"], 1);
    assert!(report["generated_at"].as_str().is_some());

    let requirements = report["requirements"].as_array().expect("array");
    assert_eq!(requirements.len(), 2);
    assert_eq!(requirements[0]["name"], "openai");
    assert_eq!(requirements[0]["constraint"], ">=1.0.0");
    assert_eq!(requirements[0]["platforms"].as_array().map(|a| a.len()), Some(3));

    let marked = &requirements[1];
    assert_eq!(marked["name"], "pywin32");
    assert_eq!(marked["marker"], "sys_platform == \"win32\"");
    assert_eq!(marked["platforms"].as_array().map(|a| a.len()), Some(1));

    let findings = report["findings"].as_array().expect("array");
    assert_eq!(findings.len(), 2, "syntax error + coverage warning");
    let syntax = findings
        .iter()
        .find(|f| f["rule"] == "syntax")
        .expect("syntax finding");
    assert_eq!(syntax["severity"], "error");
    assert_eq!(syntax["line"], 2);
    Ok(())
}

#[test]
fn export_requires_an_output_path() {
    let dir = make_temp_dir("reqlint-export-missing");
    write_manifest(&dir, "requirements.txt", "numpy>=1.0\n");

    let output = run(&dir, &["export", "requirements.txt"]);
    assert_eq!(output.status.code(), Some(1));
    let all = combined_output(&output);
    assert!(all.contains("Expected an output path"), "output: {all}");
}

#[test]
fn export_succeeds_even_with_findings() -> Result<()> {
    let dir = make_temp_dir("reqlint-export-findings");
    write_manifest(&dir, "requirements.txt", "openai==1.0,==2.0\n");

    let output = run(&dir, &["export", "requirements.txt", "report.json"]);
    assert!(
        output.status.success(),
        "export reports, it does not gate: {}",
        combined_output(&output)
    );

    let text = fs::read_to_string(dir.join("report.json"))?;
    let report: Value = serde_json::from_str(&text)?;
    assert_eq!(report["summary"]["errors"], 1);
    let finding = &report["findings"].as_array().expect("array")[0];
    assert_eq!(finding["rule"], "constraints");
    assert!(
        finding["message"]
            .as_str()
            .expect("message")
            .contains("pin different versions")
    );
    Ok(())
}
