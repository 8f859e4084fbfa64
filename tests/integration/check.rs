use crate::common::{combined_output, make_temp_dir, normalized_lines, run, write_manifest};

#[test]
fn check_accepts_a_clean_manifest() {
    let dir = make_temp_dir("reqlint-check-clean");
    write_manifest(
        &dir,
        "requirements.txt",
        "streamlit>=1.28.0\npandas>=2.0.0\nopenai>=1.0.0\n",
    );

    let output = run(&dir, &["check", "requirements.txt"]);
    assert!(output.status.success(), "stderr: {}", combined_output(&output));

    let stdout = normalized_lines(&output.stdout).join("\n");
    assert!(stdout.contains("No findings."));
}

#[test]
fn check_rejects_a_malformed_constraint() {
    let dir = make_temp_dir("reqlint-check-syntax");
    write_manifest(&dir, "requirements.txt", "openai>=\n");

    let output = run(&dir, &["check", "requirements.txt"]);
    assert_eq!(output.status.code(), Some(1));

    let all = combined_output(&output);
    assert!(all.contains("Missing version after '>='"), "output: {all}");
    assert!(all.contains("Validation failed"), "output: {all}");
}

#[test]
fn check_reports_every_bad_line_with_numbers() {
    let dir = make_temp_dir("reqlint-check-lines");
    write_manifest(
        &dir,
        "requirements.txt",
        "numpy>=1.24\nopenai>=\nbad name\n",
    );

    let output = run(&dir, &["check", "requirements.txt"]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = normalized_lines(&output.stdout).join("\n");
    assert!(stdout.contains("2"), "line number of first bad line: {stdout}");
    assert!(stdout.contains("3"), "line number of second bad line: {stdout}");
    assert!(stdout.contains("2 error(s)"), "summary: {stdout}");
}

#[test]
fn check_flags_conflicting_duplicates() {
    let dir = make_temp_dir("reqlint-check-dup");
    write_manifest(&dir, "requirements.txt", "openai==1.2.0\nopenai>=2.0\n");

    let output = run(&dir, &["check", "requirements.txt"]);
    assert_eq!(output.status.code(), Some(1));
    let all = combined_output(&output);
    assert!(all.contains("conflicts with line 1"), "output: {all}");
}

#[test]
fn check_passes_with_warnings_only() {
    let dir = make_temp_dir("reqlint-check-warn");
    // Identical duplicate: a warning under the default policy.
    write_manifest(&dir, "requirements.txt", "numpy>=1.24\nnumpy>=1.24\n");

    let output = run(&dir, &["check", "requirements.txt"]);
    assert!(output.status.success(), "output: {}", combined_output(&output));
    let stdout = normalized_lines(&output.stdout).join("\n");
    assert!(stdout.contains("1 warning(s)"), "summary: {stdout}");
}

#[test]
fn check_validates_platform_alternates_from_config() {
    let dir = make_temp_dir("reqlint-check-alt");
    write_manifest(
        &dir,
        "requirements.txt",
        concat!(
            "python-magic>=0.4.27; sys_platform != \"win32\"\n",
            "python-magic-bin>=0.4.14; sys_platform == \"win32\"\n",
        ),
    );

    let set = run(
        &dir,
        &["config", "ALTERNATE_PROVIDERS", "python-magic|python-magic-bin"],
    );
    assert!(set.status.success(), "output: {}", combined_output(&set));

    let output = run(&dir, &["check", "requirements.txt"]);
    assert!(output.status.success(), "output: {}", combined_output(&output));
    let stdout = normalized_lines(&output.stdout).join("\n");
    assert!(stdout.contains("No findings."), "output: {stdout}");
}

#[test]
fn check_errors_when_an_alternate_group_is_incomplete() {
    let dir = make_temp_dir("reqlint-check-alt-gap");
    write_manifest(
        &dir,
        "requirements.txt",
        "python-magic>=0.4.27; sys_platform != \"win32\"\n",
    );

    let set = run(
        &dir,
        &["config", "ALTERNATE_PROVIDERS", "python-magic|python-magic-bin"],
    );
    assert!(set.status.success());

    let output = run(&dir, &["check", "requirements.txt"]);
    assert_eq!(output.status.code(), Some(1));
    let all = combined_output(&output);
    assert!(all.contains("no provider applies on win32"), "output: {all}");
}

#[test]
fn check_warns_about_option_directives() {
    let dir = make_temp_dir("reqlint-check-directive");
    write_manifest(&dir, "requirements.txt", "-r base.txt\nnumpy>=1.24\n");

    let output = run(&dir, &["check", "requirements.txt"]);
    assert!(output.status.success(), "directives are warnings");
    let stdout = normalized_lines(&output.stdout).join("\n");
    assert!(stdout.contains("Option directive"), "output: {stdout}");
}

#[test]
fn missing_command_exits_with_usage_error() {
    let dir = make_temp_dir("reqlint-no-command");
    let output = run(&dir, &[]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = normalized_lines(&output.stderr).join("\n");
    assert!(stderr.contains("Missing command"), "stderr: {stderr}");
}

#[test]
fn unknown_command_exits_with_usage_error() {
    let dir = make_temp_dir("reqlint-bad-command");
    let output = run(&dir, &["frobnicate"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = normalized_lines(&output.stderr).join("\n");
    assert!(stderr.contains("Unknown command"), "stderr: {stderr}");
}

#[test]
fn help_flag_prints_usage_and_succeeds() {
    let dir = make_temp_dir("reqlint-help");
    let output = run(&dir, &["check", "-h"]);
    assert!(output.status.success());
    let stdout = normalized_lines(&output.stdout).join("\n");
    assert!(stdout.contains("check <manifest>"), "stdout: {stdout}");
}

#[test]
fn man_prints_the_general_page() {
    let dir = make_temp_dir("reqlint-man");
    let output = run(&dir, &["man"]);
    assert!(output.status.success());
    let stdout = normalized_lines(&output.stdout).join("\n");
    assert!(stdout.contains("reqlint - Requirements-manifest linter."));
    assert!(stdout.contains("COMMANDS"));
}

#[test]
fn show_lists_requirements_for_a_platform() {
    let dir = make_temp_dir("reqlint-show");
    write_manifest(
        &dir,
        "requirements.txt",
        concat!(
            "pandas>=2.0\n",
            "pywin32>=306; sys_platform == \"win32\"\n",
        ),
    );

    let output = run(&dir, &["show", "requirements.txt", "linux"]);
    assert!(output.status.success(), "output: {}", combined_output(&output));
    let stdout = normalized_lines(&output.stdout).join("\n");
    assert!(stdout.contains("pandas"), "stdout: {stdout}");
    assert!(!stdout.contains("pywin32"), "win32-only entry filtered: {stdout}");
}
