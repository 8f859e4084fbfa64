use std::fs;

use crate::common::{combined_output, make_temp_dir, normalized_lines, run};

#[test]
fn config_prints_defaults_without_a_file() {
    let dir = make_temp_dir("reqlint-config-defaults");
    let output = run(&dir, &["config"]);
    assert!(output.status.success(), "output: {}", combined_output(&output));

    let stdout = normalized_lines(&output.stdout).join("\n");
    assert!(stdout.contains("TARGET_PLATFORMS"));
    assert!(stdout.contains("linux, darwin, win32"));
    assert!(stdout.contains("PYTHON_VERSION"));
    assert!(stdout.contains("3.11"));
    assert!(!dir.join("reqlint.json").exists(), "viewing must not write");
}

#[test]
fn config_set_persists_and_is_visible() {
    let dir = make_temp_dir("reqlint-config-set");
    let set = run(&dir, &["config", "TARGET_PLATFORMS", "linux, win32"]);
    assert!(set.status.success(), "output: {}", combined_output(&set));
    let stdout = normalized_lines(&set.stdout).join("\n");
    assert!(
        stdout.contains("Updated TARGET_PLATFORMS"),
        "stdout: {stdout}"
    );

    assert!(dir.join("reqlint.json").exists());
    let text = fs::read_to_string(dir.join("reqlint.json")).expect("config should read");
    assert!(text.contains("win32"));

    let view = run(&dir, &["config"]);
    let stdout = normalized_lines(&view.stdout).join("\n");
    assert!(stdout.contains("linux, win32"), "stdout: {stdout}");
}

#[test]
fn config_rejects_bad_values_with_nonzero_exit() {
    let dir = make_temp_dir("reqlint-config-bad");
    let output = run(&dir, &["config", "PYTHON_VERSION", "not-a-version"]);
    assert_eq!(output.status.code(), Some(1));
    let all = combined_output(&output);
    assert!(all.contains("Invalid version"), "output: {all}");
}

#[test]
fn config_rejects_unknown_keys() {
    let dir = make_temp_dir("reqlint-config-unknown");
    let output = run(&dir, &["config", "NO_SUCH_KEY", "x"]);
    assert_eq!(output.status.code(), Some(1));
    let all = combined_output(&output);
    assert!(all.contains("Expected a configuration key"), "output: {all}");
}

#[test]
fn custom_config_path_flag_is_honored() {
    let dir = make_temp_dir("reqlint-config-flag");
    let set = run(
        &dir,
        &["--config", "custom.json", "config", "DUPLICATE_POLICY", "error"],
    );
    assert!(set.status.success(), "output: {}", combined_output(&set));
    assert!(dir.join("custom.json").exists());
    assert!(!dir.join("reqlint.json").exists());
}

#[test]
fn python_version_config_changes_marker_evaluation() {
    let dir = make_temp_dir("reqlint-config-python");
    fs::write(
        dir.join("requirements.txt"),
        "tomli>=2.0; python_version < \"3.11\"\n",
    )
    .expect("manifest should write");

    // Under the default 3.11 the marker is dead everywhere.
    let stale = run(&dir, &["check", "requirements.txt"]);
    let stdout = normalized_lines(&stale.stdout).join("\n");
    assert!(stdout.contains("never matches"), "stdout: {stdout}");

    let set = run(&dir, &["config", "PYTHON_VERSION", "3.10"]);
    assert!(set.status.success());

    let fresh = run(&dir, &["check", "requirements.txt"]);
    let stdout = normalized_lines(&fresh.stdout).join("\n");
    assert!(
        stdout.contains("No findings."),
        "marker now matches everywhere: {stdout}"
    );
}
